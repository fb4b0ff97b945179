//! Shareable metadata for `promptkit_core::lang` registries.
//!
//! The registries in `promptkit_core::lang` are **registry-first** vocabularies. This submodule provides the small,
//! dependency-free metadata types that are reused across all of them.
//!
//! ## Notes
//! - These types are `Copy`-friendly so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives in the decoders.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use promptkit_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Represent a small example snippet for documentation.
///
/// ## Examples
/// ```rust
/// use promptkit_core::lang::registry::Example;
///
/// let ex = Example {
///     code: "#file:./docs/readme.md",
///     note: Some("File reference."),
/// };
/// assert!(ex.code.starts_with('#'));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
