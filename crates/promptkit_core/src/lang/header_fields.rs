//! Prompt header field vocabulary.
//!
//! These are the front-matter record names a prompt file header understands, together with the kind of value each
//! one expects.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`applyTo`, not `applyto`).

use super::registry::Stability;

/// Stable identifier for header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFieldId {
    Description,
    Mode,
    Tools,
    Model,
    ApplyTo,
}

/// Value shape a header field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedValue {
    /// A quoted string or a bare scalar.
    Text,
    /// One of a fixed set of words.
    OneOf(&'static [&'static str]),
    /// An array of quoted strings or bare scalars.
    TextArray,
}

/// Metadata for a header field.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFieldInfo {
    pub id: HeaderFieldId,
    pub canonical: &'static str,
    pub expected: ExpectedValue,
    pub description: &'static str,
    pub stability: Stability,
}

/// Chat modes accepted by the `mode` field.
pub const MODES: &[&str] = &["ask", "edit", "agent"];

/// Registry of all header fields.
pub const HEADER_FIELDS: &[HeaderFieldInfo] = &[
    HeaderFieldInfo {
        id: HeaderFieldId::Description,
        canonical: "description",
        expected: ExpectedValue::Text,
        description: "Short description shown in prompt pickers.",
        stability: Stability::Stable,
    },
    HeaderFieldInfo {
        id: HeaderFieldId::Mode,
        canonical: "mode",
        expected: ExpectedValue::OneOf(MODES),
        description: "Chat mode the prompt runs in.",
        stability: Stability::Stable,
    },
    HeaderFieldInfo {
        id: HeaderFieldId::Tools,
        canonical: "tools",
        expected: ExpectedValue::TextArray,
        description: "Tools made available to the prompt.",
        stability: Stability::Stable,
    },
    HeaderFieldInfo {
        id: HeaderFieldId::Model,
        canonical: "model",
        expected: ExpectedValue::Text,
        description: "Language model the prompt prefers.",
        stability: Stability::Draft,
    },
    HeaderFieldInfo {
        id: HeaderFieldId::ApplyTo,
        canonical: "applyTo",
        expected: ExpectedValue::Text,
        description: "Glob pattern of files an instructions file applies to.",
        stability: Stability::Stable,
    },
];

/// Return the canonical spelling for a header field.
pub fn as_str(id: HeaderFieldId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a header field.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: HeaderFieldId) -> &'static HeaderFieldInfo {
    HEADER_FIELDS
        .iter()
        .find(|f| f.id == id)
        .expect("INVARIANT: header field info missing")
}

/// Resolve a record name to a header field identifier.
pub fn from_str(name: &str) -> Option<HeaderFieldId> {
    HEADER_FIELDS.iter().find(|f| f.canonical == name).map(|f| f.id)
}
