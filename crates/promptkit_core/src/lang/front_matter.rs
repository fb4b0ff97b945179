//! Front-matter literal vocabulary.
//!
//! ## Notes
//! - Boolean literals are matched **case-insensitively** and must be the whole word (`TRUE` is a boolean,
//!   `true1` is not).
//!
//! ## Examples
//! ```rust
//! use promptkit_core::lang::front_matter;
//!
//! assert_eq!(front_matter::parse_boolean("False"), Some(false));
//! assert_eq!(front_matter::parse_boolean("yes"), None);
//! ```

use super::symbols::SymbolId;

/// Symbol repeated to form the `---` header markers.
pub const MARKER_SYMBOL: SymbolId = SymbolId::Dash;

/// Smallest number of marker symbols that opens a front-matter header.
pub const MIN_MARKER_LENGTH: usize = 3;

/// Boolean literal spellings with their values.
pub const BOOLEAN_LITERALS: &[(&str, bool)] = &[("true", true), ("false", false)];

/// Resolve a word to a boolean value, if it is a boolean literal.
pub fn parse_boolean(word: &str) -> Option<bool> {
    BOOLEAN_LITERALS
        .iter()
        .find(|(spelling, _)| spelling.eq_ignore_ascii_case(word))
        .map(|(_, value)| *value)
}
