//! Symbol vocabulary.
//!
//! This module defines the canonical set of single-character symbols recognized by the simple codec: spacing, line
//! breaks, separators, delimiters, quotes and markers. Every character that is **not** listed here is a word
//! character and becomes part of a `Word` token.
//!
//! ## Notes
//! - Lookup via [`from_char`] is exact; there are no aliases.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use promptkit_core::lang::symbols::{self, SymbolCategory, SymbolId};
//!
//! assert_eq!(symbols::from_char('['), Some(SymbolId::LeftBracket));
//! assert_eq!(symbols::category(SymbolId::Tab), SymbolCategory::Spacing);
//! ```

use super::registry::Stability;

/// Broad syntactic grouping for symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    /// Horizontal whitespace (space, tab, vertical tab, form feed).
    Spacing,
    /// Line terminators.
    LineBreak,
    /// Separators like `,` and `:`.
    Separator,
    /// Brackets, parentheses, braces and angle brackets.
    Delimiter,
    /// Single and double quotes.
    Quote,
    /// Reference triggers and other markers like `#`, `@`, `$`, `!`.
    Marker,
}

/// Stable identifier for symbol tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    // Spacing
    Space,
    Tab,
    VerticalTab,
    FormFeed,

    // Line breaks
    NewLine,
    CarriageReturn,

    // Separators
    Colon,
    Comma,
    Dash,
    Slash,

    // Quotes
    Quote,
    DoubleQuote,

    // Markers
    Hash,
    At,
    DollarSign,
    ExclamationMark,

    // Delimiters
    LeftBracket,
    RightBracket,
    LeftParenthesis,
    RightParenthesis,
    LeftAngleBracket,
    RightAngleBracket,
    LeftCurlyBrace,
    RightCurlyBrace,
}

/// Metadata for a symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo {
    pub id: SymbolId,
    pub canonical: char,
    /// Human readable name used in diagnostics (e.g. "colon").
    pub name: &'static str,
    pub category: SymbolCategory,
    pub stability: Stability,
}

/// Registry of all symbols.
pub const SYMBOLS: &[SymbolInfo] = &[
    // Spacing
    info(SymbolId::Space, ' ', "space", SymbolCategory::Spacing),
    info(SymbolId::Tab, '\t', "tab", SymbolCategory::Spacing),
    info(SymbolId::VerticalTab, '\u{0B}', "vertical tab", SymbolCategory::Spacing),
    info(SymbolId::FormFeed, '\u{0C}', "form feed", SymbolCategory::Spacing),
    // Line breaks
    info(SymbolId::NewLine, '\n', "new line", SymbolCategory::LineBreak),
    info(SymbolId::CarriageReturn, '\r', "carriage return", SymbolCategory::LineBreak),
    // Separators
    info(SymbolId::Colon, ':', "colon", SymbolCategory::Separator),
    info(SymbolId::Comma, ',', "comma", SymbolCategory::Separator),
    info(SymbolId::Dash, '-', "dash", SymbolCategory::Separator),
    info(SymbolId::Slash, '/', "slash", SymbolCategory::Separator),
    // Quotes
    info(SymbolId::Quote, '\'', "quote", SymbolCategory::Quote),
    info(SymbolId::DoubleQuote, '"', "double quote", SymbolCategory::Quote),
    // Markers
    info(SymbolId::Hash, '#', "hash", SymbolCategory::Marker),
    info(SymbolId::At, '@', "at sign", SymbolCategory::Marker),
    info(SymbolId::DollarSign, '$', "dollar sign", SymbolCategory::Marker),
    info(SymbolId::ExclamationMark, '!', "exclamation mark", SymbolCategory::Marker),
    // Delimiters
    info(SymbolId::LeftBracket, '[', "left bracket", SymbolCategory::Delimiter),
    info(SymbolId::RightBracket, ']', "right bracket", SymbolCategory::Delimiter),
    info(SymbolId::LeftParenthesis, '(', "left parenthesis", SymbolCategory::Delimiter),
    info(SymbolId::RightParenthesis, ')', "right parenthesis", SymbolCategory::Delimiter),
    info(SymbolId::LeftAngleBracket, '<', "left angle bracket", SymbolCategory::Delimiter),
    info(SymbolId::RightAngleBracket, '>', "right angle bracket", SymbolCategory::Delimiter),
    info(SymbolId::LeftCurlyBrace, '{', "left curly brace", SymbolCategory::Delimiter),
    info(SymbolId::RightCurlyBrace, '}', "right curly brace", SymbolCategory::Delimiter),
];

/// Return the canonical character for a symbol.
pub fn as_char(id: SymbolId) -> char {
    info_for(id).canonical
}

/// Return the diagnostic name for a symbol.
pub fn name(id: SymbolId) -> &'static str {
    info_for(id).name
}

/// Return the category for a symbol.
pub fn category(id: SymbolId) -> SymbolCategory {
    info_for(id).category
}

/// Return the full metadata entry for a symbol.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: SymbolId) -> &'static SymbolInfo {
    SYMBOLS
        .iter()
        .find(|s| s.id == id)
        .expect("INVARIANT: symbol info missing")
}

/// Resolve a character to its symbol identifier.
///
/// Returns `None` for word characters.
pub fn from_char(c: char) -> Option<SymbolId> {
    SYMBOLS.iter().find(|s| s.canonical == c).map(|s| s.id)
}

/// Return `true` if `id` is horizontal whitespace.
pub fn is_spacing(id: SymbolId) -> bool {
    category(id) == SymbolCategory::Spacing
}

/// Return `true` if `id` terminates (or is part of terminating) a line.
pub fn is_line_break(id: SymbolId) -> bool {
    category(id) == SymbolCategory::LineBreak
}

const fn info(id: SymbolId, canonical: char, name: &'static str, category: SymbolCategory) -> SymbolInfo {
    SymbolInfo {
        id,
        canonical,
        name,
        category,
        stability: Stability::Stable,
    }
}
