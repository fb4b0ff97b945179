//! Chat-prompt reference vocabulary.
//!
//! A prompt reference starts with a trigger symbol (`#`, `@`, `/`, `$`) and continues until whitespace or one of its
//! stop symbols. Each reference kind carries its own stop set (symbols that end the reference and stay outside it)
//! and its own invalid set (symbols that reject the reference when they appear inside its name).
//!
//! ## Notes
//! - `#`, `@` and `/` only trigger a reference at a word boundary (stream start or after whitespace), so paths like
//!   `src/lib.rs` and addresses like `me@example.com` stay plain text.
//! - `$` must be followed by `{` to form a template variable.
//!
//! ## Examples
//! ```rust
//! use promptkit_core::lang::prompt::{self, ReferenceKind};
//! use promptkit_core::lang::symbols::SymbolId;
//!
//! assert_eq!(prompt::from_trigger(SymbolId::At), Some(ReferenceKind::AtMention));
//! assert!(prompt::is_invalid_in_name(ReferenceKind::AtMention, SymbolId::ExclamationMark));
//! assert!(prompt::is_stop_symbol(ReferenceKind::AtMention, SymbolId::Comma));
//! ```

use super::registry::Example;
use super::symbols::SymbolId;
use SymbolId::*;

/// Stable identifier for prompt reference kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `#name` or `#name:data`.
    Variable,
    /// `@name`.
    AtMention,
    /// `/name`.
    SlashCommand,
    /// `${contents}`.
    Template,
}

/// Metadata for a reference kind.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceInfo {
    pub kind: ReferenceKind,
    pub trigger: SymbolId,
    /// Whether the trigger only counts at a word boundary.
    pub requires_boundary: bool,
    /// Whether whitespace ends the reference (template variables end at `}` instead).
    pub stops_at_whitespace: bool,
    /// Symbols that end the reference; the symbol itself is left outside.
    pub stop_symbols: &'static [SymbolId],
    /// Symbols that invalidate the reference when seen inside its name.
    pub invalid_in_name: &'static [SymbolId],
    pub description: &'static str,
    pub examples: &'static [Example],
}

/// Name of the variable that turns `#file:<path>` into a file reference.
pub const FILE_VARIABLE: &str = "file";

/// Trailing punctuation that ends `#`, `@` and `/` references.
pub const REFERENCE_STOP_SYMBOLS: &[SymbolId] = &[Comma, RightParenthesis, RightBracket, RightAngleBracket];

/// Symbols that invalidate the data part of `#name:data`.
pub const INVALID_IN_VARIABLE_DATA: &[SymbolId] = &[LeftAngleBracket, Hash, At];

/// Registry of all reference kinds.
pub const REFERENCES: &[ReferenceInfo] = &[
    ReferenceInfo {
        kind: ReferenceKind::Variable,
        trigger: Hash,
        requires_boundary: true,
        stops_at_whitespace: true,
        stop_symbols: REFERENCE_STOP_SYMBOLS,
        invalid_in_name: &[
            Hash,
            At,
            DollarSign,
            ExclamationMark,
            Slash,
            Quote,
            DoubleQuote,
            LeftBracket,
            LeftParenthesis,
            LeftAngleBracket,
            LeftCurlyBrace,
            RightCurlyBrace,
        ],
        description: "Chat variable, optionally carrying data after a colon.",
        examples: &[
            Example {
                code: "#selection",
                note: None,
            },
            Example {
                code: "#file:./docs/readme.md",
                note: Some("File reference."),
            },
        ],
    },
    ReferenceInfo {
        kind: ReferenceKind::AtMention,
        trigger: At,
        requires_boundary: true,
        stops_at_whitespace: true,
        stop_symbols: REFERENCE_STOP_SYMBOLS,
        invalid_in_name: &[ExclamationMark, LeftAngleBracket, LeftBracket, Hash, At],
        description: "Mention of a chat participant or agent.",
        examples: &[Example {
            code: "@workspace",
            note: None,
        }],
    },
    ReferenceInfo {
        kind: ReferenceKind::SlashCommand,
        trigger: Slash,
        requires_boundary: true,
        stops_at_whitespace: true,
        stop_symbols: REFERENCE_STOP_SYMBOLS,
        invalid_in_name: &[ExclamationMark, LeftAngleBracket, LeftBracket, Hash, At, Slash],
        description: "Slash command invocation.",
        examples: &[Example {
            code: "/explain",
            note: None,
        }],
    },
    ReferenceInfo {
        kind: ReferenceKind::Template,
        trigger: DollarSign,
        requires_boundary: false,
        stops_at_whitespace: false,
        stop_symbols: &[],
        invalid_in_name: &[LeftCurlyBrace, NewLine, CarriageReturn],
        description: "Template variable substituted before the prompt is sent.",
        examples: &[Example {
            code: "${input:topic}",
            note: None,
        }],
    },
];

/// Return the full metadata entry for a reference kind.
///
/// ## Panics
/// - If the registry is missing an entry for `kind` (this indicates a programming error).
pub fn info_for(kind: ReferenceKind) -> &'static ReferenceInfo {
    REFERENCES
        .iter()
        .find(|r| r.kind == kind)
        .expect("INVARIANT: reference info missing")
}

/// Resolve a trigger symbol to the reference kind it starts.
pub fn from_trigger(symbol: SymbolId) -> Option<ReferenceKind> {
    REFERENCES.iter().find(|r| r.trigger == symbol).map(|r| r.kind)
}

/// Return the trigger symbol of a reference kind.
pub fn trigger(kind: ReferenceKind) -> SymbolId {
    info_for(kind).trigger
}

/// Return `true` if `symbol` may not appear inside the name of a `kind` reference.
pub fn is_invalid_in_name(kind: ReferenceKind, symbol: SymbolId) -> bool {
    info_for(kind).invalid_in_name.contains(&symbol)
}

/// Return `true` if `symbol` ends a `kind` reference without being part of it.
pub fn is_stop_symbol(kind: ReferenceKind, symbol: SymbolId) -> bool {
    info_for(kind).stop_symbols.contains(&symbol)
}

/// Return `true` if `symbol` may not appear inside the data of a `#name:data` variable.
pub fn is_invalid_in_variable_data(symbol: SymbolId) -> bool {
    INVALID_IN_VARIABLE_DATA.contains(&symbol)
}
