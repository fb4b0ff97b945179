//! Contract-violation errors for the syntax frontend.
//!
//! Parse-level rejection of malformed input is **not** an error: partial parsers return
//! [`crate::parser_base::ParseResult::Failure`] and the decoder replays the tokens as plain text. The errors in this
//! module signal a bug in the caller or an impossible internal state and must be propagated, not swallowed.

use miette::Diagnostic;
use thiserror::Error;

use crate::tokens::Range;

/// A violated precondition of the token model or the parser contract.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    /// A spanning range was requested for no tokens at all.
    #[error("cannot compute the range of an empty token list")]
    #[diagnostic(code(promptkit::empty_token_list))]
    EmptyTokenList,

    /// The first token of a list starts after (or overlaps) the last one.
    #[error("tokens are out of order: first token at {first} must precede last token at {last}")]
    #[diagnostic(code(promptkit::misordered_tokens))]
    MisorderedTokens { first: Range, last: Range },

    /// A boolean token was built from a word that is not `true`/`false`.
    #[error("`{text}` at {range} is not a boolean literal")]
    #[diagnostic(code(promptkit::not_a_boolean))]
    NotABoolean { text: String, range: Range },

    /// A token was assembled from children of the wrong kind.
    #[error("cannot build {token} at {range}: {reason}")]
    #[diagnostic(code(promptkit::invalid_token))]
    InvalidToken {
        token: &'static str,
        range: Range,
        reason: &'static str,
    },

    /// A grammar kept handing back the same token without consuming it.
    #[error("decoder stalled on `{text}` at {range}: the token was re-offered {attempts} times without being consumed")]
    #[diagnostic(code(promptkit::stalled))]
    Stalled { text: String, range: Range, attempts: usize },
}

/// Result alias for fallible token-model and decoder operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;
