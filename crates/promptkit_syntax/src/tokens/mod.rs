//! Token model shared by the simple codec and every decoder.
//!
//! - [`SimpleToken`] is the leaf: one word or one symbol with its range.
//! - [`CompositeToken`] owns a list of children and spans them.
//! - [`Token`] is the closed set of everything a decoder can emit.
//!
//! ## Notes
//! - Tokens are immutable values; "moving" a token means building a new one (see [`SimpleToken::with_range`]).
//! - Equality (`==`) means same concrete kind, same text and same range.
//! - [`render`] over the flat simple-token stream reproduces the source text exactly.

mod composite;
mod range;
mod simple;

pub use composite::CompositeToken;
pub use range::{Range, RangeUpdate};
pub use simple::{SimpleKind, SimpleToken};

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::front_matter::FrontMatterToken;
use crate::markdown::MarkdownToken;
use crate::markdown_extensions::FrontMatterHeader;
use crate::prompt::PromptToken;

/// Default limit for [`BaseToken::short_text`].
pub const SHORT_TEXT_MAX: usize = 32;

/// Behaviour common to every token: a source range and a text projection.
pub trait BaseToken {
    /// Range the token covers in the source.
    fn range(&self) -> Range;

    /// Append the token's source text to `buf`.
    fn write_text(&self, buf: &mut String);

    /// Append the leaf tokens this token was built from, in source order.
    fn collect_leaves(&self, out: &mut Vec<SimpleToken>);

    fn text(&self) -> String {
        let mut buf = String::new();
        self.write_text(&mut buf);
        buf
    }

    /// Leaf tokens this token was built from, in source order.
    fn leaves(&self) -> Vec<SimpleToken> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Range-only equality.
    fn same_range<O: BaseToken>(&self, other: &O) -> bool
    where
        Self: Sized,
    {
        self.range() == other.range()
    }

    /// Zero-width range at the start of the token (a cursor position).
    fn collapsed_range(&self) -> Range {
        self.range().collapse_to_start()
    }

    /// Text truncated to at most `max_length` characters, ending in `…` when cut.
    fn short_text(&self, max_length: usize) -> String {
        let text = self.text();
        if text.chars().count() <= max_length {
            return text;
        }
        let mut short: String = text.chars().take(max_length.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

/// Render a token sequence by joining every token's text with `delimiter`.
pub fn render<T: BaseToken>(tokens: &[T], delimiter: &str) -> String {
    let mut buf = String::new();
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            buf.push_str(delimiter);
        }
        token.write_text(&mut buf);
    }
    buf
}

/// Range spanning the first to the last token.
///
/// ## Errors
/// - [`SyntaxError::EmptyTokenList`] if `tokens` is empty.
/// - [`SyntaxError::MisorderedTokens`] if the first token starts on a later line than the last one, or (on the same
///   line) ends after the last one starts.
pub fn full_range<T: BaseToken>(tokens: &[T]) -> SyntaxResult<Range> {
    match tokens {
        [] => Err(SyntaxError::EmptyTokenList),
        [only] => Ok(only.range()),
        [first, .., last] => span(first.range(), last.range()),
    }
}

/// Range from `first` to `last`, checking that `first` comes before `last`.
///
/// ## Errors
/// - [`SyntaxError::MisorderedTokens`] under the same conditions as [`full_range`].
pub fn span(first: Range, last: Range) -> SyntaxResult<Range> {
    let misordered = first.start_line > last.start_line
        || (first.start_line == last.start_line && first.end_column > last.start_column);
    if misordered {
        return Err(SyntaxError::MisorderedTokens { first, last });
    }
    Ok(first.to(last))
}

/// Every token a decoder can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Simple(SimpleToken),
    FrontMatter(FrontMatterToken),
    Markdown(MarkdownToken),
    Header(FrontMatterHeader),
    Prompt(PromptToken),
}

impl Token {
    pub fn as_simple(&self) -> Option<&SimpleToken> {
        match self {
            Token::Simple(token) => Some(token),
            _ => None,
        }
    }

    /// Short name of the concrete token kind, used by debug listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Simple(token) => token.kind_name(),
            Token::FrontMatter(token) => token.kind_name(),
            Token::Markdown(token) => token.kind_name(),
            Token::Header(_) => "FrontMatterHeader",
            Token::Prompt(token) => token.kind_name(),
        }
    }

    /// `true` for a plain whitespace token.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Simple(token) if token.is_whitespace())
    }
}

impl BaseToken for Token {
    fn range(&self) -> Range {
        match self {
            Token::Simple(token) => token.range(),
            Token::FrontMatter(token) => token.range(),
            Token::Markdown(token) => token.range(),
            Token::Header(token) => token.range(),
            Token::Prompt(token) => token.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            Token::Simple(token) => token.write_text(buf),
            Token::FrontMatter(token) => token.write_text(buf),
            Token::Markdown(token) => token.write_text(buf),
            Token::Header(token) => token.write_text(buf),
            Token::Prompt(token) => token.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            Token::Simple(token) => token.collect_leaves(out),
            Token::FrontMatter(token) => token.collect_leaves(out),
            Token::Markdown(token) => token.collect_leaves(out),
            Token::Header(token) => token.collect_leaves(out),
            Token::Prompt(token) => token.collect_leaves(out),
        }
    }
}

impl From<SimpleToken> for Token {
    fn from(token: SimpleToken) -> Self {
        Token::Simple(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptkit_core::lang::symbols::SymbolId;

    fn word(text: &str, line: usize, column: usize) -> SimpleToken {
        let width = text.chars().count();
        SimpleToken::word(text, Range::new(line, column, line, column + width))
    }

    #[test]
    fn test_full_range_of_empty_list_fails() {
        let tokens: Vec<SimpleToken> = Vec::new();
        assert_eq!(full_range(&tokens), Err(SyntaxError::EmptyTokenList));
    }

    #[test]
    fn test_full_range_rejects_later_first_line() {
        let tokens = vec![word("b", 2, 1), word("a", 1, 1)];
        assert!(matches!(
            full_range(&tokens),
            Err(SyntaxError::MisorderedTokens { .. })
        ));
    }

    #[test]
    fn test_full_range_rejects_overlap_on_same_line() {
        let tokens = vec![word("abc", 1, 1), word("x", 1, 2)];
        assert!(matches!(
            full_range(&tokens),
            Err(SyntaxError::MisorderedTokens { .. })
        ));
    }

    #[test]
    fn test_full_range_spans_first_to_last() {
        let tokens = vec![word("ab", 1, 1), word("cd", 1, 3), word("ef", 2, 1)];
        assert_eq!(full_range(&tokens), Ok(Range::new(1, 1, 2, 3)));
    }

    #[test]
    fn test_full_range_of_single_token() {
        let tokens = vec![word("hello", 3, 4)];
        assert_eq!(full_range(&tokens), Ok(Range::new(3, 4, 3, 9)));
    }

    #[test]
    fn test_render_with_delimiter() {
        let tokens = vec![word("a", 1, 1), word("b", 1, 2)];
        assert_eq!(render(&tokens, ""), "ab");
        assert_eq!(render(&tokens, ", "), "a, b");
    }

    #[test]
    fn test_short_text_truncates_with_ellipsis() {
        let token = word("abcdefghij", 1, 1);
        assert_eq!(token.short_text(32), "abcdefghij");
        assert_eq!(token.short_text(5), "abcd…");
        assert_eq!(token.short_text(5).chars().count(), 5);
    }

    #[test]
    fn test_equality_requires_kind_text_and_range() {
        let colon = SimpleToken::symbol(SymbolId::Colon, Range::new(1, 1, 1, 2));
        assert_eq!(colon, SimpleToken::symbol(SymbolId::Colon, Range::new(1, 1, 1, 2)));
        assert_ne!(colon, SimpleToken::symbol(SymbolId::Colon, Range::new(1, 2, 1, 3)));
        assert_ne!(colon, SimpleToken::word(":", Range::new(1, 1, 1, 2)));
        assert!(colon.same_range(&SimpleToken::word(":", Range::new(1, 1, 1, 2))));
    }
}
