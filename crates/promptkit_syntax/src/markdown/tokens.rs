//! Markdown tokens.

use promptkit_core::lang::symbols::SymbolId;

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::tokens::{BaseToken, Range, SimpleToken, full_range, render, span};

/// `[caption](reference)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    caption: Vec<SimpleToken>,
    reference: Vec<SimpleToken>,
    range: Range,
}

impl MarkdownLink {
    /// `caption` includes its brackets and `reference` its parentheses.
    ///
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if either part is not properly enclosed.
    /// - [`SyntaxError::MisorderedTokens`] if the reference does not follow the caption.
    pub fn new(caption: Vec<SimpleToken>, reference: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let caption_range = full_range(&caption)?;
        let reference_range = full_range(&reference)?;
        let enclosed = |tokens: &[SimpleToken], open, close| {
            tokens.len() >= 2 && tokens[0].is(open) && tokens[tokens.len() - 1].is(close)
        };
        if !enclosed(&caption, SymbolId::LeftBracket, SymbolId::RightBracket)
            || !enclosed(&reference, SymbolId::LeftParenthesis, SymbolId::RightParenthesis)
        {
            return Err(SyntaxError::InvalidToken {
                token: "MarkdownLink",
                range: caption_range.to(reference_range),
                reason: "a link is `[caption](reference)`",
            });
        }
        let range = span(caption_range, reference_range)?;
        Ok(Self {
            caption,
            reference,
            range,
        })
    }

    /// Caption text without brackets.
    pub fn caption(&self) -> String {
        render(&self.caption[1..self.caption.len() - 1], "")
    }

    /// Reference text without parentheses.
    pub fn reference(&self) -> String {
        render(self.reference_tokens(), "")
    }

    /// Range of the reference text without parentheses; zero-width for `()`.
    pub fn reference_range(&self) -> Range {
        match full_range(self.reference_tokens()) {
            Ok(range) => range,
            Err(_) => self.reference[0].range().collapse_to_end(),
        }
    }

    fn reference_tokens(&self) -> &[SimpleToken] {
        &self.reference[1..self.reference.len() - 1]
    }
}

impl BaseToken for MarkdownLink {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.caption.iter().chain(&self.reference).for_each(|t| t.write_text(buf));
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.caption.iter().chain(&self.reference).cloned());
    }
}

/// `![caption](reference)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownImage {
    exclamation: SimpleToken,
    link: MarkdownLink,
    range: Range,
}

impl MarkdownImage {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `exclamation` is not `!`.
    /// - [`SyntaxError::MisorderedTokens`] if the link does not follow it.
    pub fn new(exclamation: SimpleToken, link: MarkdownLink) -> SyntaxResult<Self> {
        if !exclamation.is(SymbolId::ExclamationMark) {
            return Err(SyntaxError::InvalidToken {
                token: "MarkdownImage",
                range: exclamation.range(),
                reason: "an image starts with `!`",
            });
        }
        let range = span(exclamation.range(), link.range())?;
        Ok(Self {
            exclamation,
            link,
            range,
        })
    }

    pub fn link(&self) -> &MarkdownLink {
        &self.link
    }
}

impl BaseToken for MarkdownImage {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.exclamation.write_text(buf);
        self.link.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.push(self.exclamation.clone());
        self.link.collect_leaves(out);
    }
}

/// Opening and closing sequences of an HTML comment.
pub const COMMENT_OPEN: &[SymbolId] = &[
    SymbolId::LeftAngleBracket,
    SymbolId::ExclamationMark,
    SymbolId::Dash,
    SymbolId::Dash,
];
pub const COMMENT_CLOSE: &[SymbolId] = &[SymbolId::Dash, SymbolId::Dash, SymbolId::RightAngleBracket];

/// `<!-- ... -->`; an unterminated comment runs to the end of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownComment {
    tokens: Vec<SimpleToken>,
    range: Range,
}

impl MarkdownComment {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `tokens` do not start with `<!--`.
    pub fn new(tokens: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let range = full_range(&tokens)?;
        if !starts_with_symbols(&tokens, COMMENT_OPEN) {
            return Err(SyntaxError::InvalidToken {
                token: "MarkdownComment",
                range,
                reason: "a comment starts with `<!--`",
            });
        }
        Ok(Self { tokens, range })
    }

    /// `true` when the comment ends with `-->`.
    pub fn is_terminated(&self) -> bool {
        is_terminated(&self.tokens)
    }

    /// Text between the delimiters.
    pub fn body(&self) -> String {
        let end = if self.is_terminated() {
            self.tokens.len() - COMMENT_CLOSE.len()
        } else {
            self.tokens.len()
        };
        render(&self.tokens[COMMENT_OPEN.len()..end], "")
    }
}

pub(crate) fn starts_with_symbols(tokens: &[SimpleToken], symbols: &[SymbolId]) -> bool {
    tokens.len() >= symbols.len() && tokens.iter().zip(symbols).all(|(t, id)| t.is(*id))
}

/// A comment closes on `-->` that does not overlap its opening `<!--`.
pub(crate) fn is_terminated(tokens: &[SimpleToken]) -> bool {
    let minimum = COMMENT_OPEN.len() + COMMENT_CLOSE.len();
    tokens.len() >= minimum
        && tokens[tokens.len() - COMMENT_CLOSE.len()..]
            .iter()
            .zip(COMMENT_CLOSE)
            .all(|(t, id)| t.is(*id))
}

impl BaseToken for MarkdownComment {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.tokens.iter().for_each(|t| t.write_text(buf));
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.tokens.iter().cloned());
    }
}
