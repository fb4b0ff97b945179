//! Markdown partial parsers.

use promptkit_core::lang::symbols::SymbolId;

use super::MarkdownToken;
use super::tokens::{COMMENT_OPEN, MarkdownComment, MarkdownImage, MarkdownLink, is_terminated};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult, PartialParser};
use crate::tokens::SimpleToken;

type Step<P> = SyntaxResult<ParseResult<P, MarkdownToken>>;

/// `[caption]`, optionally preceded by `!` for an image.
#[derive(Debug, Clone)]
pub struct PartialMarkdownLinkCaption {
    exclamation: Option<SimpleToken>,
    tokens: Vec<SimpleToken>,
}

impl PartialMarkdownLinkCaption {
    /// Caption opened by `[`.
    pub fn link(open: SimpleToken) -> Self {
        Self {
            exclamation: None,
            tokens: vec![open],
        }
    }

    /// Image opened by `!`; `[` must come next.
    pub fn image(exclamation: SimpleToken) -> Self {
        Self {
            exclamation: Some(exclamation),
            tokens: Vec::new(),
        }
    }

    fn all_tokens(self) -> Vec<SimpleToken> {
        self.exclamation.into_iter().chain(self.tokens).collect()
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step<MarkdownParser> {
        if self.tokens.is_empty() {
            if token.is(SymbolId::LeftBracket) {
                self.tokens.push(token.clone());
                return Ok(ParseResult::Continue {
                    parser: MarkdownParser::Caption(self),
                    consumed: true,
                });
            }
            return Ok(ParseResult::Failure {
                tokens: self.all_tokens(),
            });
        }
        // A `[` inside the caption starts a fresh link attempt.
        if token.is_line_break() || token.is(SymbolId::LeftBracket) {
            return Ok(ParseResult::Failure {
                tokens: self.all_tokens(),
            });
        }
        self.tokens.push(token.clone());
        if token.is(SymbolId::RightBracket) {
            return Ok(ParseResult::Continue {
                parser: MarkdownParser::Link(PartialMarkdownLink {
                    exclamation: self.exclamation,
                    caption: self.tokens,
                    reference: Vec::new(),
                    depth: 0,
                }),
                consumed: true,
            });
        }
        Ok(ParseResult::Continue {
            parser: MarkdownParser::Caption(self),
            consumed: true,
        })
    }

    pub fn finish(self) -> SyntaxResult<Finished<MarkdownToken>> {
        Ok(Finished::Plain(self.all_tokens()))
    }
}

/// `(reference)` after a complete caption; balanced parentheses may nest inside.
#[derive(Debug, Clone)]
pub struct PartialMarkdownLink {
    exclamation: Option<SimpleToken>,
    caption: Vec<SimpleToken>,
    reference: Vec<SimpleToken>,
    depth: usize,
}

impl PartialMarkdownLink {
    fn all_tokens(self) -> Vec<SimpleToken> {
        self.exclamation
            .into_iter()
            .chain(self.caption)
            .chain(self.reference)
            .collect()
    }

    fn build(self) -> SyntaxResult<MarkdownToken> {
        let link = MarkdownLink::new(self.caption, self.reference)?;
        Ok(match self.exclamation {
            Some(exclamation) => MarkdownToken::Image(MarkdownImage::new(exclamation, link)?),
            None => MarkdownToken::Link(link),
        })
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step<MarkdownParser> {
        let opens = token.is(SymbolId::LeftParenthesis);
        if token.is_line_break() || (self.reference.is_empty() && !opens) {
            return Ok(ParseResult::Failure {
                tokens: self.all_tokens(),
            });
        }
        self.reference.push(token.clone());
        if opens {
            self.depth += 1;
        } else if token.is(SymbolId::RightParenthesis) {
            self.depth -= 1;
            if self.depth == 0 {
                return Ok(ParseResult::Done {
                    token: self.build()?,
                    consumed: true,
                });
            }
        }
        Ok(ParseResult::Continue {
            parser: MarkdownParser::Link(self),
            consumed: true,
        })
    }

    pub fn finish(self) -> SyntaxResult<Finished<MarkdownToken>> {
        Ok(Finished::Plain(self.all_tokens()))
    }
}

/// `<!--` ... `-->`.
#[derive(Debug, Clone)]
pub struct PartialMarkdownComment {
    tokens: Vec<SimpleToken>,
}

impl PartialMarkdownComment {
    pub fn new(open: SimpleToken) -> Self {
        Self { tokens: vec![open] }
    }

    fn is_open(&self) -> bool {
        self.tokens.len() >= COMMENT_OPEN.len()
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step<MarkdownParser> {
        if !self.is_open() && !token.is(COMMENT_OPEN[self.tokens.len()]) {
            return Ok(ParseResult::Failure { tokens: self.tokens });
        }
        self.tokens.push(token.clone());
        if is_terminated(&self.tokens) {
            return Ok(ParseResult::Done {
                token: MarkdownToken::Comment(MarkdownComment::new(self.tokens)?),
                consumed: true,
            });
        }
        Ok(ParseResult::Continue {
            parser: MarkdownParser::Comment(self),
            consumed: true,
        })
    }

    pub fn finish(self) -> SyntaxResult<Finished<MarkdownToken>> {
        if self.is_open() {
            return Ok(Finished::Token(MarkdownToken::Comment(MarkdownComment::new(self.tokens)?)));
        }
        Ok(Finished::Plain(self.tokens))
    }
}

/// Markdown production in progress.
#[derive(Debug, Clone)]
pub enum MarkdownParser {
    Caption(PartialMarkdownLinkCaption),
    Link(PartialMarkdownLink),
    Comment(PartialMarkdownComment),
}

impl PartialParser for MarkdownParser {
    type Output = MarkdownToken;

    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, MarkdownToken>> {
        match self {
            MarkdownParser::Caption(parser) => parser.accept(token),
            MarkdownParser::Link(parser) => parser.accept(token),
            MarkdownParser::Comment(parser) => parser.accept(token),
        }
    }

    fn finish(self) -> SyntaxResult<Finished<MarkdownToken>> {
        match self {
            MarkdownParser::Caption(parser) => parser.finish(),
            MarkdownParser::Link(parser) => parser.finish(),
            MarkdownParser::Comment(parser) => parser.finish(),
        }
    }
}
