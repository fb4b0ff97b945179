//! Header envelope parsers.
//!
//! The end marker is speculative: a line-initial dash opens a candidate, and every following token is checked
//! against it first. A candidate that turns out not to be a marker with exactly the start marker's dash count is
//! rolled back by dropping its save-point; its tokens are already part of the content.

use promptkit_core::lang::front_matter::MARKER_SYMBOL;
use promptkit_core::lang::symbols::SymbolId;

use super::HeaderParser;
use super::tokens::{FrontMatterHeader, FrontMatterMarker, Text};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult};
use crate::tokens::{BaseToken, SimpleToken};

type Step = SyntaxResult<ParseResult<HeaderParser, FrontMatterHeader>>;

/// Shape of a marker line seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerProgress {
    dashes: usize,
    carriage_return: bool,
}

impl MarkerProgress {
    fn of(tokens: &[SimpleToken]) -> Self {
        Self {
            dashes: tokens.iter().filter(|t| t.is(MARKER_SYMBOL)).count(),
            carriage_return: tokens.iter().any(|t| t.is(SymbolId::CarriageReturn)),
        }
    }
}

/// `---` at the very start of the document.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterStartMarker {
    tokens: Vec<SimpleToken>,
    min_dashes: usize,
}

impl PartialFrontMatterStartMarker {
    pub fn new(first: SimpleToken, min_dashes: usize) -> Self {
        Self {
            tokens: vec![first],
            min_dashes,
        }
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step {
        let progress = MarkerProgress::of(&self.tokens);
        let long_enough = progress.dashes >= self.min_dashes;
        if token.is(MARKER_SYMBOL) && !progress.carriage_return {
            self.tokens.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: HeaderParser::StartMarker(self),
                consumed: true,
            });
        }
        if token.is(SymbolId::CarriageReturn) && long_enough && !progress.carriage_return {
            self.tokens.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: HeaderParser::StartMarker(self),
                consumed: true,
            });
        }
        if token.is(SymbolId::NewLine) && long_enough {
            self.tokens.push(token.clone());
            let marker = FrontMatterMarker::new(self.tokens)?;
            return Ok(ParseResult::Continue {
                parser: HeaderParser::Header(PartialFrontMatterHeader::new(marker)),
                consumed: true,
            });
        }
        Ok(ParseResult::Failure { tokens: self.tokens })
    }

    pub fn finish(self) -> SyntaxResult<Finished<FrontMatterHeader>> {
        Ok(Finished::Plain(self.tokens))
    }
}

/// Content collection, with at most one end-marker candidate in flight.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterHeader {
    start_marker: FrontMatterMarker,
    tokens: Vec<SimpleToken>,
    /// Index into `tokens` where the current end-marker candidate begins.
    candidate: Option<usize>,
}

impl PartialFrontMatterHeader {
    pub fn new(start_marker: FrontMatterMarker) -> Self {
        Self {
            start_marker,
            tokens: Vec::new(),
            candidate: None,
        }
    }

    fn at_line_start(&self) -> bool {
        self.tokens.last().is_none_or(|t| t.is(SymbolId::NewLine))
    }

    fn build(mut self, start: usize) -> SyntaxResult<FrontMatterHeader> {
        let marker_tokens = self.tokens.split_off(start);
        let end_marker = FrontMatterMarker::new(marker_tokens)?;
        let content = Text::new(self.tokens, end_marker.range())?;
        FrontMatterHeader::new(self.start_marker, content, end_marker)
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step {
        if let Some(start) = self.candidate {
            let progress = MarkerProgress::of(&self.tokens[start..]);
            let wanted = self.start_marker.dash_count();
            if token.is(MARKER_SYMBOL) && !progress.carriage_return && progress.dashes < wanted {
                self.tokens.push(token.clone());
                return Ok(ParseResult::Continue {
                    parser: HeaderParser::Header(self),
                    consumed: true,
                });
            }
            if token.is(SymbolId::CarriageReturn) && !progress.carriage_return && progress.dashes == wanted {
                self.tokens.push(token.clone());
                return Ok(ParseResult::Continue {
                    parser: HeaderParser::Header(self),
                    consumed: true,
                });
            }
            if token.is(SymbolId::NewLine) && progress.dashes == wanted {
                self.tokens.push(token.clone());
                return Ok(ParseResult::Done {
                    token: self.build(start)?,
                    consumed: true,
                });
            }
            tracing::trace!(at = %token.range(), dashes = progress.dashes, "end marker candidate rolled back");
            self.candidate = None;
        }

        if token.is(MARKER_SYMBOL) && self.at_line_start() {
            self.candidate = Some(self.tokens.len());
        }
        self.tokens.push(token.clone());
        Ok(ParseResult::Continue {
            parser: HeaderParser::Header(self),
            consumed: true,
        })
    }

    /// A document may end right after the end marker's dashes.
    pub fn finish(self) -> SyntaxResult<Finished<FrontMatterHeader>> {
        if let Some(start) = self.candidate {
            let progress = MarkerProgress::of(&self.tokens[start..]);
            if progress.dashes == self.start_marker.dash_count() {
                return Ok(Finished::Token(self.build(start)?));
            }
        }
        let mut tokens = self.start_marker.leaves();
        tokens.extend(self.tokens);
        Ok(Finished::Plain(tokens))
    }
}
