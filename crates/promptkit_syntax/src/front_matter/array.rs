//! Array parser: `[` value, value, ... `]`.
//!
//! ## Notes
//! - Two values need a comma between them; redundant commas (`[a,, b, ,]`) are skipped, not read as empty items.
//! - Whitespace around items, including line breaks, belongs to the array and not to the items.
//! - Untyped items are trimmed of trailing whitespace and end at a line break; a value on the next line needs a comma
//!   before it.

use promptkit_core::lang::symbols::SymbolId;

use super::tokens::{ArrayElement, FrontMatterArray, FrontMatterValue};
use super::value::{ARRAY_ITEM_END, PartialFrontMatterValue};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult, PartialParser};
use crate::tokens::{BaseToken, SimpleToken};

#[derive(Debug, Clone)]
pub struct PartialFrontMatterArray {
    elements: Vec<ArrayElement>,
    item_allowed: bool,
    current: Option<PartialFrontMatterValue>,
}

impl PartialFrontMatterArray {
    pub fn new(open: SimpleToken) -> Self {
        Self {
            elements: vec![ArrayElement::Plain(open)],
            item_allowed: true,
            current: None,
        }
    }

    /// Whether the next non-whitespace token may start an item.
    pub fn array_item_allowed(&self) -> bool {
        self.item_allowed
    }

    fn push_value(&mut self, value: FrontMatterValue) -> SyntaxResult<()> {
        match value {
            FrontMatterValue::Sequence(sequence) => {
                let (trimmed, trailing) = sequence.trim_end()?;
                self.elements.push(ArrayElement::Value(FrontMatterValue::Sequence(trimmed)));
                self.elements.extend(trailing.into_iter().map(ArrayElement::Plain));
            }
            other => self.elements.push(ArrayElement::Value(other)),
        }
        Ok(())
    }

    fn leaves(&self) -> Vec<SimpleToken> {
        let mut out = Vec::new();
        for element in &self.elements {
            element.collect_leaves(&mut out);
        }
        out
    }

    fn fail(self, tail: Vec<SimpleToken>) -> ParseResult<Self, FrontMatterArray> {
        let mut tokens = self.leaves();
        tokens.extend(tail);
        ParseResult::Failure { tokens }
    }
}

impl PartialParser for PartialFrontMatterArray {
    type Output = FrontMatterArray;

    fn accept(mut self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterArray>> {
        if let Some(current) = self.current.take() {
            return Ok(match current.accept(token)? {
                ParseResult::Continue { parser, consumed } => {
                    self.current = Some(parser);
                    ParseResult::Continue {
                        parser: self,
                        consumed,
                    }
                }
                ParseResult::Done { token: value, consumed } => {
                    self.push_value(value)?;
                    ParseResult::Continue {
                        parser: self,
                        consumed,
                    }
                }
                ParseResult::Failure { tokens } => self.fail(tokens),
            });
        }

        if token.is(SymbolId::RightBracket) {
            self.elements.push(ArrayElement::Plain(token.clone()));
            return Ok(ParseResult::Done {
                token: FrontMatterArray::new(self.elements)?,
                consumed: true,
            });
        }
        if token.is(SymbolId::Comma) {
            self.elements.push(ArrayElement::Plain(token.clone()));
            self.item_allowed = true;
            return Ok(ParseResult::Continue {
                parser: self,
                consumed: true,
            });
        }
        if token.is_whitespace() {
            self.elements.push(ArrayElement::Plain(token.clone()));
            return Ok(ParseResult::Continue {
                parser: self,
                consumed: true,
            });
        }
        if !self.item_allowed {
            return Ok(self.fail(Vec::new()));
        }

        self.item_allowed = false;
        match PartialFrontMatterValue::start(token, ARRAY_ITEM_END)? {
            ParseResult::Continue { parser, .. } => self.current = Some(parser),
            ParseResult::Done { token: value, .. } => self.push_value(value)?,
            ParseResult::Failure { tokens } => return Ok(self.fail(tokens)),
        }
        Ok(ParseResult::Continue {
            parser: self,
            consumed: true,
        })
    }

    fn finish(mut self) -> SyntaxResult<Finished<FrontMatterArray>> {
        let tail = match self.current.take() {
            Some(current) => match current.finish()? {
                Finished::Token(value) => value.leaves(),
                Finished::Plain(tokens) => tokens,
            },
            None => Vec::new(),
        };
        let mut tokens = self.leaves();
        tokens.extend(tail);
        Ok(Finished::Plain(tokens))
    }
}
