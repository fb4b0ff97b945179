//! Record parsers: `name`, then the `: ` delimiter, then a value up to the end of the line.
//!
//! ```text
//! PartialFrontMatterRecordName ──(`:` or spacing)──▶ PartialFrontMatterRecordNameWithDelimiter
//!                                                         │ `:` then spacing (or `:` then line break)
//!                                                         ▼
//!                                                  PartialFrontMatterRecord ──(value done)──▶ FrontMatterRecord
//! ```

use promptkit_core::lang::symbols::SymbolId;

use super::FrontMatterParser;
use super::tokens::{
    FrontMatterRecord, FrontMatterRecordDelimiter, FrontMatterRecordName, FrontMatterSequence, FrontMatterValue,
    is_name_token,
};
use super::value::{END_OF_LINE, PartialFrontMatterValue, is_stop};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult, PartialParser};
use crate::tokens::{BaseToken, Range, SimpleToken};

type Step = SyntaxResult<ParseResult<FrontMatterParser, FrontMatterRecord>>;

/// Collects the words and dashes of a record name.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterRecordName {
    tokens: Vec<SimpleToken>,
}

impl PartialFrontMatterRecordName {
    pub fn new(first: SimpleToken) -> Self {
        Self { tokens: vec![first] }
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step {
        if is_name_token(token) {
            self.tokens.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: FrontMatterParser::Name(self),
                consumed: true,
            });
        }
        if token.is(SymbolId::Colon) || token.is_spacing() {
            let name = FrontMatterRecordName::new(self.tokens)?;
            return Ok(ParseResult::Continue {
                parser: FrontMatterParser::NameWithDelimiter(PartialFrontMatterRecordNameWithDelimiter::new(name)),
                consumed: false,
            });
        }
        Ok(ParseResult::Failure { tokens: self.tokens })
    }

    pub fn finish(self) -> SyntaxResult<Finished<FrontMatterRecord>> {
        Ok(Finished::Plain(self.tokens))
    }
}

/// A finished name, waiting for the delimiter.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterRecordNameWithDelimiter {
    name: FrontMatterRecordName,
    tokens: Vec<SimpleToken>,
}

impl PartialFrontMatterRecordNameWithDelimiter {
    pub fn new(name: FrontMatterRecordName) -> Self {
        Self {
            name,
            tokens: Vec::new(),
        }
    }

    /// Pop the last collected token if it is a colon.
    fn take_colon(&mut self) -> Option<SimpleToken> {
        match self.tokens.last() {
            Some(last) if last.is(SymbolId::Colon) => self.tokens.pop(),
            _ => None,
        }
    }

    fn into_record(self, delimiter: FrontMatterRecordDelimiter) -> PartialFrontMatterRecord {
        PartialFrontMatterRecord::new(self.name, self.tokens, delimiter)
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step {
        let ends_delimiter = token.is_spacing() || token.is_line_break();
        if ends_delimiter {
            if let Some(colon) = self.take_colon() {
                // `key:\n` has an empty value: the line break stays for the record to see.
                let spacing = token.is_spacing().then(|| token.clone());
                let consumed = spacing.is_some();
                let delimiter = FrontMatterRecordDelimiter::new(colon, spacing)?;
                return Ok(ParseResult::Continue {
                    parser: FrontMatterParser::Record(self.into_record(delimiter)),
                    consumed,
                });
            }
        }
        if token.is_spacing() || token.is(SymbolId::Colon) {
            self.tokens.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: FrontMatterParser::NameWithDelimiter(self),
                consumed: true,
            });
        }
        let mut tokens = self.name.leaves();
        tokens.extend(self.tokens);
        Ok(ParseResult::Failure { tokens })
    }

    pub fn finish(mut self) -> SyntaxResult<Finished<FrontMatterRecord>> {
        if let Some(colon) = self.take_colon() {
            let delimiter = FrontMatterRecordDelimiter::new(colon, None)?;
            return self.into_record(delimiter).finish();
        }
        let mut tokens = self.name.leaves();
        tokens.extend(self.tokens);
        Ok(Finished::Plain(tokens))
    }
}

/// Name and delimiter are known; parses the value.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterRecord {
    name: FrontMatterRecordName,
    before_delimiter: Vec<SimpleToken>,
    delimiter: FrontMatterRecordDelimiter,
    before_value: Vec<SimpleToken>,
    value: Option<PartialFrontMatterValue>,
}

impl PartialFrontMatterRecord {
    pub fn new(
        name: FrontMatterRecordName,
        before_delimiter: Vec<SimpleToken>,
        delimiter: FrontMatterRecordDelimiter,
    ) -> Self {
        Self {
            name,
            before_delimiter,
            delimiter,
            before_value: Vec::new(),
            value: None,
        }
    }

    fn build(self, value: FrontMatterValue) -> SyntaxResult<FrontMatterRecord> {
        FrontMatterRecord::new(
            self.name,
            self.before_delimiter,
            self.delimiter,
            self.before_value,
            value,
        )
    }

    /// Empty value at `range`'s start.
    fn placeholder(range: Range) -> SyntaxResult<FrontMatterValue> {
        let sequence = FrontMatterSequence::new(vec![SimpleToken::placeholder(range)])?;
        Ok(FrontMatterValue::Sequence(sequence))
    }

    fn leaves(&self) -> Vec<SimpleToken> {
        let mut out = self.name.leaves();
        out.extend(self.before_delimiter.iter().cloned());
        self.delimiter.collect_leaves(&mut out);
        out.extend(self.before_value.iter().cloned());
        out
    }

    fn resolve(mut self, result: ParseResult<PartialFrontMatterValue, FrontMatterValue>) -> Step {
        Ok(match result {
            ParseResult::Continue { parser, consumed } => {
                self.value = Some(parser);
                ParseResult::Continue {
                    parser: FrontMatterParser::Record(self),
                    consumed,
                }
            }
            ParseResult::Done { token, consumed } => ParseResult::Done {
                token: self.build(token)?,
                consumed,
            },
            ParseResult::Failure { tokens } => {
                let mut all = self.leaves();
                all.extend(tokens);
                ParseResult::Failure { tokens: all }
            }
        })
    }

    pub fn accept(mut self, token: &SimpleToken) -> Step {
        if let Some(value) = self.value.take() {
            let result = value.accept(token)?;
            return self.resolve(result);
        }
        if is_stop(token, END_OF_LINE) {
            let value = Self::placeholder(token.range())?;
            return Ok(ParseResult::Done {
                token: self.build(value)?,
                consumed: false,
            });
        }
        if token.is_spacing() {
            self.before_value.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: FrontMatterParser::Record(self),
                consumed: true,
            });
        }
        let result = PartialFrontMatterValue::start(token, END_OF_LINE)?;
        self.resolve(result)
    }

    pub fn finish(mut self) -> SyntaxResult<Finished<FrontMatterRecord>> {
        match self.value.take() {
            Some(value) => match value.finish()? {
                Finished::Token(value) => Ok(Finished::Token(self.build(value)?)),
                Finished::Plain(tokens) => {
                    let mut all = self.leaves();
                    all.extend(tokens);
                    Ok(Finished::Plain(all))
                }
            },
            None => {
                let end = match self.before_value.last() {
                    Some(token) => token.range(),
                    None => self.delimiter.range(),
                };
                let value = Self::placeholder(end.collapse_to_end())?;
                Ok(Finished::Token(self.build(value)?))
            }
        }
    }
}
