//! Value parsers: dispatch on the first token, quoted strings, untyped sequences.

use promptkit_core::lang::symbols::{SymbolCategory, SymbolId};

use super::array::PartialFrontMatterArray;
use super::tokens::{FrontMatterBoolean, FrontMatterSequence, FrontMatterString, FrontMatterValue};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult, PartialParser};
use crate::tokens::SimpleToken;

/// Symbols that end a record value.
pub const END_OF_LINE: &[SymbolId] = &[SymbolId::NewLine, SymbolId::CarriageReturn, SymbolId::FormFeed];

/// Symbols that end an untyped array item. A line break ends it too, so an unclosed array fails on its own line.
pub const ARRAY_ITEM_END: &[SymbolId] = &[
    SymbolId::RightBracket,
    SymbolId::Comma,
    SymbolId::NewLine,
    SymbolId::CarriageReturn,
    SymbolId::FormFeed,
];

pub(crate) fn is_stop(token: &SimpleToken, stop: &[SymbolId]) -> bool {
    token.symbol_id().is_some_and(|id| stop.contains(&id))
}

/// Untyped run of tokens ending before a stop symbol.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterSequence {
    tokens: Vec<SimpleToken>,
    stop: &'static [SymbolId],
}

impl PartialFrontMatterSequence {
    pub fn new(first: SimpleToken, stop: &'static [SymbolId]) -> Self {
        Self {
            tokens: vec![first],
            stop,
        }
    }

    pub fn should_end(&self, token: &SimpleToken) -> bool {
        is_stop(token, self.stop)
    }
}

impl PartialParser for PartialFrontMatterSequence {
    type Output = FrontMatterSequence;

    fn accept(mut self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterSequence>> {
        if self.should_end(token) {
            return Ok(ParseResult::Done {
                token: FrontMatterSequence::new(self.tokens)?,
                consumed: false,
            });
        }
        self.tokens.push(token.clone());
        Ok(ParseResult::Continue {
            parser: self,
            consumed: true,
        })
    }

    fn finish(self) -> SyntaxResult<Finished<FrontMatterSequence>> {
        Ok(Finished::Token(FrontMatterSequence::new(self.tokens)?))
    }
}

/// Quoted string; ends at the matching quote and may not cross a line break.
#[derive(Debug, Clone)]
pub struct PartialFrontMatterString {
    tokens: Vec<SimpleToken>,
}

impl PartialFrontMatterString {
    pub fn new(quote: SimpleToken) -> Self {
        Self { tokens: vec![quote] }
    }

    fn quote(&self) -> Option<SymbolId> {
        self.tokens.first().and_then(SimpleToken::symbol_id)
    }
}

impl PartialParser for PartialFrontMatterString {
    type Output = FrontMatterString;

    fn accept(mut self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterString>> {
        if token.is_line_break() {
            return Ok(ParseResult::Failure { tokens: self.tokens });
        }
        let closes = token.symbol_id().is_some() && token.symbol_id() == self.quote();
        self.tokens.push(token.clone());
        if closes {
            return Ok(ParseResult::Done {
                token: FrontMatterString::new(self.tokens)?,
                consumed: true,
            });
        }
        Ok(ParseResult::Continue {
            parser: self,
            consumed: true,
        })
    }

    fn finish(self) -> SyntaxResult<Finished<FrontMatterString>> {
        Ok(Finished::Plain(self.tokens))
    }
}

/// Any value in progress.
#[derive(Debug, Clone)]
pub enum PartialFrontMatterValue {
    String(PartialFrontMatterString),
    Array(Box<PartialFrontMatterArray>),
    Sequence(PartialFrontMatterSequence),
}

impl PartialFrontMatterValue {
    /// Return `true` if `token` opens a typed value (string, array or boolean).
    pub fn is_value_start(token: &SimpleToken) -> bool {
        token.category() == Some(SymbolCategory::Quote)
            || token.is(SymbolId::LeftBracket)
            || FrontMatterBoolean::is_boolean_word(token)
    }

    /// Open a value at `token`: quotes start a string, `[` an array, a boolean word completes at once, and anything
    /// else starts a sequence that runs until one of `stop`.
    ///
    /// ## Errors
    /// - Propagates token construction errors.
    pub fn start(
        token: &SimpleToken,
        stop: &'static [SymbolId],
    ) -> SyntaxResult<ParseResult<Self, FrontMatterValue>> {
        let parser = if token.category() == Some(SymbolCategory::Quote) {
            PartialFrontMatterValue::String(PartialFrontMatterString::new(token.clone()))
        } else if token.is(SymbolId::LeftBracket) {
            PartialFrontMatterValue::Array(Box::new(PartialFrontMatterArray::new(token.clone())))
        } else if FrontMatterBoolean::is_boolean_word(token) {
            return Ok(ParseResult::Done {
                token: FrontMatterValue::Boolean(FrontMatterBoolean::try_from_word(token.clone())?),
                consumed: true,
            });
        } else {
            PartialFrontMatterValue::Sequence(PartialFrontMatterSequence::new(token.clone(), stop))
        };
        Ok(ParseResult::Continue {
            parser,
            consumed: true,
        })
    }
}

impl PartialParser for PartialFrontMatterValue {
    type Output = FrontMatterValue;

    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterValue>> {
        Ok(match self {
            PartialFrontMatterValue::String(parser) => parser
                .accept(token)?
                .map_parser(PartialFrontMatterValue::String)
                .map_token(FrontMatterValue::String),
            PartialFrontMatterValue::Array(parser) => parser
                .accept(token)?
                .map_parser(|parser| PartialFrontMatterValue::Array(Box::new(parser)))
                .map_token(FrontMatterValue::Array),
            PartialFrontMatterValue::Sequence(parser) => parser
                .accept(token)?
                .map_parser(PartialFrontMatterValue::Sequence)
                .map_token(FrontMatterValue::Sequence),
        })
    }

    fn finish(self) -> SyntaxResult<Finished<FrontMatterValue>> {
        Ok(match self {
            PartialFrontMatterValue::String(parser) => parser.finish()?.map(FrontMatterValue::String),
            PartialFrontMatterValue::Array(parser) => parser.finish()?.map(FrontMatterValue::Array),
            PartialFrontMatterValue::Sequence(parser) => parser.finish()?.map(FrontMatterValue::Sequence),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple_codec::tokenize;
    use crate::tokens::{BaseToken, Range};

    /// Feed `text` to a value opened on its first token; returns the first completed value.
    fn parse_value(text: &str, stop: &'static [SymbolId]) -> Option<FrontMatterValue> {
        let tokens = tokenize(text);
        let mut parser = match PartialFrontMatterValue::start(&tokens[0], stop).unwrap() {
            ParseResult::Continue { parser, .. } => parser,
            ParseResult::Done { token, .. } => return Some(token),
            ParseResult::Failure { .. } => return None,
        };
        for token in &tokens[1..] {
            parser = match parser.accept(token).unwrap() {
                ParseResult::Continue { parser, .. } => parser,
                ParseResult::Done { token, .. } => return Some(token),
                ParseResult::Failure { .. } => return None,
            };
        }
        match parser.finish().unwrap() {
            Finished::Token(token) => Some(token),
            Finished::Plain(_) => None,
        }
    }

    #[test]
    fn test_value_start_tokens() {
        let tokens = tokenize("' \" [ TRUE word ]");
        assert!(PartialFrontMatterValue::is_value_start(&tokens[0]));
        assert!(PartialFrontMatterValue::is_value_start(&tokens[2]));
        assert!(PartialFrontMatterValue::is_value_start(&tokens[4]));
        assert!(PartialFrontMatterValue::is_value_start(&tokens[6]));
        assert!(!PartialFrontMatterValue::is_value_start(&tokens[8]));
        assert!(!PartialFrontMatterValue::is_value_start(&tokens[10]));
    }

    #[test]
    fn test_string_value() {
        let value = parse_value("\"write some yaml \"", END_OF_LINE).unwrap();
        let FrontMatterValue::String(string) = &value else {
            panic!("expected a string, got {}", value.kind_name());
        };
        assert_eq!(string.clean_text(), "write some yaml ");
        assert_eq!(value.range(), Range::new(1, 1, 1, 19));
    }

    #[test]
    fn test_string_ignores_other_quote() {
        let value = parse_value("'it\"s'", END_OF_LINE).unwrap();
        assert_eq!(value.scalar_text().as_deref(), Some("it\"s"));
    }

    #[test]
    fn test_string_fails_on_line_break() {
        assert_eq!(parse_value("'abc\ndef'", END_OF_LINE), None);
    }

    #[test]
    fn test_unterminated_string_is_plain() {
        assert_eq!(parse_value("'abc", END_OF_LINE), None);
    }

    #[test]
    fn test_boolean_completes_on_first_word() {
        let value = parse_value("FALSE", END_OF_LINE).unwrap();
        assert!(matches!(value, FrontMatterValue::Boolean(ref b) if !b.value()));
    }

    #[test]
    fn test_boolean_ignores_trailing_words() {
        let tokens = tokenize("true story");
        let ParseResult::Done { token, consumed } = PartialFrontMatterValue::start(&tokens[0], END_OF_LINE).unwrap()
        else {
            panic!("a boolean word completes the value at once");
        };
        assert!(consumed);
        assert!(matches!(token, FrontMatterValue::Boolean(ref b) if b.value()));
        assert_eq!(token.range(), Range::new(1, 1, 1, 5));
    }

    #[test]
    fn test_array_item_stops_at_line_break() {
        let value = parse_value("b
mode", ARRAY_ITEM_END).unwrap();
        assert_eq!(value.text(), "b");
    }

    #[test]
    fn test_sequence_stops_before_stop_symbol() {
        let value = parse_value("some-tool  ,", ARRAY_ITEM_END).unwrap();
        assert_eq!(value.kind_name(), "FrontMatterSequence");
        assert_eq!(value.text(), "some-tool  ");
    }
}
