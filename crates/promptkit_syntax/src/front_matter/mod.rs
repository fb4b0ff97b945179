//! Front-matter grammar: YAML-like `name: value` records.
//!
//! ```text
//! record   := name spacing* ':' spacing value-or-empty
//! name     := (word | '-')+
//! value    := string | array | boolean | sequence
//! string   := quote (any but line break)* quote          (same quote on both ends)
//! array    := '[' (whitespace | ',' | value)* ']'          (redundant commas skipped)
//! boolean  := 'true' | 'false'                            (any letter case, whole word)
//! sequence := any token up to a stop symbol               (end of line, or `]`/`,` inside arrays)
//! ```
//!
//! ## Notes
//! - A record starts at a word in column 1; everything else passes through as plain tokens.
//! - `key:` followed directly by a line break produces a record whose value is an empty zero-width sequence.
//! - Rejected records are replayed as plain tokens; they never abort decoding.

mod array;
mod record;
mod tokens;
mod value;

pub use array::PartialFrontMatterArray;
pub use record::{PartialFrontMatterRecord, PartialFrontMatterRecordName, PartialFrontMatterRecordNameWithDelimiter};
pub use tokens::{
    ArrayElement, FrontMatterArray, FrontMatterBoolean, FrontMatterRecord, FrontMatterRecordDelimiter,
    FrontMatterRecordName, FrontMatterSequence, FrontMatterString, FrontMatterValue,
};
pub use value::{
    ARRAY_ITEM_END, END_OF_LINE, PartialFrontMatterSequence, PartialFrontMatterString, PartialFrontMatterValue,
};

use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Decoder, Finished, Grammar, GrammarDecoder, ParseResult, PartialParser, StartContext};
use crate::tokens::{BaseToken, Range, SimpleToken, Token};

/// Tokens produced by the front-matter grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterToken {
    Record(FrontMatterRecord),
    Value(FrontMatterValue),
}

impl FrontMatterToken {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FrontMatterToken::Record(_) => "FrontMatterRecord",
            FrontMatterToken::Value(value) => value.kind_name(),
        }
    }
}

impl BaseToken for FrontMatterToken {
    fn range(&self) -> Range {
        match self {
            FrontMatterToken::Record(token) => token.range(),
            FrontMatterToken::Value(token) => token.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            FrontMatterToken::Record(token) => token.write_text(buf),
            FrontMatterToken::Value(token) => token.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            FrontMatterToken::Record(token) => token.collect_leaves(out),
            FrontMatterToken::Value(token) => token.collect_leaves(out),
        }
    }
}

impl From<FrontMatterRecord> for Token {
    fn from(record: FrontMatterRecord) -> Self {
        Token::FrontMatter(FrontMatterToken::Record(record))
    }
}

/// The record production in whichever stage it currently is.
#[derive(Debug, Clone)]
pub enum FrontMatterParser {
    Name(PartialFrontMatterRecordName),
    NameWithDelimiter(PartialFrontMatterRecordNameWithDelimiter),
    Record(PartialFrontMatterRecord),
}

impl PartialParser for FrontMatterParser {
    type Output = FrontMatterRecord;

    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterRecord>> {
        match self {
            FrontMatterParser::Name(parser) => parser.accept(token),
            FrontMatterParser::NameWithDelimiter(parser) => parser.accept(token),
            FrontMatterParser::Record(parser) => parser.accept(token),
        }
    }

    fn finish(self) -> SyntaxResult<Finished<FrontMatterRecord>> {
        match self {
            FrontMatterParser::Name(parser) => parser.finish(),
            FrontMatterParser::NameWithDelimiter(parser) => parser.finish(),
            FrontMatterParser::Record(parser) => parser.finish(),
        }
    }
}

/// Starts a record at a line-initial word.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatterGrammar;

impl Grammar for FrontMatterGrammar {
    type Output = FrontMatterRecord;
    type Parser = FrontMatterParser;

    fn start(&mut self, token: &SimpleToken, _ctx: &StartContext) -> Option<FrontMatterParser> {
        (token.is_word() && token.range().start_column == 1)
            .then(|| FrontMatterParser::Name(PartialFrontMatterRecordName::new(token.clone())))
    }
}

pub type FrontMatterDecoder = GrammarDecoder<FrontMatterGrammar>;

/// Decode front-matter content into records and plain tokens.
///
/// ## Errors
/// - Propagates contract violations from the grammar (never raised for malformed input).
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn decode(tokens: Vec<SimpleToken>) -> SyntaxResult<Vec<Token>> {
    FrontMatterDecoder::default().decode_all(tokens.into_iter().map(Token::from))
}

/// Records among decoded tokens.
pub fn records(tokens: &[Token]) -> impl Iterator<Item = &FrontMatterRecord> {
    tokens.iter().filter_map(|token| match token {
        Token::FrontMatter(FrontMatterToken::Record(record)) => Some(record),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple_codec::tokenize;
    use crate::tokens::render;

    fn decode_text(text: &str) -> Vec<Token> {
        decode(tokenize(text)).unwrap()
    }

    fn only_record(text: &str) -> FrontMatterRecord {
        let tokens = decode_text(text);
        let found: Vec<_> = records(&tokens).cloned().collect();
        assert_eq!(found.len(), 1, "expected one record in {text:?}");
        found.into_iter().next().unwrap()
    }

    #[test]
    fn test_simple_record() {
        let record = only_record("description: hello world\n");
        assert_eq!(record.name_text(), "description");
        assert_eq!(record.delimiter().text(), ": ");
        assert_eq!(record.value().kind_name(), "FrontMatterSequence");
        assert_eq!(record.value().text(), "hello world");
        assert_eq!(record.range(), Range::new(1, 1, 1, 25));
    }

    #[test]
    fn test_spacing_before_delimiter_round_trips() {
        let text = "anotherField \t\t\t  :  FALSE ";
        let tokens = decode_text(text);
        assert_eq!(render(&tokens, ""), text);
        let record = only_record(text);
        assert_eq!(record.delimiter().range(), Range::new(1, 19, 1, 21));
        assert!(matches!(record.value(), FrontMatterValue::Boolean(b) if !b.value()));
        assert_eq!(record.value().range(), Range::new(1, 22, 1, 27));
    }

    #[test]
    fn test_empty_value_gets_placeholder() {
        let record = only_record("key:\nnext line");
        assert_eq!(record.value().text(), "");
        assert_eq!(record.value().range(), Range::at(1, 5));
        assert_eq!(record.range(), Range::new(1, 1, 1, 5));
        assert_eq!(record.delimiter().text(), ":");
    }

    #[test]
    fn test_empty_value_at_end_of_stream() {
        let record = only_record("key: ");
        assert_eq!(record.value().text(), "");
        assert_eq!(record.value().range(), Range::at(1, 6));
        let record = only_record("key:");
        assert_eq!(record.value().range(), Range::at(1, 5));
    }

    #[test]
    fn test_colon_must_be_followed_by_spacing() {
        let tokens = decode_text("key:value\n");
        assert_eq!(records(&tokens).count(), 0);
        assert!(tokens.iter().all(|t| t.as_simple().is_some()));
        assert_eq!(render(&tokens, ""), "key:value\n");
    }

    #[test]
    fn test_record_needs_line_start() {
        let tokens = decode_text(" key: value");
        assert_eq!(records(&tokens).count(), 0);
    }

    #[test]
    fn test_name_with_symbols_is_rejected() {
        let tokens = decode_text("a.b: c\nok: yes\n");
        let names: Vec<_> = records(&tokens).map(FrontMatterRecord::name_text).collect();
        assert_eq!(names, vec!["a.b".to_string(), "ok".to_string()]);
        let tokens = decode_text("a#b: c\n");
        assert_eq!(records(&tokens).count(), 0);
        assert_eq!(render(&tokens, ""), "a#b: c\n");
    }

    #[test]
    fn test_unterminated_string_value_is_replayed() {
        let text = "key: 'open\nnext: 1\n";
        let tokens = decode_text(text);
        let names: Vec<_> = records(&tokens).map(FrontMatterRecord::name_text).collect();
        assert_eq!(names, vec!["next".to_string()]);
        assert_eq!(render(&tokens, ""), text);
    }

    #[test]
    fn test_multiple_records_with_crlf() {
        let tokens = decode_text("a: 1\r\nb: [x]\r\n");
        let found: Vec<_> = records(&tokens).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value().text(), "1");
        assert_eq!(found[1].value().kind_name(), "FrontMatterArray");
    }
}
