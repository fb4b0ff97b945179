//! Markdown extensions: the front-matter header envelope.
//!
//! ```text
//! header := '-'{n} '\r'? '\n'  content  '-'{n} '\r'? ('\n' | end of document)
//! ```
//!
//! ## Notes
//! - The header must start at line 1, column 1, with `n` at least the configured minimum (3 by default).
//! - The end marker needs exactly `n` dashes; any other dash line is ordinary content.
//! - An unterminated header is replayed as plain text.

mod header;
mod tokens;

pub use header::{PartialFrontMatterHeader, PartialFrontMatterStartMarker};
pub use tokens::{FrontMatterHeader, FrontMatterMarker, Text};

use promptkit_core::lang::front_matter::{MARKER_SYMBOL, MIN_MARKER_LENGTH};

use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, Grammar, GrammarDecoder, ParseResult, PartialParser, StartContext};
use crate::tokens::{BaseToken, SimpleToken, Token};

impl From<FrontMatterHeader> for Token {
    fn from(header: FrontMatterHeader) -> Self {
        Token::Header(header)
    }
}

#[derive(Debug, Clone)]
pub enum HeaderParser {
    StartMarker(PartialFrontMatterStartMarker),
    Header(PartialFrontMatterHeader),
}

impl PartialParser for HeaderParser {
    type Output = FrontMatterHeader;

    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, FrontMatterHeader>> {
        match self {
            HeaderParser::StartMarker(parser) => parser.accept(token),
            HeaderParser::Header(parser) => parser.accept(token),
        }
    }

    fn finish(self) -> SyntaxResult<Finished<FrontMatterHeader>> {
        match self {
            HeaderParser::StartMarker(parser) => parser.finish(),
            HeaderParser::Header(parser) => parser.finish(),
        }
    }
}

/// Recognizes a header at the start of the document.
#[derive(Debug, Clone, Copy)]
pub struct FrontMatterHeaderGrammar {
    min_dashes: usize,
}

impl FrontMatterHeaderGrammar {
    pub fn new(min_dashes: usize) -> Self {
        Self {
            min_dashes: min_dashes.max(1),
        }
    }
}

impl Default for FrontMatterHeaderGrammar {
    fn default() -> Self {
        Self::new(MIN_MARKER_LENGTH)
    }
}

impl Grammar for FrontMatterHeaderGrammar {
    type Output = FrontMatterHeader;
    type Parser = HeaderParser;

    fn start(&mut self, token: &SimpleToken, _ctx: &StartContext) -> Option<HeaderParser> {
        (token.is(MARKER_SYMBOL) && token.range().is_document_start()).then(|| {
            HeaderParser::StartMarker(PartialFrontMatterStartMarker::new(token.clone(), self.min_dashes))
        })
    }
}

pub type MarkdownExtensionsDecoder = GrammarDecoder<FrontMatterHeaderGrammar>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_base::Decoder;
    use crate::simple_codec::tokenize;
    use crate::tokens::{Range, render};

    fn decode(text: &str) -> Vec<Token> {
        MarkdownExtensionsDecoder::default()
            .decode_all(tokenize(text).into_iter().map(Token::from))
            .unwrap()
    }

    fn header(tokens: &[Token]) -> Option<&FrontMatterHeader> {
        tokens.iter().find_map(|t| match t {
            Token::Header(header) => Some(header),
            _ => None,
        })
    }

    #[test]
    fn test_header_with_records() {
        let text = "---\ndescription: 'Explain'\nmode: ask\n---\nBody\n";
        let tokens = decode(text);
        assert_eq!(render(&tokens, ""), text);
        let header = header(&tokens).unwrap();
        assert_eq!(header.range(), Range::new(1, 1, 4, 5));
        assert_eq!(header.content().text(), "description: 'Explain'\nmode: ask\n");
        let records = header.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].value().text(), "ask");
    }

    #[test]
    fn test_mismatched_dash_line_is_content() {
        let tokens = decode("---\nfoo: 1\n--\n---\n");
        let header = header(&tokens).unwrap();
        assert_eq!(header.content().text(), "foo: 1\n--\n");
        assert_eq!(header.end_marker().range(), Range::new(4, 1, 4, 5));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_longer_dash_line_is_content() {
        let tokens = decode("---\na: 1\n----\n---\n");
        assert_eq!(header(&tokens).unwrap().content().text(), "a: 1\n----\n");
    }

    #[test]
    fn test_end_marker_must_match_start_length() {
        let tokens = decode("-----\na: 1\n---\n-----\nrest");
        let header = header(&tokens).unwrap();
        assert_eq!(header.start_marker().dash_count(), 5);
        assert_eq!(header.content().text(), "a: 1\n---\n");
    }

    #[test]
    fn test_header_without_trailing_new_line() {
        let tokens = decode("---\na: 1\n---");
        let header = header(&tokens).unwrap();
        assert_eq!(header.end_marker().text(), "---");
    }

    #[test]
    fn test_crlf_markers() {
        let text = "---\r\na: 1\r\n---\r\nbody";
        let tokens = decode(text);
        let header = header(&tokens).unwrap();
        assert_eq!(header.end_marker().text(), "---\r\n");
        assert_eq!(header.records().unwrap().len(), 1);
        assert_eq!(render(&tokens, ""), text);
    }

    #[test]
    fn test_empty_header() {
        let tokens = decode("---\n---\n");
        let header = header(&tokens).unwrap();
        assert!(header.content().is_empty());
        assert_eq!(header.content().range(), Range::at(2, 1));
    }

    #[test]
    fn test_header_must_open_the_document() {
        let text = "\n---\na: 1\n---\n";
        let tokens = decode(text);
        assert!(header(&tokens).is_none());
        assert_eq!(render(&tokens, ""), text);
    }

    #[test]
    fn test_unterminated_header_is_plain() {
        let text = "---\na: 1\nno end";
        let tokens = decode(text);
        assert!(header(&tokens).is_none());
        assert!(tokens.iter().all(|t| t.as_simple().is_some()));
        assert_eq!(render(&tokens, ""), text);
    }

    #[test]
    fn test_short_start_marker_is_plain() {
        let tokens = decode("--\na: 1\n--\n");
        assert!(header(&tokens).is_none());
    }

    #[test]
    fn test_configured_minimum_dashes() {
        let tokens = GrammarDecoder::new(FrontMatterHeaderGrammar::new(2))
            .decode_all(tokenize("--\na: 1\n--\n").into_iter().map(Token::from))
            .unwrap();
        assert!(header(&tokens).is_some());
    }
}
