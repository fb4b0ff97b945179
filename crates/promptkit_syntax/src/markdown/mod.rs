//! Markdown decoder: links, images and HTML comments.
//!
//! ## Notes
//! - Link captions and references may not cross a line break; comments may.
//! - Parentheses inside a link reference must balance: `[a](x(1).md)` is one link.
//! - An unterminated comment extends to the end of the document.

mod parsers;
mod tokens;

pub use parsers::{MarkdownParser, PartialMarkdownComment, PartialMarkdownLink, PartialMarkdownLinkCaption};
pub use tokens::{COMMENT_CLOSE, COMMENT_OPEN, MarkdownComment, MarkdownImage, MarkdownLink};

use promptkit_core::lang::symbols::SymbolId;

use crate::parser_base::{Grammar, GrammarDecoder, StartContext};
use crate::tokens::{BaseToken, Range, SimpleToken, Token};

/// Tokens produced by the markdown decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownToken {
    Link(MarkdownLink),
    Image(MarkdownImage),
    Comment(MarkdownComment),
}

impl MarkdownToken {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MarkdownToken::Link(_) => "MarkdownLink",
            MarkdownToken::Image(_) => "MarkdownImage",
            MarkdownToken::Comment(_) => "MarkdownComment",
        }
    }

    /// The link of a link or an image.
    pub fn as_link(&self) -> Option<&MarkdownLink> {
        match self {
            MarkdownToken::Link(link) => Some(link),
            MarkdownToken::Image(image) => Some(image.link()),
            MarkdownToken::Comment(_) => None,
        }
    }
}

impl BaseToken for MarkdownToken {
    fn range(&self) -> Range {
        match self {
            MarkdownToken::Link(token) => token.range(),
            MarkdownToken::Image(token) => token.range(),
            MarkdownToken::Comment(token) => token.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            MarkdownToken::Link(token) => token.write_text(buf),
            MarkdownToken::Image(token) => token.write_text(buf),
            MarkdownToken::Comment(token) => token.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            MarkdownToken::Link(token) => token.collect_leaves(out),
            MarkdownToken::Image(token) => token.collect_leaves(out),
            MarkdownToken::Comment(token) => token.collect_leaves(out),
        }
    }
}

impl From<MarkdownToken> for Token {
    fn from(token: MarkdownToken) -> Self {
        Token::Markdown(token)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownGrammar;

impl Grammar for MarkdownGrammar {
    type Output = MarkdownToken;
    type Parser = MarkdownParser;

    fn start(&mut self, token: &SimpleToken, _ctx: &StartContext) -> Option<MarkdownParser> {
        match token.symbol_id()? {
            SymbolId::LeftBracket => Some(MarkdownParser::Caption(PartialMarkdownLinkCaption::link(token.clone()))),
            SymbolId::ExclamationMark => {
                Some(MarkdownParser::Caption(PartialMarkdownLinkCaption::image(token.clone())))
            }
            SymbolId::LeftAngleBracket => Some(MarkdownParser::Comment(PartialMarkdownComment::new(token.clone()))),
            _ => None,
        }
    }
}

pub type MarkdownDecoder = GrammarDecoder<MarkdownGrammar>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_base::Decoder;
    use crate::simple_codec::tokenize;
    use crate::tokens::render;

    fn decode(text: &str) -> Vec<Token> {
        MarkdownDecoder::default()
            .decode_all(tokenize(text).into_iter().map(Token::from))
            .unwrap()
    }

    fn markdown(tokens: &[Token]) -> Vec<&MarkdownToken> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Markdown(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_link_in_text() {
        let text = "See [the docs](./docs/readme.md) now.";
        let tokens = decode(text);
        assert_eq!(render(&tokens, ""), text);
        let found = markdown(&tokens);
        assert_eq!(found.len(), 1);
        let link = found[0].as_link().unwrap();
        assert_eq!(link.caption(), "the docs");
        assert_eq!(link.reference(), "./docs/readme.md");
        assert_eq!(found[0].range(), Range::new(1, 5, 1, 33));
    }

    #[test]
    fn test_image() {
        let tokens = decode("![logo](img/logo.png)");
        let found = markdown(&tokens);
        assert_eq!(found[0].kind_name(), "MarkdownImage");
        assert_eq!(found[0].as_link().unwrap().reference(), "img/logo.png");
    }

    #[test]
    fn test_exclamation_without_link_is_plain() {
        let tokens = decode("Wow! [a](b)");
        let found = markdown(&tokens);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind_name(), "MarkdownLink");
    }

    #[test]
    fn test_nested_parentheses_in_reference() {
        let tokens = decode("[a](x(1).md) tail");
        let found = markdown(&tokens);
        assert_eq!(found[0].as_link().unwrap().reference(), "x(1).md");
    }

    #[test]
    fn test_caption_without_reference_is_plain() {
        let text = "[not a link] and [a\nb](c)";
        let tokens = decode(text);
        assert!(markdown(&tokens).is_empty());
        assert_eq!(render(&tokens, ""), text);
    }

    #[test]
    fn test_bracket_restarts_caption() {
        let tokens = decode("[x [y](z)");
        let found = markdown(&tokens);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_link().unwrap().caption(), "y");
    }

    #[test]
    fn test_comment_spans_lines() {
        let tokens = decode("a <!-- one\ntwo --> b");
        let found = markdown(&tokens);
        let MarkdownToken::Comment(comment) = found[0] else {
            panic!("expected a comment");
        };
        assert_eq!(comment.body(), " one\ntwo ");
        assert_eq!(comment.range(), Range::new(1, 3, 2, 8));
    }

    #[test]
    fn test_unterminated_comment_at_end() {
        let tokens = decode("<!-- open");
        let found = markdown(&tokens);
        let MarkdownToken::Comment(comment) = found[0] else {
            panic!("expected a comment");
        };
        assert!(!comment.is_terminated());
    }

    #[test]
    fn test_angle_bracket_alone_is_plain() {
        let text = "a < b <! c";
        let tokens = decode(text);
        assert!(markdown(&tokens).is_empty());
        assert_eq!(render(&tokens, ""), text);
    }
}
