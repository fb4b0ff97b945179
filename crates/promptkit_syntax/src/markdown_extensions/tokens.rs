//! Header envelope tokens.

use promptkit_core::lang::front_matter::MARKER_SYMBOL;
use promptkit_core::lang::symbols::SymbolId;

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::front_matter::{self, FrontMatterRecord};
use crate::tokens::{BaseToken, CompositeToken, Range, SimpleToken, span};

/// A `---` line: marker dashes, an optional carriage return and (except at the end of a document) a new line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterMarker {
    inner: CompositeToken<SimpleToken>,
}

impl FrontMatterMarker {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] unless the children are dashes followed by at most `\r` and `\n`.
    pub fn new(children: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let inner = CompositeToken::new(children)?;
        let tokens = inner.children();
        let dashes = tokens.iter().take_while(|t| t.is(MARKER_SYMBOL)).count();
        let rest = &tokens[dashes..];
        let valid_tail = match rest {
            [] => true,
            [a] => a.is(SymbolId::NewLine) || a.is(SymbolId::CarriageReturn),
            [a, b] => a.is(SymbolId::CarriageReturn) && b.is(SymbolId::NewLine),
            _ => false,
        };
        if dashes == 0 || !valid_tail {
            return Err(SyntaxError::InvalidToken {
                token: "FrontMatterMarker",
                range: inner.range(),
                reason: "a marker is a run of dashes ending the line",
            });
        }
        Ok(Self { inner })
    }

    pub fn dash_count(&self) -> usize {
        self.inner.children().iter().take_while(|t| t.is(MARKER_SYMBOL)).count()
    }
}

impl BaseToken for FrontMatterMarker {
    fn range(&self) -> Range {
        self.inner.range()
    }

    fn write_text(&self, buf: &mut String) {
        self.inner.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        self.inner.collect_leaves(out);
    }
}

/// Opaque run of tokens; may be empty, in which case it sits at a zero-width range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    tokens: Vec<SimpleToken>,
    range: Range,
}

impl Text {
    /// Build a text; `empty_at` positions an empty one.
    ///
    /// ## Errors
    /// - Same as [`crate::tokens::full_range`] for a non-empty token list.
    pub fn new(tokens: Vec<SimpleToken>, empty_at: Range) -> SyntaxResult<Self> {
        let range = if tokens.is_empty() {
            empty_at.collapse_to_start()
        } else {
            crate::tokens::full_range(&tokens)?
        };
        Ok(Self { tokens, range })
    }

    pub fn tokens(&self) -> &[SimpleToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl BaseToken for Text {
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

/// Front-matter header: start marker, raw content, end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterHeader {
    start_marker: FrontMatterMarker,
    content: Text,
    end_marker: FrontMatterMarker,
    range: Range,
}

impl FrontMatterHeader {
    /// ## Errors
    /// - [`SyntaxError::MisorderedTokens`] if the end marker does not follow the start marker.
    pub fn new(start_marker: FrontMatterMarker, content: Text, end_marker: FrontMatterMarker) -> SyntaxResult<Self> {
        let range = span(start_marker.range(), end_marker.range())?;
        Ok(Self {
            start_marker,
            content,
            end_marker,
            range,
        })
    }

    pub fn start_marker(&self) -> &FrontMatterMarker {
        &self.start_marker
    }

    pub fn content(&self) -> &Text {
        &self.content
    }

    pub fn end_marker(&self) -> &FrontMatterMarker {
        &self.end_marker
    }

    /// Run the front-matter grammar over the content.
    ///
    /// ## Errors
    /// - Propagates contract violations from the grammar.
    pub fn records(&self) -> SyntaxResult<Vec<FrontMatterRecord>> {
        let tokens = front_matter::decode(self.content.tokens.clone())?;
        Ok(front_matter::records(&tokens).cloned().collect())
    }
}

impl BaseToken for FrontMatterHeader {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.start_marker.write_text(buf);
        self.content.write_text(buf);
        self.end_marker.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        self.start_marker.collect_leaves(out);
        self.content.collect_leaves(out);
        self.end_marker.collect_leaves(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple_codec::tokenize;

    #[test]
    fn test_marker_shapes() {
        assert_eq!(FrontMatterMarker::new(tokenize("---\n")).unwrap().dash_count(), 3);
        assert_eq!(FrontMatterMarker::new(tokenize("-----\r\n")).unwrap().dash_count(), 5);
        assert!(FrontMatterMarker::new(tokenize("---")).is_ok());
        assert!(FrontMatterMarker::new(tokenize("--- \n")).is_err());
        assert!(FrontMatterMarker::new(tokenize("\n")).is_err());
    }

    #[test]
    fn test_empty_text_is_zero_width() {
        let text = Text::new(Vec::new(), Range::new(2, 1, 2, 4)).unwrap();
        assert!(text.is_empty());
        assert_eq!(text.range(), Range::at(2, 1));
        assert_eq!(text.text(), "");
    }
}
