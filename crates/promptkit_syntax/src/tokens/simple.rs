//! Leaf tokens produced by the simple codec.

use promptkit_core::lang::symbols::{self, SymbolCategory, SymbolId};

use super::{BaseToken, Range, RangeUpdate};

/// What a leaf token is: a run of word characters or a single symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleKind {
    Word(String),
    Symbol(SymbolId),
}

/// One word or one symbol, with its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleToken {
    kind: SimpleKind,
    range: Range,
}

impl SimpleToken {
    pub fn word(text: impl Into<String>, range: Range) -> Self {
        Self {
            kind: SimpleKind::Word(text.into()),
            range,
        }
    }

    pub fn symbol(id: SymbolId, range: Range) -> Self {
        Self {
            kind: SimpleKind::Symbol(id),
            range,
        }
    }

    /// Empty word at `range`'s start, used where a production needs at least one token but the source has none.
    pub fn placeholder(range: Range) -> Self {
        Self::word("", range.collapse_to_start())
    }

    pub fn kind(&self) -> &SimpleKind {
        &self.kind
    }

    pub fn symbol_id(&self) -> Option<SymbolId> {
        match self.kind {
            SimpleKind::Symbol(id) => Some(id),
            SimpleKind::Word(_) => None,
        }
    }

    /// Return `true` if this is the given symbol.
    pub fn is(&self, id: SymbolId) -> bool {
        matches!(self.kind, SimpleKind::Symbol(s) if s == id)
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, SimpleKind::Word(_))
    }

    pub fn word_text(&self) -> Option<&str> {
        match &self.kind {
            SimpleKind::Word(text) => Some(text),
            SimpleKind::Symbol(_) => None,
        }
    }

    pub fn category(&self) -> Option<SymbolCategory> {
        self.symbol_id().map(symbols::category)
    }

    /// Space, tab, vertical tab or form feed.
    pub fn is_spacing(&self) -> bool {
        self.category() == Some(SymbolCategory::Spacing)
    }

    /// New line or carriage return.
    pub fn is_line_break(&self) -> bool {
        self.category() == Some(SymbolCategory::LineBreak)
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_spacing() || self.is_line_break()
    }

    /// Same token at an edited range.
    pub fn with_range(self, update: RangeUpdate) -> Self {
        Self {
            range: self.range.with(update),
            ..self
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SimpleKind::Word(_) => "word",
            SimpleKind::Symbol(id) => symbols::name(id),
        }
    }
}

impl BaseToken for SimpleToken {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        match &self.kind {
            SimpleKind::Word(text) => buf.push_str(text),
            SimpleKind::Symbol(id) => buf.push(symbols::as_char(*id)),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.push(self.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_text_is_canonical_character() {
        let token = SimpleToken::symbol(SymbolId::LeftBracket, Range::new(1, 1, 1, 2));
        assert_eq!(token.text(), "[");
        assert!(token.is(SymbolId::LeftBracket));
        assert!(!token.is_word());
    }

    #[test]
    fn test_whitespace_predicates() {
        let tab = SimpleToken::symbol(SymbolId::Tab, Range::new(1, 1, 1, 2));
        let newline = SimpleToken::symbol(SymbolId::NewLine, Range::new(1, 2, 1, 3));
        assert!(tab.is_spacing() && !tab.is_line_break());
        assert!(newline.is_line_break() && !newline.is_spacing());
        assert!(tab.is_whitespace() && newline.is_whitespace());
    }

    #[test]
    fn test_with_range_builds_moved_copy() {
        let token = SimpleToken::word("key", Range::new(1, 1, 1, 4));
        let moved = token.clone().with_range(RangeUpdate {
            start_line: Some(2),
            end_line: Some(2),
            ..Default::default()
        });
        assert_eq!(moved.range(), Range::new(2, 1, 2, 4));
        assert_eq!(moved.text(), token.text());
    }

    #[test]
    fn test_placeholder_is_empty_and_zero_width() {
        let token = SimpleToken::placeholder(Range::new(4, 5, 4, 6));
        assert_eq!(token.text(), "");
        assert_eq!(token.range(), Range::at(4, 5));
    }
}
