//! Front-matter value and record tokens.

use promptkit_core::lang::front_matter;
use promptkit_core::lang::symbols::{SymbolCategory, SymbolId};

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::tokens::{BaseToken, CompositeToken, Range, SimpleToken, render, span};

/// `true` or `false`, in any letter case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterBoolean {
    word: SimpleToken,
    value: bool,
}

impl FrontMatterBoolean {
    /// Build a boolean from a single word.
    ///
    /// ## Errors
    /// - [`SyntaxError::NotABoolean`] unless the word is exactly `true` or `false` (case-insensitive).
    pub fn try_from_word(word: SimpleToken) -> SyntaxResult<Self> {
        let value = word.word_text().and_then(front_matter::parse_boolean);
        match value {
            Some(value) => Ok(Self { word, value }),
            None => Err(SyntaxError::NotABoolean {
                text: word.text(),
                range: word.range(),
            }),
        }
    }

    /// Return `true` if `token` is a word that would build a boolean.
    pub fn is_boolean_word(token: &SimpleToken) -> bool {
        token.word_text().and_then(front_matter::parse_boolean).is_some()
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl BaseToken for FrontMatterBoolean {
    fn range(&self) -> Range {
        self.word.range()
    }

    fn write_text(&self, buf: &mut String) {
        self.word.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.push(self.word.clone());
    }
}

/// A quoted string; children include both quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterString {
    inner: CompositeToken<SimpleToken>,
}

impl FrontMatterString {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] unless the children open and close with the same quote symbol.
    pub fn new(children: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let inner = CompositeToken::new(children)?;
        let tokens = inner.children();
        let quoted = match (tokens.first().and_then(SimpleToken::category), tokens.last()) {
            (Some(SymbolCategory::Quote), Some(last)) if tokens.len() >= 2 => {
                tokens[0].symbol_id() == last.symbol_id()
            }
            _ => false,
        };
        if !quoted {
            return Err(SyntaxError::InvalidToken {
                token: "FrontMatterString",
                range: inner.range(),
                reason: "a string must open and close with the same quote",
            });
        }
        Ok(Self { inner })
    }

    /// Text between the quotes.
    pub fn clean_text(&self) -> String {
        let tokens = self.inner.children();
        render(&tokens[1..tokens.len() - 1], "")
    }

    pub fn quote(&self) -> Option<SymbolId> {
        self.inner.children().first().and_then(SimpleToken::symbol_id)
    }
}

impl BaseToken for FrontMatterString {
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

/// An untyped run of tokens (an unquoted scalar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterSequence {
    inner: CompositeToken<SimpleToken>,
}

impl FrontMatterSequence {
    /// ## Errors
    /// - Same as [`CompositeToken::new`].
    pub fn new(children: Vec<SimpleToken>) -> SyntaxResult<Self> {
        Ok(Self {
            inner: CompositeToken::new(children)?,
        })
    }

    pub fn children(&self) -> &[SimpleToken] {
        self.inner.children()
    }

    /// Split off trailing whitespace, returning the trimmed sequence and the removed tokens in source order.
    ///
    /// The first token is always kept so the sequence never becomes empty.
    ///
    /// ## Errors
    /// - Same as [`CompositeToken::new`].
    pub fn trim_end(self) -> SyntaxResult<(Self, Vec<SimpleToken>)> {
        let mut children = self.inner.into_children();
        let keep = children
            .iter()
            .rposition(|token| !token.is_whitespace())
            .map_or(1, |index| index + 1);
        let trailing = children.split_off(keep);
        Ok((Self::new(children)?, trailing))
    }

    /// Text with surrounding whitespace removed.
    pub fn clean_text(&self) -> String {
        self.text().trim().to_string()
    }
}

impl BaseToken for FrontMatterSequence {
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

/// One child of an array: a value or the punctuation and whitespace around values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayElement {
    Value(FrontMatterValue),
    Plain(SimpleToken),
}

impl BaseToken for ArrayElement {
    fn range(&self) -> Range {
        match self {
            ArrayElement::Value(value) => value.range(),
            ArrayElement::Plain(token) => token.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            ArrayElement::Value(value) => value.write_text(buf),
            ArrayElement::Plain(token) => token.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            ArrayElement::Value(value) => value.collect_leaves(out),
            ArrayElement::Plain(token) => token.collect_leaves(out),
        }
    }
}

/// `[ item, item, ... ]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterArray {
    inner: CompositeToken<ArrayElement>,
}

impl FrontMatterArray {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] unless the children open with `[` and close with `]`.
    pub fn new(children: Vec<ArrayElement>) -> SyntaxResult<Self> {
        let inner = CompositeToken::new(children)?;
        let is = |element: Option<&ArrayElement>, id| matches!(element, Some(ArrayElement::Plain(t)) if t.is(id));
        let children = inner.children();
        if children.len() < 2
            || !is(children.first(), SymbolId::LeftBracket)
            || !is(children.last(), SymbolId::RightBracket)
        {
            return Err(SyntaxError::InvalidToken {
                token: "FrontMatterArray",
                range: inner.range(),
                reason: "an array must be enclosed in `[` and `]`",
            });
        }
        Ok(Self { inner })
    }

    /// Value items in order; commas, brackets and whitespace are skipped.
    pub fn items(&self) -> impl Iterator<Item = &FrontMatterValue> {
        self.inner.children().iter().filter_map(|element| match element {
            ArrayElement::Value(value) => Some(value),
            ArrayElement::Plain(_) => None,
        })
    }
}

impl BaseToken for FrontMatterArray {
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

/// Any front-matter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterValue {
    Boolean(FrontMatterBoolean),
    String(FrontMatterString),
    Array(FrontMatterArray),
    Sequence(FrontMatterSequence),
}

impl FrontMatterValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FrontMatterValue::Boolean(_) => "FrontMatterBoolean",
            FrontMatterValue::String(_) => "FrontMatterString",
            FrontMatterValue::Array(_) => "FrontMatterArray",
            FrontMatterValue::Sequence(_) => "FrontMatterSequence",
        }
    }

    /// Scalar text: string contents without quotes, a sequence without surrounding whitespace, a boolean as written.
    /// Arrays have no scalar text.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            FrontMatterValue::Boolean(value) => Some(value.text()),
            FrontMatterValue::String(value) => Some(value.clean_text()),
            FrontMatterValue::Sequence(value) => Some(value.clean_text()),
            FrontMatterValue::Array(_) => None,
        }
    }
}

impl BaseToken for FrontMatterValue {
    fn range(&self) -> Range {
        match self {
            FrontMatterValue::Boolean(value) => value.range(),
            FrontMatterValue::String(value) => value.range(),
            FrontMatterValue::Array(value) => value.range(),
            FrontMatterValue::Sequence(value) => value.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            FrontMatterValue::Boolean(value) => value.write_text(buf),
            FrontMatterValue::String(value) => value.write_text(buf),
            FrontMatterValue::Array(value) => value.write_text(buf),
            FrontMatterValue::Sequence(value) => value.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            FrontMatterValue::Boolean(value) => value.collect_leaves(out),
            FrontMatterValue::String(value) => value.collect_leaves(out),
            FrontMatterValue::Array(value) => value.collect_leaves(out),
            FrontMatterValue::Sequence(value) => value.collect_leaves(out),
        }
    }
}

/// Record name: words and dashes, e.g. `apply-to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterRecordName {
    inner: CompositeToken<SimpleToken>,
}

impl FrontMatterRecordName {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if a child is neither a word nor a dash.
    pub fn new(children: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let inner = CompositeToken::new(children)?;
        if !inner.children().iter().all(is_name_token) {
            return Err(SyntaxError::InvalidToken {
                token: "FrontMatterRecordName",
                range: inner.range(),
                reason: "record names may only contain words and dashes",
            });
        }
        Ok(Self { inner })
    }

    pub fn name(&self) -> String {
        self.text()
    }
}

pub(crate) fn is_name_token(token: &SimpleToken) -> bool {
    token.is_word() || token.is(SymbolId::Dash)
}

impl BaseToken for FrontMatterRecordName {
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

/// `:` followed by one spacing token, or a bare `:` right before a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterRecordDelimiter {
    colon: SimpleToken,
    spacing: Option<SimpleToken>,
    range: Range,
}

impl FrontMatterRecordDelimiter {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `colon` is not a colon or `spacing` is not a spacing token.
    /// - [`SyntaxError::MisorderedTokens`] if `spacing` does not follow `colon`.
    pub fn new(colon: SimpleToken, spacing: Option<SimpleToken>) -> SyntaxResult<Self> {
        let valid_spacing = spacing.as_ref().is_none_or(SimpleToken::is_spacing);
        if !colon.is(SymbolId::Colon) || !valid_spacing {
            return Err(SyntaxError::InvalidToken {
                token: "FrontMatterRecordDelimiter",
                range: colon.range(),
                reason: "a delimiter is a colon followed by spacing",
            });
        }
        let range = match &spacing {
            Some(spacing) => span(colon.range(), spacing.range())?,
            None => colon.range(),
        };
        Ok(Self { colon, spacing, range })
    }
}

impl BaseToken for FrontMatterRecordDelimiter {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.colon.write_text(buf);
        if let Some(spacing) = &self.spacing {
            spacing.write_text(buf);
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.push(self.colon.clone());
        out.extend(self.spacing.iter().cloned());
    }
}

/// `name: value`, keeping the whitespace between the parts so the text round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterRecord {
    name: FrontMatterRecordName,
    before_delimiter: Vec<SimpleToken>,
    delimiter: FrontMatterRecordDelimiter,
    before_value: Vec<SimpleToken>,
    value: FrontMatterValue,
    range: Range,
}

impl FrontMatterRecord {
    /// ## Errors
    /// - [`SyntaxError::MisorderedTokens`] if the value does not follow the name.
    pub fn new(
        name: FrontMatterRecordName,
        before_delimiter: Vec<SimpleToken>,
        delimiter: FrontMatterRecordDelimiter,
        before_value: Vec<SimpleToken>,
        value: FrontMatterValue,
    ) -> SyntaxResult<Self> {
        let range = span(name.range(), value.range())?;
        Ok(Self {
            name,
            before_delimiter,
            delimiter,
            before_value,
            value,
            range,
        })
    }

    pub fn name(&self) -> &FrontMatterRecordName {
        &self.name
    }

    pub fn delimiter(&self) -> &FrontMatterRecordDelimiter {
        &self.delimiter
    }

    pub fn value(&self) -> &FrontMatterValue {
        &self.value
    }

    pub fn name_text(&self) -> String {
        self.name.name()
    }
}

impl BaseToken for FrontMatterRecord {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        self.name.write_text(buf);
        self.before_delimiter.iter().for_each(|t| t.write_text(buf));
        self.delimiter.write_text(buf);
        self.before_value.iter().for_each(|t| t.write_text(buf));
        self.value.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        self.name.collect_leaves(out);
        out.extend(self.before_delimiter.iter().cloned());
        self.delimiter.collect_leaves(out);
        out.extend(self.before_value.iter().cloned());
        self.value.collect_leaves(out);
    }
}
