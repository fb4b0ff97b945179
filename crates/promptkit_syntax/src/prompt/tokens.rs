//! Chat-prompt reference tokens.

use promptkit_core::lang::prompt::{self, FILE_VARIABLE, ReferenceKind};
use promptkit_core::lang::symbols::SymbolId;

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::tokens::{BaseToken, Range, SimpleToken, full_range, render, span};

/// Range from `trigger` to the last token of `rest`, rejecting an empty `rest`.
fn trigger_span(
    token: &'static str,
    trigger: &SimpleToken,
    kind: ReferenceKind,
    rest: &[SimpleToken],
) -> SyntaxResult<Range> {
    if !trigger.is(prompt::trigger(kind)) {
        return Err(SyntaxError::InvalidToken {
            token,
            range: trigger.range(),
            reason: "reference does not start with its trigger symbol",
        });
    }
    match rest.last() {
        Some(last) => span(trigger.range(), last.range()),
        None => Err(SyntaxError::InvalidToken {
            token,
            range: trigger.range(),
            reason: "reference name is empty",
        }),
    }
}

fn write_all<'a>(tokens: impl IntoIterator<Item = &'a SimpleToken>, buf: &mut String) {
    tokens.into_iter().for_each(|t| t.write_text(buf));
}

/// `#name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    hash: SimpleToken,
    name: Vec<SimpleToken>,
    range: Range,
}

impl PromptVariable {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `hash` is not `#` or `name` is empty.
    pub fn new(hash: SimpleToken, name: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let range = trigger_span("PromptVariable", &hash, ReferenceKind::Variable, &name)?;
        Ok(Self { hash, name, range })
    }

    pub fn name(&self) -> String {
        render(&self.name, "")
    }

    fn parts(&self) -> impl Iterator<Item = &SimpleToken> {
        std::iter::once(&self.hash).chain(&self.name)
    }
}

impl BaseToken for PromptVariable {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        write_all(self.parts(), buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.parts().cloned());
    }
}

/// `#name:data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariableWithData {
    hash: SimpleToken,
    name: Vec<SimpleToken>,
    colon: SimpleToken,
    data: Vec<SimpleToken>,
    range: Range,
}

impl PromptVariableWithData {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `hash` is not `#`, `colon` is not `:`, or the name or data is empty.
    pub fn new(
        hash: SimpleToken,
        name: Vec<SimpleToken>,
        colon: SimpleToken,
        data: Vec<SimpleToken>,
    ) -> SyntaxResult<Self> {
        trigger_span("PromptVariableWithData", &hash, ReferenceKind::Variable, &name)?;
        let range = trigger_span("PromptVariableWithData", &hash, ReferenceKind::Variable, &data)?;
        if !colon.is(SymbolId::Colon) {
            return Err(SyntaxError::InvalidToken {
                token: "PromptVariableWithData",
                range: colon.range(),
                reason: "name and data must be separated by a colon",
            });
        }
        Ok(Self {
            hash,
            name,
            colon,
            data,
            range,
        })
    }

    pub fn name(&self) -> String {
        render(&self.name, "")
    }

    pub fn data(&self) -> String {
        render(&self.data, "")
    }

    pub fn data_range(&self) -> SyntaxResult<Range> {
        full_range(&self.data)
    }

    fn parts(&self) -> impl Iterator<Item = &SimpleToken> {
        std::iter::once(&self.hash)
            .chain(&self.name)
            .chain(std::iter::once(&self.colon))
            .chain(&self.data)
    }
}

impl BaseToken for PromptVariableWithData {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        write_all(self.parts(), buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.parts().cloned());
    }
}

/// `#file:path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    variable: PromptVariableWithData,
}

impl FileReference {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if the variable is not named `file`.
    pub fn new(variable: PromptVariableWithData) -> SyntaxResult<Self> {
        if variable.name() != FILE_VARIABLE {
            return Err(SyntaxError::InvalidToken {
                token: "FileReference",
                range: variable.range(),
                reason: "file references use the `file` variable",
            });
        }
        Ok(Self { variable })
    }

    pub fn path(&self) -> String {
        self.variable.data()
    }

    /// ## Errors
    /// - Never for a constructed reference; the path is non-empty.
    pub fn path_range(&self) -> SyntaxResult<Range> {
        self.variable.data_range()
    }
}

impl BaseToken for FileReference {
    fn range(&self) -> Range {
        self.variable.range()
    }

    fn write_text(&self, buf: &mut String) {
        self.variable.write_text(buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        self.variable.collect_leaves(out);
    }
}

/// `@name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAtMention {
    at: SimpleToken,
    name: Vec<SimpleToken>,
    range: Range,
}

impl PromptAtMention {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `at` is not `@` or `name` is empty.
    pub fn new(at: SimpleToken, name: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let range = trigger_span("PromptAtMention", &at, ReferenceKind::AtMention, &name)?;
        Ok(Self { at, name, range })
    }

    pub fn name(&self) -> String {
        render(&self.name, "")
    }

    fn parts(&self) -> impl Iterator<Item = &SimpleToken> {
        std::iter::once(&self.at).chain(&self.name)
    }
}

impl BaseToken for PromptAtMention {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        write_all(self.parts(), buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.parts().cloned());
    }
}

/// `/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSlashCommand {
    slash: SimpleToken,
    name: Vec<SimpleToken>,
    range: Range,
}

impl PromptSlashCommand {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] if `slash` is not `/` or `name` is empty.
    pub fn new(slash: SimpleToken, name: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let range = trigger_span("PromptSlashCommand", &slash, ReferenceKind::SlashCommand, &name)?;
        Ok(Self { slash, name, range })
    }

    pub fn name(&self) -> String {
        render(&self.name, "")
    }

    fn parts(&self) -> impl Iterator<Item = &SimpleToken> {
        std::iter::once(&self.slash).chain(&self.name)
    }
}

impl BaseToken for PromptSlashCommand {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        write_all(self.parts(), buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.parts().cloned());
    }
}

/// `${content}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplateVariable {
    tokens: Vec<SimpleToken>,
    range: Range,
}

impl PromptTemplateVariable {
    /// ## Errors
    /// - [`SyntaxError::InvalidToken`] unless `tokens` are `$`, `{`, at least one content token and `}`.
    pub fn new(tokens: Vec<SimpleToken>) -> SyntaxResult<Self> {
        let range = full_range(&tokens)?;
        let shaped = tokens.len() > 3
            && tokens[0].is(SymbolId::DollarSign)
            && tokens[1].is(SymbolId::LeftCurlyBrace)
            && tokens[tokens.len() - 1].is(SymbolId::RightCurlyBrace);
        if !shaped {
            return Err(SyntaxError::InvalidToken {
                token: "PromptTemplateVariable",
                range,
                reason: "a template variable is `${name}` with a non-empty name",
            });
        }
        Ok(Self { tokens, range })
    }

    /// Text between the braces.
    pub fn content(&self) -> String {
        render(&self.tokens[2..self.tokens.len() - 1], "")
    }
}

impl BaseToken for PromptTemplateVariable {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        write_all(&self.tokens, buf);
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        out.extend(self.tokens.iter().cloned());
    }
}
