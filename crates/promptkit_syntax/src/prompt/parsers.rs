//! Chat-prompt partial parsers.

use promptkit_core::lang::prompt::{self, FILE_VARIABLE, ReferenceKind};
use promptkit_core::lang::symbols::SymbolId;

use super::PromptToken;
use super::tokens::{
    FileReference, PromptAtMention, PromptSlashCommand, PromptTemplateVariable, PromptVariable,
    PromptVariableWithData,
};
use crate::diagnostics::SyntaxResult;
use crate::parser_base::{Finished, ParseResult, PartialParser};
use crate::tokens::{SimpleToken, render};

/// `#name`, `#name:data`, `@name` or `/name`; ends at whitespace or a stop symbol such as `,` or `)`.
#[derive(Debug, Clone)]
pub struct PartialPromptReference {
    kind: ReferenceKind,
    tokens: Vec<SimpleToken>,
    /// Index of the `:` separating a variable's name from its data.
    colon: Option<usize>,
}

impl PartialPromptReference {
    pub fn new(kind: ReferenceKind, trigger: SimpleToken) -> Self {
        Self {
            kind,
            tokens: vec![trigger],
            colon: None,
        }
    }

    fn is_invalid(&self, id: SymbolId) -> bool {
        match self.colon {
            Some(_) => prompt::is_invalid_in_variable_data(id),
            None => prompt::is_invalid_in_name(self.kind, id),
        }
    }

    /// Convert the collected tokens into a reference, or `None` if the name (or data) is empty.
    pub fn as_prompt_token(&self) -> SyntaxResult<Option<PromptToken>> {
        let trigger = self.tokens[0].clone();
        let name_end = self.colon.unwrap_or(self.tokens.len());
        let name = self.tokens[1..name_end].to_vec();
        if name.is_empty() {
            return Ok(None);
        }
        let token = match (self.kind, self.colon) {
            (ReferenceKind::Variable, None) => PromptToken::Variable(PromptVariable::new(trigger, name)?),
            (ReferenceKind::Variable, Some(colon)) => {
                let data = self.tokens[colon + 1..].to_vec();
                if data.is_empty() {
                    return Ok(None);
                }
                let is_file = render(&name, "") == FILE_VARIABLE;
                let variable = PromptVariableWithData::new(trigger, name, self.tokens[colon].clone(), data)?;
                if is_file {
                    PromptToken::FileReference(FileReference::new(variable)?)
                } else {
                    PromptToken::VariableWithData(variable)
                }
            }
            (ReferenceKind::AtMention, _) => PromptToken::AtMention(PromptAtMention::new(trigger, name)?),
            (ReferenceKind::SlashCommand, _) => PromptToken::SlashCommand(PromptSlashCommand::new(trigger, name)?),
            (ReferenceKind::Template, _) => return Ok(None),
        };
        Ok(Some(token))
    }

    fn ends_at(&self, token: &SimpleToken) -> bool {
        let info = prompt::info_for(self.kind);
        (token.is_whitespace() && info.stops_at_whitespace)
            || token.symbol_id().is_some_and(|id| prompt::is_stop_symbol(self.kind, id))
    }

    pub fn accept(mut self, token: &SimpleToken) -> SyntaxResult<ParseResult<PromptParser, PromptToken>> {
        if self.ends_at(token) {
            return Ok(match self.as_prompt_token()? {
                Some(reference) => ParseResult::Done {
                    token: reference,
                    consumed: false,
                },
                None => ParseResult::Failure { tokens: self.tokens },
            });
        }
        if let Some(id) = token.symbol_id() {
            let separator = self.kind == ReferenceKind::Variable && self.colon.is_none() && id == SymbolId::Colon;
            if separator && self.tokens.len() == 1 {
                return Ok(ParseResult::Failure { tokens: self.tokens });
            }
            if separator {
                self.colon = Some(self.tokens.len());
            } else if self.is_invalid(id) {
                return Ok(ParseResult::Failure { tokens: self.tokens });
            }
        }
        self.tokens.push(token.clone());
        Ok(ParseResult::Continue {
            parser: PromptParser::Reference(self),
            consumed: true,
        })
    }

    pub fn finish(self) -> SyntaxResult<Finished<PromptToken>> {
        Ok(match self.as_prompt_token()? {
            Some(reference) => Finished::Token(reference),
            None => Finished::Plain(self.tokens),
        })
    }
}

/// `${` content `}`.
#[derive(Debug, Clone)]
pub struct PartialPromptTemplateVariable {
    tokens: Vec<SimpleToken>,
}

impl PartialPromptTemplateVariable {
    pub fn new(dollar: SimpleToken) -> Self {
        Self { tokens: vec![dollar] }
    }

    pub fn accept(mut self, token: &SimpleToken) -> SyntaxResult<ParseResult<PromptParser, PromptToken>> {
        if self.tokens.len() == 1 {
            if !token.is(SymbolId::LeftCurlyBrace) {
                return Ok(ParseResult::Failure { tokens: self.tokens });
            }
            self.tokens.push(token.clone());
            return Ok(ParseResult::Continue {
                parser: PromptParser::Template(self),
                consumed: true,
            });
        }
        if token.is(SymbolId::RightCurlyBrace) {
            if self.tokens.len() == 2 {
                return Ok(ParseResult::Failure { tokens: self.tokens });
            }
            self.tokens.push(token.clone());
            return Ok(ParseResult::Done {
                token: PromptToken::TemplateVariable(PromptTemplateVariable::new(self.tokens)?),
                consumed: true,
            });
        }
        let invalid = token
            .symbol_id()
            .is_some_and(|id| prompt::is_invalid_in_name(ReferenceKind::Template, id));
        if invalid {
            return Ok(ParseResult::Failure { tokens: self.tokens });
        }
        self.tokens.push(token.clone());
        Ok(ParseResult::Continue {
            parser: PromptParser::Template(self),
            consumed: true,
        })
    }

    pub fn finish(self) -> SyntaxResult<Finished<PromptToken>> {
        Ok(Finished::Plain(self.tokens))
    }
}

/// Prompt reference in progress.
#[derive(Debug, Clone)]
pub enum PromptParser {
    Reference(PartialPromptReference),
    Template(PartialPromptTemplateVariable),
}

impl PartialParser for PromptParser {
    type Output = PromptToken;

    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, PromptToken>> {
        match self {
            PromptParser::Reference(parser) => parser.accept(token),
            PromptParser::Template(parser) => parser.accept(token),
        }
    }

    fn finish(self) -> SyntaxResult<Finished<PromptToken>> {
        match self {
            PromptParser::Reference(parser) => parser.finish(),
            PromptParser::Template(parser) => parser.finish(),
        }
    }
}
