//! Chat-prompt decoder: `#variable`, `#name:data`, `#file:path`, `@mention`, `/command` and `${template}`.
//!
//! ## Notes
//! - `#`, `@` and `/` only start a reference at a word boundary; `$` starts one anywhere.
//! - A reference ends at the first whitespace token or stop symbol (`,`, `)`, `]`, `>`), which stays outside it. A
//!   disallowed symbol in its name rejects it and the tokens are replayed as plain text.
//! - Markdown tokens from an earlier stage are opaque here: a reference never continues into a link or comment.

mod parsers;
mod tokens;

pub use parsers::{PartialPromptReference, PartialPromptTemplateVariable, PromptParser};
pub use tokens::{
    FileReference, PromptAtMention, PromptSlashCommand, PromptTemplateVariable, PromptVariable,
    PromptVariableWithData,
};

use promptkit_core::lang::prompt::{self, ReferenceKind};

use crate::parser_base::{Grammar, GrammarDecoder, StartContext};
use crate::tokens::{BaseToken, Range, SimpleToken, Token};

/// Tokens produced by the prompt decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptToken {
    Variable(PromptVariable),
    VariableWithData(PromptVariableWithData),
    FileReference(FileReference),
    AtMention(PromptAtMention),
    SlashCommand(PromptSlashCommand),
    TemplateVariable(PromptTemplateVariable),
}

impl PromptToken {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PromptToken::Variable(_) => "PromptVariable",
            PromptToken::VariableWithData(_) => "PromptVariableWithData",
            PromptToken::FileReference(_) => "FileReference",
            PromptToken::AtMention(_) => "PromptAtMention",
            PromptToken::SlashCommand(_) => "PromptSlashCommand",
            PromptToken::TemplateVariable(_) => "PromptTemplateVariable",
        }
    }

    pub fn reference_kind(&self) -> ReferenceKind {
        match self {
            PromptToken::Variable(_) | PromptToken::VariableWithData(_) | PromptToken::FileReference(_) => {
                ReferenceKind::Variable
            }
            PromptToken::AtMention(_) => ReferenceKind::AtMention,
            PromptToken::SlashCommand(_) => ReferenceKind::SlashCommand,
            PromptToken::TemplateVariable(_) => ReferenceKind::Template,
        }
    }

    /// Name of the referenced variable, participant, command or template.
    pub fn name(&self) -> String {
        match self {
            PromptToken::Variable(token) => token.name(),
            PromptToken::VariableWithData(token) => token.name(),
            PromptToken::FileReference(_) => prompt::FILE_VARIABLE.to_string(),
            PromptToken::AtMention(token) => token.name(),
            PromptToken::SlashCommand(token) => token.name(),
            PromptToken::TemplateVariable(token) => token.content(),
        }
    }
}

impl BaseToken for PromptToken {
    fn range(&self) -> Range {
        match self {
            PromptToken::Variable(token) => token.range(),
            PromptToken::VariableWithData(token) => token.range(),
            PromptToken::FileReference(token) => token.range(),
            PromptToken::AtMention(token) => token.range(),
            PromptToken::SlashCommand(token) => token.range(),
            PromptToken::TemplateVariable(token) => token.range(),
        }
    }

    fn write_text(&self, buf: &mut String) {
        match self {
            PromptToken::Variable(token) => token.write_text(buf),
            PromptToken::VariableWithData(token) => token.write_text(buf),
            PromptToken::FileReference(token) => token.write_text(buf),
            PromptToken::AtMention(token) => token.write_text(buf),
            PromptToken::SlashCommand(token) => token.write_text(buf),
            PromptToken::TemplateVariable(token) => token.write_text(buf),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        match self {
            PromptToken::Variable(token) => token.collect_leaves(out),
            PromptToken::VariableWithData(token) => token.collect_leaves(out),
            PromptToken::FileReference(token) => token.collect_leaves(out),
            PromptToken::AtMention(token) => token.collect_leaves(out),
            PromptToken::SlashCommand(token) => token.collect_leaves(out),
            PromptToken::TemplateVariable(token) => token.collect_leaves(out),
        }
    }
}

impl From<PromptToken> for Token {
    fn from(token: PromptToken) -> Self {
        Token::Prompt(token)
    }
}

/// Starts a reference at a trigger symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptGrammar;

impl Grammar for PromptGrammar {
    type Output = PromptToken;
    type Parser = PromptParser;

    fn start(&mut self, token: &SimpleToken, ctx: &StartContext) -> Option<PromptParser> {
        let kind = prompt::from_trigger(token.symbol_id()?)?;
        if prompt::info_for(kind).requires_boundary && !ctx.at_boundary {
            return None;
        }
        Some(match kind {
            ReferenceKind::Template => PromptParser::Template(PartialPromptTemplateVariable::new(token.clone())),
            _ => PromptParser::Reference(PartialPromptReference::new(kind, token.clone())),
        })
    }
}

pub type PromptDecoder = GrammarDecoder<PromptGrammar>;

/// References among decoded tokens.
pub fn references(tokens: &[Token]) -> impl Iterator<Item = &PromptToken> {
    tokens.iter().filter_map(|token| match token {
        Token::Prompt(reference) => Some(reference),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_base::Decoder;
    use crate::simple_codec::tokenize;
    use crate::tokens::render;

    fn decode(text: &str) -> Vec<Token> {
        PromptDecoder::default()
            .decode_all(tokenize(text).into_iter().map(Token::from))
            .unwrap()
    }

    fn found(text: &str) -> Vec<PromptToken> {
        let tokens = decode(text);
        assert_eq!(render(&tokens, ""), text);
        references(&tokens).cloned().collect()
    }

    #[test]
    fn test_file_reference() {
        let refs = found("Read #file:./docs/a.md please");
        assert_eq!(refs.len(), 1);
        let PromptToken::FileReference(file) = &refs[0] else {
            panic!("expected a file reference, got {}", refs[0].kind_name());
        };
        assert_eq!(file.path(), "./docs/a.md");
        assert_eq!(file.range(), Range::new(1, 6, 1, 23));
    }

    #[test]
    fn test_variable_with_and_without_data() {
        let refs = found("#selection and #sym:main");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind_name(), "PromptVariable");
        assert_eq!(refs[0].name(), "selection");
        let PromptToken::VariableWithData(variable) = &refs[1] else {
            panic!("expected a variable with data");
        };
        assert_eq!(variable.name(), "sym");
        assert_eq!(variable.data(), "main");
    }

    #[test]
    fn test_mention_and_command() {
        let refs = found("@workspace /explain this");
        let kinds: Vec<_> = refs.iter().map(PromptToken::kind_name).collect();
        assert_eq!(kinds, ["PromptAtMention", "PromptSlashCommand"]);
        assert_eq!(refs[0].name(), "workspace");
        assert_eq!(refs[1].name(), "explain");
        assert_eq!(refs[1].range(), Range::new(1, 12, 1, 20));
    }

    #[test]
    fn test_triggers_inside_words_stay_plain() {
        assert!(found("a#b me@example.com src/lib.rs").is_empty());
    }

    #[test]
    fn test_markdown_heading_is_not_a_variable() {
        assert!(found("# Title\n## Sub").is_empty());
    }

    #[test]
    fn test_reference_after_line_break() {
        let refs = found("first\n/fix");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].range(), Range::new(2, 1, 2, 5));
    }

    #[test]
    fn test_template_variable() {
        let refs = found("Write about ${input:topic} now");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind_name(), "PromptTemplateVariable");
        assert_eq!(refs[0].name(), "input:topic");
    }

    #[test]
    fn test_template_variable_needs_boundary_free_trigger() {
        let refs = found("x${a}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].range(), Range::new(1, 2, 1, 6));
    }

    #[test]
    fn test_empty_or_open_template_is_plain() {
        assert!(found("${} and ${open").is_empty());
        assert!(found("costs $5").is_empty());
    }

    #[test]
    fn test_invalid_symbol_rejects_reference() {
        assert!(found("@bad!name").is_empty());
        assert!(found("#a(b)").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_ends_reference() {
        let refs = found("(see #file:a.md) and #selection, then @workspace, please");
        let kinds: Vec<_> = refs.iter().map(PromptToken::kind_name).collect();
        assert_eq!(kinds, ["FileReference", "PromptVariable", "PromptAtMention"]);
        let PromptToken::FileReference(file) = &refs[0] else {
            panic!("expected a file reference");
        };
        assert_eq!(file.path(), "a.md");
        assert_eq!(file.range(), Range::new(1, 6, 1, 16));
        assert_eq!(refs[1].name(), "selection");
        assert_eq!(refs[2].name(), "workspace");
    }

    #[test]
    fn test_stop_symbol_right_after_trigger_is_plain() {
        assert!(found("@, #name:] /)").is_empty());
    }

    #[test]
    fn test_empty_name_or_data_is_plain() {
        assert!(found("# @ / #:x #name: ").is_empty());
    }

    #[test]
    fn test_reference_finished_at_end_of_stream() {
        let refs = found("ask @agent");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].range(), Range::new(1, 5, 1, 11));
    }
}
