//! Document facade: the simple codec followed by the enabled decoder stages.
//!
//! Stage order is fixed: front-matter header, then markdown, then chat-prompt references. A later stage sees the
//! tokens of an earlier one as opaque, so a `#` inside a markdown link is never a prompt variable.

use serde::Serialize;

use crate::config::ParseOptions;
use crate::diagnostics::SyntaxResult;
use crate::front_matter::FrontMatterRecord;
use crate::markdown::{MarkdownDecoder, MarkdownLink, MarkdownToken};
use crate::markdown_extensions::{FrontMatterHeader, FrontMatterHeaderGrammar, MarkdownExtensionsDecoder};
use crate::metadata::{HeaderDiagnostic, PromptMetadata};
use crate::parser_base::{Decoder, Pipeline};
use crate::prompt::{self, PromptDecoder, PromptToken};
use crate::simple_codec::SimpleDecoder;
use crate::tokens::{BaseToken, Range, SimpleToken, Token, render};

/// Chain the decoder stages `options` enables.
pub fn build_pipeline(options: &ParseOptions) -> Pipeline {
    let mut pipeline = Pipeline::new();
    if options.front_matter {
        pipeline = pipeline.with_stage(MarkdownExtensionsDecoder::new(FrontMatterHeaderGrammar::new(
            options.marker_min_dashes,
        )));
    }
    if options.markdown {
        pipeline = pipeline.with_stage(MarkdownDecoder::default());
    }
    if options.prompt_references {
        pipeline = pipeline.with_stage(PromptDecoder::default());
    }
    pipeline
}

/// Push-based decoding of a prompt arriving in chunks.
pub struct PromptStream {
    simple: SimpleDecoder,
    pipeline: Pipeline,
}

impl PromptStream {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            simple: SimpleDecoder::new(),
            pipeline: build_pipeline(options),
        }
    }

    /// Feed a chunk, returning the tokens it completes.
    ///
    /// ## Errors
    /// - Propagates contract violations from the decoder stages.
    pub fn write(&mut self, chunk: &str) -> SyntaxResult<Vec<Token>> {
        let mut out = Vec::new();
        for token in self.simple.write(chunk) {
            self.pipeline.push(token.into(), &mut out)?;
        }
        Ok(out)
    }

    /// End the stream, returning every token still held by the codec or a stage.
    ///
    /// ## Errors
    /// - Propagates contract violations from the decoder stages.
    pub fn finish(mut self) -> SyntaxResult<Vec<Token>> {
        let mut out = Vec::new();
        for token in self.simple.end() {
            self.pipeline.push(token.into(), &mut out)?;
        }
        self.pipeline.end(&mut out)?;
        Ok(out)
    }
}

/// Serializable one-line view of a token for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub kind: &'static str,
    pub range: Range,
    pub text: String,
}

impl TokenSummary {
    /// Summarize `token`, truncating its text to `max_length` characters.
    pub fn new<T: BaseToken>(kind: &'static str, token: &T, max_length: usize) -> Self {
        Self {
            kind,
            range: token.range(),
            text: token.short_text(max_length),
        }
    }
}

/// A decoded prompt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    tokens: Vec<Token>,
}

impl PromptDocument {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// The front-matter header, if the document opens with one.
    pub fn header(&self) -> Option<&FrontMatterHeader> {
        match self.tokens.first() {
            Some(Token::Header(header)) => Some(header),
            _ => None,
        }
    }

    /// Header records; empty without a header.
    ///
    /// ## Errors
    /// - Propagates contract violations from the front-matter grammar.
    pub fn records(&self) -> SyntaxResult<Vec<FrontMatterRecord>> {
        match self.header() {
            Some(header) => header.records(),
            None => Ok(Vec::new()),
        }
    }

    /// Known header fields and the problems found reading them.
    ///
    /// ## Errors
    /// - Propagates contract violations from the front-matter grammar.
    pub fn metadata(&self) -> SyntaxResult<(PromptMetadata, Vec<HeaderDiagnostic>)> {
        Ok(PromptMetadata::from_records(&self.records()?))
    }

    pub fn references(&self) -> impl Iterator<Item = &PromptToken> {
        prompt::references(&self.tokens)
    }

    /// Links and image links in the body.
    pub fn links(&self) -> impl Iterator<Item = &MarkdownLink> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Markdown(markdown) => markdown.as_link(),
            _ => None,
        })
    }

    pub fn comments(&self) -> impl Iterator<Item = &MarkdownToken> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Markdown(markdown) => Some(markdown),
                _ => None,
            })
            .filter(|markdown| matches!(markdown, MarkdownToken::Comment(_)))
    }

    /// The simple tokens every decoded token was built from.
    pub fn leaves(&self) -> Vec<SimpleToken> {
        let mut out = Vec::new();
        for token in &self.tokens {
            token.collect_leaves(&mut out);
        }
        out
    }

    pub fn summaries(&self, max_length: usize) -> Vec<TokenSummary> {
        self.tokens
            .iter()
            .map(|token| TokenSummary::new(token.kind_name(), token, max_length))
            .collect()
    }

    /// Source text; identical to the input.
    pub fn render(&self) -> String {
        render(&self.tokens, "")
    }
}

/// Decode a whole prompt document.
///
/// ## Errors
/// - Propagates contract violations from the decoder stages (never raised for malformed input).
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse_document(text: &str, options: &ParseOptions) -> SyntaxResult<PromptDocument> {
    let mut stream = PromptStream::new(options);
    let mut tokens = stream.write(text)?;
    tokens.extend(stream.finish()?);
    tracing::debug!(tokens = tokens.len(), "decoded document");
    Ok(PromptDocument::from_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple_codec::tokenize;

    const PROMPT: &str = "---\ndescription: 'Explain code'\nmode: agent\n---\n\
        Explain #file:./main.rs to @workspace and see [docs](./README.md).\n<!-- internal -->\n";

    #[test]
    fn test_parse_full_prompt() {
        let document = parse_document(PROMPT, &ParseOptions::default()).unwrap();
        assert_eq!(document.render(), PROMPT);

        let header = document.header().unwrap();
        assert_eq!(header.range(), Range::new(1, 1, 4, 5));
        let (metadata, diagnostics) = document.metadata().unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(metadata.description.as_deref(), Some("Explain code"));
        assert_eq!(metadata.mode.as_deref(), Some("agent"));

        let references: Vec<_> = document.references().collect();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].kind_name(), "FileReference");
        assert_eq!(references[1].name(), "workspace");

        let links: Vec<_> = document.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].reference(), "./README.md");
        assert_eq!(document.comments().count(), 1);
    }

    #[test]
    fn test_leaves_match_simple_tokens() {
        let document = parse_document(PROMPT, &ParseOptions::default()).unwrap();
        assert_eq!(document.leaves(), tokenize(PROMPT));
    }

    #[test]
    fn test_disabled_stages_leave_text_plain() {
        let options = ParseOptions::new()
            .with_front_matter(false)
            .with_markdown(false)
            .with_prompt_references(false);
        let document = parse_document(PROMPT, &options).unwrap();
        assert!(document.tokens().iter().all(|t| t.as_simple().is_some()));
        assert_eq!(document.render(), PROMPT);
        assert!(document.records().unwrap().is_empty());
    }

    #[test]
    fn test_markdown_disabled_keeps_references() {
        let document = parse_document("see [a](#b) @x", &ParseOptions::new().with_markdown(false)).unwrap();
        assert_eq!(document.links().count(), 0);
        let names: Vec<_> = document.references().map(PromptToken::name).collect();
        assert_eq!(names, ["x"]);
    }

    #[test]
    fn test_reference_inside_link_is_opaque() {
        let document = parse_document("[a](#b) #c", &ParseOptions::default()).unwrap();
        assert_eq!(document.links().count(), 1);
        let names: Vec<_> = document.references().map(PromptToken::name).collect();
        assert_eq!(names, ["c"]);
    }

    #[test]
    fn test_stream_in_small_chunks_matches_whole_document() {
        let options = ParseOptions::default();
        let whole = parse_document(PROMPT, &options).unwrap();

        let mut stream = PromptStream::new(&options);
        let mut tokens = Vec::new();
        let chars: Vec<char> = PROMPT.chars().collect();
        for chunk in chars.chunks(3) {
            let chunk: String = chunk.iter().collect();
            tokens.extend(stream.write(&chunk).unwrap());
        }
        tokens.extend(stream.finish().unwrap());
        assert_eq!(tokens, whole.into_tokens());
    }

    #[test]
    fn test_document_without_header() {
        let document = parse_document("Just /fix it", &ParseOptions::default()).unwrap();
        assert!(document.header().is_none());
        assert_eq!(document.references().count(), 1);
        let (metadata, diagnostics) = document.metadata().unwrap();
        assert_eq!(metadata, PromptMetadata::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_summaries() {
        let document = parse_document("Use @workspace", &ParseOptions::default()).unwrap();
        let summaries = document.summaries(5);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[2].kind, "PromptAtMention");
        assert_eq!(summaries[2].text, "@wor…");
        assert_eq!(summaries[2].range, Range::new(1, 5, 1, 15));
    }

    #[test]
    fn test_pipeline_stage_count() {
        assert_eq!(build_pipeline(&ParseOptions::default()).len(), 3);
        let options = ParseOptions::new()
            .with_front_matter(false)
            .with_markdown(false)
            .with_prompt_references(false);
        assert!(build_pipeline(&options).is_empty());
    }
}
