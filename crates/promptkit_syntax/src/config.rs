//! Decoding options for prompt documents.

use promptkit_core::lang::front_matter::MIN_MARKER_LENGTH;

use crate::tokens::SHORT_TEXT_MAX;

/// Which decoder stages run, and their tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recognize a `---` front-matter header at the start of the document.
    pub front_matter: bool,
    /// Recognize markdown links, images and comments.
    pub markdown: bool,
    /// Recognize `#`, `@`, `/` and `${}` chat-prompt references.
    pub prompt_references: bool,
    /// Minimum number of dashes in a header marker (clamped to at least 1).
    pub marker_min_dashes: usize,
    /// Maximum length of token previews in debug listings.
    pub short_text_max: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            front_matter: true,
            markdown: true,
            prompt_references: true,
            marker_min_dashes: MIN_MARKER_LENGTH,
            short_text_max: SHORT_TEXT_MAX,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_front_matter(mut self, enabled: bool) -> Self {
        self.front_matter = enabled;
        self
    }

    pub fn with_markdown(mut self, enabled: bool) -> Self {
        self.markdown = enabled;
        self
    }

    pub fn with_prompt_references(mut self, enabled: bool) -> Self {
        self.prompt_references = enabled;
        self
    }

    pub fn with_marker_min_dashes(mut self, dashes: usize) -> Self {
        self.marker_min_dashes = dashes.max(1);
        self
    }

    pub fn with_short_text_max(mut self, max: usize) -> Self {
        self.short_text_max = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_every_stage() {
        let options = ParseOptions::default();
        assert!(options.front_matter);
        assert!(options.markdown);
        assert!(options.prompt_references);
        assert_eq!(options.marker_min_dashes, 3);
        assert_eq!(options.short_text_max, 32);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ParseOptions::new(), ParseOptions::default());
    }

    #[test]
    fn test_builder_chain() {
        let options = ParseOptions::new()
            .with_markdown(false)
            .with_prompt_references(false)
            .with_short_text_max(10);
        assert!(options.front_matter);
        assert!(!options.markdown);
        assert!(!options.prompt_references);
        assert_eq!(options.short_text_max, 10);
    }

    #[test]
    fn test_marker_dashes_clamped() {
        assert_eq!(ParseOptions::new().with_marker_min_dashes(0).marker_min_dashes, 1);
        assert_eq!(ParseOptions::new().with_marker_min_dashes(5).marker_min_dashes, 5);
    }

    #[test]
    fn test_builder_override() {
        let options = ParseOptions::new().with_front_matter(false).with_front_matter(true);
        assert!(options.front_matter);
    }
}
