//! Tokens built from an owned list of children.

use super::{BaseToken, Range, SimpleToken, full_range};
use crate::diagnostics::SyntaxResult;

/// A token whose text is the concatenation of its children and whose range spans them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeToken<T> {
    children: Vec<T>,
    range: Range,
}

impl<T: BaseToken> CompositeToken<T> {
    /// Build a composite over `children`.
    ///
    /// ## Errors
    /// - Same as [`full_range`]: `children` must be non-empty and in source order.
    pub fn new(children: Vec<T>) -> SyntaxResult<Self> {
        let range = full_range(&children)?;
        Ok(Self { children, range })
    }

    pub fn children(&self) -> &[T] {
        &self.children
    }

    pub fn into_children(self) -> Vec<T> {
        self.children
    }
}

impl<T: BaseToken> BaseToken for CompositeToken<T> {
    fn range(&self) -> Range {
        self.range
    }

    fn write_text(&self, buf: &mut String) {
        for child in &self.children {
            child.write_text(buf);
        }
    }

    fn collect_leaves(&self, out: &mut Vec<SimpleToken>) {
        for child in &self.children {
            child.collect_leaves(out);
        }
    }
}
