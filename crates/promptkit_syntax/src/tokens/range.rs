//! Source ranges (1-based lines and columns, end column exclusive).

use std::fmt;

use serde::Serialize;

/// Position of a token in the source.
///
/// Lines and columns are 1-based; `end_column` is exclusive, so the single character at line 1, column 1 has the
/// range `1:1-1:2`. Columns count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// Partial edit of a [`Range`]; `None` keeps the current edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeUpdate {
    pub start_line: Option<usize>,
    pub start_column: Option<usize>,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

impl Range {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Zero-width range at a position.
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }

    /// Zero-width range at the start of this one.
    pub fn collapse_to_start(self) -> Self {
        Self::at(self.start_line, self.start_column)
    }

    /// Zero-width range at the end of this one.
    pub fn collapse_to_end(self) -> Self {
        Self::at(self.end_line, self.end_column)
    }

    /// Return a copy with the given edges replaced.
    pub fn with(self, update: RangeUpdate) -> Self {
        Self {
            start_line: update.start_line.unwrap_or(self.start_line),
            start_column: update.start_column.unwrap_or(self.start_column),
            end_line: update.end_line.unwrap_or(self.end_line),
            end_column: update.end_column.unwrap_or(self.end_column),
        }
    }

    /// Range from the start of `self` to the end of `last`, without any ordering checks.
    pub fn to(self, last: Range) -> Self {
        Self::new(self.start_line, self.start_column, last.end_line, last.end_column)
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_column == self.end_column
    }

    /// `true` when the range starts at line 1, column 1.
    pub fn is_document_start(&self) -> bool {
        self.start_line == 1 && self.start_column == 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_to_start_is_zero_width() {
        let range = Range::new(2, 3, 4, 5).collapse_to_start();
        assert_eq!(range, Range::at(2, 3));
        assert!(range.is_empty());
    }

    #[test]
    fn test_with_replaces_only_given_edges() {
        let range = Range::new(1, 1, 1, 5).with(RangeUpdate {
            end_column: Some(9),
            ..Default::default()
        });
        assert_eq!(range, Range::new(1, 1, 1, 9));
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(3, 1, 3, 7).to_string(), "3:1-3:7");
    }
}
