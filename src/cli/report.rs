//! Rendering of header diagnostics and internal errors with miette.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use promptkit_syntax::SyntaxError;
use promptkit_syntax::metadata::{HeaderDiagnostic, Severity};

use super::CliError;

/// Byte offset of a 1-based line/column position; columns count characters.
///
/// A column past the end of a line resolves to the start of the next line, and a position past the end of the source
/// to its length.
pub fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut position = (1, 1);
    for (offset, c) in source.char_indices() {
        if position >= (line, column) {
            return offset;
        }
        position = if c == '\n' {
            (position.0 + 1, 1)
        } else {
            (position.0, position.1 + 1)
        };
    }
    source.len()
}

/// Render one header diagnostic against its source.
pub fn render_diagnostic(file_name: &str, source: &str, diagnostic: &HeaderDiagnostic) -> String {
    let range = diagnostic.range;
    let start = byte_offset(source, range.start_line, range.start_column);
    let end = byte_offset(source, range.end_line, range.end_column).max(start);
    let severity = match diagnostic.severity {
        Severity::Warning => miette::Severity::Warning,
        Severity::Error => miette::Severity::Error,
    };
    let report = Report::new(
        MietteDiagnostic::new(diagnostic.message.clone())
            .with_code("promptkit::header")
            .with_severity(severity)
            .with_label(LabeledSpan::at(start..end, "here")),
    )
    .with_source_code(NamedSource::new(file_name, source.to_string()));
    format!("{report:?}")
}

/// A decoder contract violation is a bug, not a problem with the file.
pub fn internal_error(file_name: &str, err: SyntaxError) -> CliError {
    tracing::error!(file = file_name, error = %err, "decoder contract violated");
    CliError::failure(format!("{:?}", Report::new(err)))
}
