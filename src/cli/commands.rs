//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use promptkit_syntax::metadata::{HeaderDiagnostic, PromptMetadata};
use promptkit_syntax::simple_codec::tokenize;
use promptkit_syntax::tokens::BaseToken;
use promptkit_syntax::{ParseOptions, PromptDocument, Range, TokenSummary, parse_document};
use serde::Serialize;

use super::report::{internal_error, render_diagnostic};
use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (10 MB)
///
/// Prompt files are small; anything larger is almost certainly not one.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

fn load_document(file_path: &str, options: &ParseOptions) -> CliResult<(String, PromptDocument)> {
    let source = read_source(file_path)?;
    let document = parse_document(&source, options).map_err(|e| internal_error(file_path, e))?;
    Ok((source, document))
}

/// One listing line: range, kind and (truncated) text.
pub fn format_summary(summary: &TokenSummary) -> String {
    format!("{:<14} {:<24} {:?}", summary.range.to_string(), summary.kind, summary.text)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| CliError::failure(format!("Error serializing JSON: {}", e)))?;
    println!("{json}");
    Ok(())
}

/// Tokenize and display simple tokens.
pub fn tokens_file(file_path: &str, options: &ParseOptions) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    for token in tokenize(&source) {
        let summary = TokenSummary::new(token.kind_name(), &token, options.short_text_max);
        println!("{}", format_summary(&summary));
    }
    Ok(ExitCode::SUCCESS)
}

/// Decode and display the top-level tokens.
pub fn parse_file(file_path: &str, options: &ParseOptions, json: bool) -> CliResult<ExitCode> {
    let (_, document) = load_document(file_path, options)?;
    let summaries = document.summaries(options.short_text_max);
    if json {
        print_json(&summaries)?;
    } else {
        for summary in &summaries {
            println!("{}", format_summary(summary));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// A header record as shown by `promptkit header`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    pub name: String,
    pub kind: &'static str,
    pub value: String,
    pub range: Range,
}

/// Everything `promptkit header` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    pub present: bool,
    pub records: Vec<RecordView>,
    pub metadata: PromptMetadata,
    pub diagnostics: Vec<HeaderDiagnostic>,
}

impl HeaderReport {
    /// ## Errors
    /// - A decoder contract violation while reading the header records.
    pub fn from_document(file_path: &str, document: &PromptDocument) -> CliResult<Self> {
        let records = document.records().map_err(|e| internal_error(file_path, e))?;
        let (metadata, diagnostics) = PromptMetadata::from_records(&records);
        let records = records
            .iter()
            .map(|record| RecordView {
                name: record.name_text(),
                kind: record.value().kind_name(),
                value: record.value().text(),
                range: record.range(),
            })
            .collect();
        Ok(Self {
            present: document.header().is_some(),
            records,
            metadata,
            diagnostics,
        })
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Display the header records and the metadata read from them.
pub fn header_file(file_path: &str, options: &ParseOptions, json: bool) -> CliResult<ExitCode> {
    let (_, document) = load_document(file_path, options)?;
    let report = HeaderReport::from_document(file_path, &document)?;
    if json {
        print_json(&report)?;
        return Ok(ExitCode::SUCCESS);
    }
    if !report.present {
        println!("{file_path}: no front-matter header");
        return Ok(ExitCode::SUCCESS);
    }
    for record in &report.records {
        println!("{:<14} {} = {:?} ({})", record.range.to_string(), record.name, record.value, record.kind);
    }
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Check the header and report problems with source context.
pub fn check_file(file_path: &str, options: &ParseOptions) -> CliResult<ExitCode> {
    let (source, document) = load_document(file_path, options)?;
    let report = HeaderReport::from_document(file_path, &document)?;
    for diagnostic in &report.diagnostics {
        eprintln!("{}", render_diagnostic(file_path, &source, diagnostic));
    }
    let errors = report.error_count();
    if errors > 0 {
        return Err(CliError::failure(format!("{file_path}: {errors} header error(s)")));
    }
    let references = document.references().count();
    println!(
        "✓ {file_path}: {} warning(s), {} reference(s)",
        report.diagnostics.len(),
        references
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn report(text: &str) -> HeaderReport {
        let document = parse_document(text, &ParseOptions::default()).unwrap();
        HeaderReport::from_document("test.prompt.md", &document).unwrap()
    }

    #[test]
    fn test_header_report_lists_records() {
        let report = report("---\nmode: edit\ntools: [a, 'b']\n---\nbody\n");
        assert!(report.present);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].name, "mode");
        assert_eq!(report.records[1].kind, "FrontMatterArray");
        assert_eq!(report.metadata.tools, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_header_report_counts_errors() {
        let report = report("---\nmode: chat\ncolor: red\n---\n");
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_header_report_without_header() {
        let report = report("just text");
        assert!(!report.present);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_format_summary() {
        let document = parse_document("@a", &ParseOptions::default()).unwrap();
        let line = format_summary(&document.summaries(32)[0]);
        assert!(line.starts_with("1:1-1:3"));
        assert!(line.contains("PromptAtMention"));
        assert!(line.ends_with("\"@a\""));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source("definitely/not/here.prompt.md").unwrap_err();
        assert!(err.message.contains("Cannot access file"));
    }
}
