//! Prompt header metadata extracted from front-matter records.
//!
//! Problems with the header (unknown fields, duplicates, values of the wrong shape) are reported as
//! [`HeaderDiagnostic`] values alongside whatever metadata could be recovered; they are not errors.

use std::collections::HashSet;
use std::fmt;

use promptkit_core::lang::header_fields::{self, ExpectedValue, HeaderFieldId};
use serde::Serialize;

use crate::front_matter::{FrontMatterRecord, FrontMatterValue};
use crate::tokens::{BaseToken, Range};

/// Known header fields of a prompt file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in the header, anchored at the offending record part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderDiagnostic {
    pub message: String,
    pub range: Range,
    pub severity: Severity,
}

impl HeaderDiagnostic {
    fn warning(message: String, range: Range) -> Self {
        Self {
            message,
            range,
            severity: Severity::Warning,
        }
    }

    fn error(message: String, range: Range) -> Self {
        Self {
            message,
            range,
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for HeaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level} at {}: {}", self.range, self.message)
    }
}

impl PromptMetadata {
    /// Read the known fields from `records`, in order.
    ///
    /// A field whose value has the wrong shape is left unset. Only the first occurrence of a field counts.
    pub fn from_records(records: &[FrontMatterRecord]) -> (Self, Vec<HeaderDiagnostic>) {
        let mut metadata = Self::default();
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let name = record.name_text();
            let Some(id) = header_fields::from_str(&name) else {
                diagnostics.push(HeaderDiagnostic::warning(
                    format!("unknown header field `{name}`"),
                    record.name().range(),
                ));
                continue;
            };
            if !seen.insert(id) {
                diagnostics.push(HeaderDiagnostic::error(
                    format!("duplicate header field `{name}`"),
                    record.name().range(),
                ));
                continue;
            }
            match read_value(id, record.value()) {
                Ok(value) => metadata.set(id, value),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        (metadata, diagnostics)
    }

    fn set(&mut self, id: HeaderFieldId, value: FieldValue) {
        match (id, value) {
            (HeaderFieldId::Tools, FieldValue::List(items)) => self.tools = Some(items),
            (HeaderFieldId::Description, FieldValue::Text(text)) => self.description = Some(text),
            (HeaderFieldId::Mode, FieldValue::Text(text)) => self.mode = Some(text),
            (HeaderFieldId::Model, FieldValue::Text(text)) => self.model = Some(text),
            (HeaderFieldId::ApplyTo, FieldValue::Text(text)) => self.apply_to = Some(text),
            _ => {}
        }
    }
}

enum FieldValue {
    Text(String),
    List(Vec<String>),
}

fn read_value(id: HeaderFieldId, value: &FrontMatterValue) -> Result<FieldValue, HeaderDiagnostic> {
    let field = header_fields::as_str(id);
    match header_fields::info_for(id).expected {
        ExpectedValue::Text => read_text(field, value).map(FieldValue::Text),
        ExpectedValue::OneOf(allowed) => {
            let text = read_text(field, value)?;
            if !allowed.contains(&text.as_str()) {
                return Err(HeaderDiagnostic::error(
                    format!("invalid `{field}` value `{text}`, expected one of: {}", allowed.join(", ")),
                    value.range(),
                ));
            }
            Ok(FieldValue::Text(text))
        }
        ExpectedValue::TextArray => {
            let FrontMatterValue::Array(array) = value else {
                return Err(HeaderDiagnostic::error(
                    format!("`{field}` expects an array, found {}", value.kind_name()),
                    value.range(),
                ));
            };
            array
                .items()
                .map(|item| read_text(field, item))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List)
        }
    }
}

fn read_text(field: &str, value: &FrontMatterValue) -> Result<String, HeaderDiagnostic> {
    let Some(text) = value.scalar_text() else {
        return Err(HeaderDiagnostic::error(
            format!("`{field}` expects a text value, found {}", value.kind_name()),
            value.range(),
        ));
    };
    if text.is_empty() {
        return Err(HeaderDiagnostic::warning(
            format!("`{field}` has an empty value"),
            value.range(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front_matter::{decode, records};
    use crate::simple_codec::tokenize;

    fn metadata(text: &str) -> (PromptMetadata, Vec<HeaderDiagnostic>) {
        let tokens = decode(tokenize(text)).unwrap();
        let records: Vec<_> = records(&tokens).cloned().collect();
        PromptMetadata::from_records(&records)
    }

    #[test]
    fn test_known_fields() {
        let (meta, diagnostics) = metadata(
            "description: 'Explain code'\nmode: agent\ntools: ['search', fetch]\nmodel: GPT-4o\napplyTo: '**/*.rs'\n",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(meta.description.as_deref(), Some("Explain code"));
        assert_eq!(meta.mode.as_deref(), Some("agent"));
        assert_eq!(meta.tools, Some(vec!["search".to_string(), "fetch".to_string()]));
        assert_eq!(meta.model.as_deref(), Some("GPT-4o"));
        assert_eq!(meta.apply_to.as_deref(), Some("**/*.rs"));
    }

    #[test]
    fn test_unknown_field_is_a_warning() {
        let (meta, diagnostics) = metadata("color: blue\n");
        assert_eq!(meta, PromptMetadata::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].range, Range::new(1, 1, 1, 6));
    }

    #[test]
    fn test_duplicate_field_keeps_first() {
        let (meta, diagnostics) = metadata("mode: ask\nmode: edit\n");
        assert_eq!(meta.mode.as_deref(), Some("ask"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
        assert_eq!(diagnostics[0].range.start_line, 2);
    }

    #[test]
    fn test_invalid_mode() {
        let (meta, diagnostics) = metadata("mode: chat\n");
        assert_eq!(meta.mode, None);
        assert!(diagnostics[0].message.contains("ask, edit, agent"));
        assert_eq!(diagnostics[0].range, Range::new(1, 7, 1, 11));
    }

    #[test]
    fn test_wrong_value_shapes() {
        let (meta, diagnostics) = metadata("description: [a]\ntools: search\n");
        assert_eq!(meta, PromptMetadata::default());
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(HeaderDiagnostic::is_error));
        assert!(diagnostics[1].message.contains("FrontMatterSequence"));
    }

    #[test]
    fn test_empty_value_is_a_warning() {
        let (meta, diagnostics) = metadata("model:\n");
        assert_eq!(meta.model, None);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_serializes_camel_case_without_unset_fields() {
        let meta = PromptMetadata {
            apply_to: Some("*.md".to_string()),
            ..PromptMetadata::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"applyTo":"*.md"}"#);
    }
}
