//! Extraction results, sentinels, and output rows.
//!
//! Absence and failure are modeled as distinct variants of
//! [`FieldValue`] rather than ad hoc strings, so downstream code can
//! never confuse "field absent" with "processing failed". The legacy
//! cell spellings (`N/A`, `Error`, `File Not Found`) only appear when a
//! value is rendered for the output table.

use std::path::PathBuf;

/// Why a field carries an error sentinel instead of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Document path did not resolve.
    FileNotFound,
    /// Document bytes could not be decoded as text.
    Decode,
    /// Markup could not be normalized even with lenient parsing.
    Parse,
}

/// Outcome of extracting one field from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The matched value.
    Found(String),
    /// No pattern matched anywhere. A normal outcome, not an error.
    NotFound,
    /// Processing failed before or during extraction.
    Error(FieldErrorKind),
}

impl FieldValue {
    /// Cell text for the output table, matching the legacy spellings.
    pub fn render(&self) -> &str {
        match self {
            FieldValue::Found(value) => value,
            FieldValue::NotFound => "N/A",
            FieldValue::Error(FieldErrorKind::FileNotFound) => "File Not Found",
            FieldValue::Error(_) => "Error",
        }
    }

    /// Case-insensitive marker search inside an extracted value.
    ///
    /// An absent or errored field never contains a marker; derived
    /// flags built on top of another field must not fail just because
    /// that field was not extracted.
    pub fn contains_marker(&self, marker: &str) -> bool {
        match self {
            FieldValue::Found(value) => value.to_lowercase().contains(&marker.to_lowercase()),
            FieldValue::NotFound | FieldValue::Error(_) => false,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }
}

/// One field-to-value mapping per (document, rule-set) pair, in rule
/// order.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    fields: Vec<(String, FieldValue)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result where every field of the rule set carries the
    /// same error sentinel. Used for missing or unreadable documents.
    pub fn all_errors(field_names: &[&str], kind: FieldErrorKind) -> Self {
        Self {
            fields: field_names
                .iter()
                .map(|name| ((*name).to_string(), FieldValue::Error(kind)))
                .collect(),
        }
    }

    pub fn push(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.push((field.into(), value));
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// A single document to process: its path plus the manifest columns
/// carried through unchanged to the output. Resolved once per batch
/// iteration and immutable after that.
#[derive(Debug, Clone)]
pub struct DocumentRef {
    /// Filesystem path to the document.
    pub path: PathBuf,
    /// Pass-through column values from the input manifest row.
    pub passthrough: Vec<String>,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            passthrough: Vec::new(),
        }
    }

    pub fn with_passthrough(mut self, passthrough: Vec<String>) -> Self {
        self.passthrough = passthrough;
        self
    }
}

/// One row of the final table: the original manifest columns plus one
/// cell per extracted field. Immutable once the batch driver appends
/// it.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    /// The document this row was produced from.
    pub document: DocumentRef,
    /// Extracted field values, in rule order.
    pub fields: ExtractionResult,
}

impl OutputRecord {
    /// Flatten to output cells: pass-through columns first, then one
    /// rendered cell per field.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = self.document.passthrough.clone();
        cells.extend(self.fields.iter().map(|(_, value)| value.render().to_string()));
        cells
    }
}
