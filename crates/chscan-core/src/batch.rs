//! Sequential batch driver.
//!
//! Iterates a document list, normalizes and extracts one document at a
//! time, and yields exactly one [`OutputRecord`] per input in input
//! order. Every per-document failure is converted into sentinel field
//! values for that row; only sink failures (reported by the record
//! callback) abort the run.

use std::fs;

use tracing::{info, warn};

use crate::error::{NormalizeError, Result};
use crate::extract::apply_rules;
use crate::models::record::{DocumentRef, ExtractionResult, FieldErrorKind, OutputRecord};
use crate::normalize::normalize_bytes;
use crate::rules::RuleSet;

/// Drives extraction over a list of document references.
pub struct BatchDriver {
    rules: RuleSet,
}

impl BatchDriver {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Process every document, accumulating all records in memory.
    pub fn run(&self, documents: &[DocumentRef]) -> Vec<OutputRecord> {
        // The no-op callback cannot fail, so neither can the run.
        self.run_with(documents, |_| Ok(()))
            .expect("infallible callback")
    }

    /// Process every document, invoking `on_record` as each record is
    /// produced. A failing callback (typically an incremental sink
    /// write) aborts the run; per-document extraction problems never
    /// do.
    pub fn run_with<F>(&self, documents: &[DocumentRef], mut on_record: F) -> Result<Vec<OutputRecord>>
    where
        F: FnMut(&OutputRecord) -> Result<()>,
    {
        let mut records = Vec::with_capacity(documents.len());

        for document in documents {
            let fields = self.process(document);
            let record = OutputRecord {
                document: document.clone(),
                fields,
            };
            on_record(&record)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Resolve, read, normalize, and extract one document. Never
    /// returns an error: failures become sentinel values for the row.
    fn process(&self, document: &DocumentRef) -> ExtractionResult {
        let path = &document.path;
        let field_names = self.rules.field_names();

        if !path.exists() {
            warn!(path = %path.display(), "file not found");
            return ExtractionResult::all_errors(&field_names, FieldErrorKind::FileNotFound);
        }

        info!(path = %path.display(), "processing file");

        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file");
                let kind = if e.kind() == std::io::ErrorKind::NotFound {
                    FieldErrorKind::FileNotFound
                } else {
                    FieldErrorKind::Decode
                };
                return ExtractionResult::all_errors(&field_names, kind);
            }
        };

        let text = match normalize_bytes(&raw) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to normalize file");
                let kind = match e {
                    NormalizeError::Decode(_) => FieldErrorKind::Decode,
                    NormalizeError::Parse(_) => FieldErrorKind::Parse,
                };
                return ExtractionResult::all_errors(&field_names, kind);
            }
        };

        apply_rules(&text, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::config::ExtractionConfig;
    use crate::models::record::FieldValue;
    use crate::rules::catalog;

    fn driver() -> BatchDriver {
        BatchDriver::new(catalog::default_rules(&ExtractionConfig::default()).unwrap())
    }

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> DocumentRef {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        DocumentRef::new(path)
    }

    #[test]
    fn test_one_record_per_document_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![
            write_fixture(&dir, "a.html", "<p>appointed 5th October 2023</p>"),
            DocumentRef::new(dir.path().join("missing.html")),
            write_fixture(&dir, "b.html", "<p>no fields here</p>"),
        ];

        let records = driver().run(&docs);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].document.path, docs[0].path);
        assert_eq!(records[1].document.path, docs[1].path);
        assert_eq!(records[2].document.path, docs[2].path);
    }

    #[test]
    fn test_missing_file_yields_file_not_found_cells() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![DocumentRef::new(dir.path().join("gone.html"))];

        let records = driver().run(&docs);
        let fields = &records[0].fields;

        assert_eq!(fields.len(), 4);
        assert!(fields
            .iter()
            .all(|(_, v)| *v == FieldValue::Error(FieldErrorKind::FileNotFound)));
    }

    #[test]
    fn test_undecodable_file_yields_error_cells_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let bad_path = dir.path().join("bad.html");
        std::fs::write(&bad_path, [0xffu8, 0xfe, 0x00, 0x01]).unwrap();

        let docs = vec![
            DocumentRef::new(bad_path),
            write_fixture(&dir, "ok.html", "<p>appointed 7th July 2024</p>"),
        ];

        let records = driver().run(&docs);

        assert!(records[0]
            .fields
            .iter()
            .all(|(_, v)| matches!(v, FieldValue::Error(_))));
        assert_eq!(
            records[1].fields.get(catalog::APPOINTED_DATES),
            Some(&FieldValue::Found("7th july 2024".into()))
        );
    }

    #[test]
    fn test_field_count_equals_rule_set_size() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![write_fixture(&dir, "a.html", "<p>anything</p>")];

        let d = driver();
        let records = d.run(&docs);
        assert_eq!(records[0].fields.len(), d.rules().len());
    }

    #[test]
    fn test_callback_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let docs = vec![
            write_fixture(&dir, "a.html", "<p>x</p>"),
            write_fixture(&dir, "b.html", "<p>y</p>"),
        ];

        let result = driver().run_with(&docs, |_| {
            Err(crate::error::ChscanError::Config("sink down".into()))
        });
        assert!(result.is_err());
    }
}
