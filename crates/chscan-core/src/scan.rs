//! Directory keyword scan.
//!
//! Walks a parent directory for HTML/XHTML filings and reports, for
//! each document mentioning a configured context keyword, the matching
//! sentence plus company metadata. Documents with no keyword hit
//! produce no row but still count toward the scanned-files total.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{info, warn};

use crate::error::{ChscanError, Result};
use crate::extract::{apply_rule, text_contains};
use crate::models::config::ChscanConfig;
use crate::models::record::FieldValue;
use crate::rules::patterns::COMPANY_NAME;
use crate::rules::{Rule, Strategy};

/// One keyword hit in one document.
#[derive(Debug, Clone)]
pub struct ScanRecord {
    /// File name of the filing (not the full path).
    pub file_name: String,
    /// First sentence containing a context keyword, original casing.
    pub matched_sentence: String,
    /// Company name recovered by legal suffix.
    pub company_name: FieldValue,
    /// Document text contains the unaudited marker.
    pub unaudited: bool,
    /// The extracted company-name string contains the dormant marker.
    /// Kept for output compatibility with the legacy pipeline, which
    /// derived dormancy from the name string rather than the document;
    /// see `dormant_in_document` for the document-level flag.
    pub dormant_in_name: bool,
    /// Document text contains the dormant marker.
    pub dormant_in_document: bool,
}

impl ScanRecord {
    /// Output column headers for scan results.
    pub fn headers() -> Vec<String> {
        [
            "File Name",
            "Matched Sentence",
            "Company Name",
            "Unaudited",
            "Dormant",
            "Dormant (Document)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Flatten to output cells, using `Yes`/`No` for the flags.
    pub fn cells(&self) -> Vec<String> {
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" }.to_string();
        vec![
            self.file_name.clone(),
            self.matched_sentence.clone(),
            self.company_name.render().to_string(),
            yes_no(self.unaudited),
            yes_no(self.dormant_in_name),
            yes_no(self.dormant_in_document),
        ]
    }
}

/// Result of scanning a directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// One record per document with a keyword hit, in walk order.
    pub records: Vec<ScanRecord>,
    /// Total candidate files examined, hits or not.
    pub files_scanned: usize,
}

/// Scan every HTML/XHTML file under `parent`, accumulating all records.
pub fn scan_directory(parent: &Path, config: &ChscanConfig) -> Result<ScanOutcome> {
    scan_directory_with(parent, config, |_| Ok(()))
}

/// Scan with a per-record callback, so hits can be sunk incrementally.
/// A failing callback aborts the scan; unreadable files are logged,
/// counted, and skipped.
pub fn scan_directory_with<F>(
    parent: &Path,
    config: &ChscanConfig,
    mut on_record: F,
) -> Result<ScanOutcome>
where
    F: FnMut(&ScanRecord) -> Result<()>,
{
    let pattern = format!("{}/**/*", parent.display());
    let paths: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| ChscanError::Scan(format!("bad scan pattern: {e}")))?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            config
                .scan
                .extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .collect();

    let sentence_rule = Rule::new(
        "Matched Sentence",
        vec![],
        Strategy::SentenceContaining {
            keywords: config.scan.keywords.clone(),
        },
    );
    let name_rule = Rule::new("Company Name", vec![COMPANY_NAME.clone()], Strategy::FirstMatch);

    let mut outcome = ScanOutcome::default();

    for path in paths {
        outcome.files_scanned += 1;
        info!(path = %path.display(), "scanning file");

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file");
                continue;
            }
        };

        // Casing is preserved here so matched sentences read as they
        // appear in the filing; keyword and marker checks fold locally.
        let text = match crate::normalize::strip_markup(&raw) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to normalize file");
                continue;
            }
        };

        let FieldValue::Found(sentence) = apply_rule(&text, &sentence_rule) else {
            continue;
        };

        let company_name = apply_rule(&text, &name_rule);
        let record = ScanRecord {
            file_name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
            matched_sentence: sentence,
            unaudited: text_contains(&text, &config.scan.unaudited_marker),
            dormant_in_name: company_name.contains_marker(&config.scan.dormant_marker),
            dormant_in_document: text_contains(&text, &config.scan.dormant_marker),
            company_name,
        };

        on_record(&record)?;
        outcome.records.push(record);
    }

    info!(
        files = outcome.files_scanned,
        hits = outcome.records.len(),
        "scan complete"
    );

    Ok(outcome)
}
