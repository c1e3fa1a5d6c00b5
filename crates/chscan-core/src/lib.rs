//! Core library for Companies House accounts scanning.
//!
//! This crate provides:
//! - HTML/XHTML normalization into searchable plain text
//! - A declarative rule catalog (fields bound to patterns and match
//!   strategies)
//! - Field extraction strategies (first-match, multi-match join,
//!   value-offset, header-window, sentence-containing)
//! - A sequential batch driver with per-document failure isolation
//! - Manifest/sink/backup plumbing for spreadsheet-driven runs

pub mod backup;
pub mod batch;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod models;
pub mod normalize;
pub mod rules;
pub mod scan;
pub mod sink;

pub use backup::backup;
pub use batch::BatchDriver;
pub use error::{BackupError, ChscanError, ManifestError, NormalizeError, Result, SinkError};
pub use extract::{apply_rule, apply_rules, text_contains};
pub use manifest::{Manifest, read_manifest};
pub use models::config::ChscanConfig;
pub use models::record::{DocumentRef, ExtractionResult, FieldErrorKind, FieldValue, OutputRecord};
pub use normalize::{normalize, normalize_bytes, strip_markup};
pub use rules::{Rule, RuleSet, Strategy, default_rules};
pub use scan::{ScanOutcome, ScanRecord, scan_directory, scan_directory_with};
pub use sink::CsvSink;
