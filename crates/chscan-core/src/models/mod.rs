//! Data models: configuration, document references, and output rows.

pub mod config;
pub mod record;

pub use config::{ChscanConfig, ExtractionConfig, ManifestConfig, ScanConfig};
pub use record::{DocumentRef, ExtractionResult, FieldErrorKind, FieldValue, OutputRecord};
