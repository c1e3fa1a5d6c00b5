//! Error types for the chscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the chscan library.
#[derive(Error, Debug)]
pub enum ChscanError {
    /// Text normalization error.
    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Input manifest error.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Result sink error. Fatal to the run.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Backup error. Fatal before any document is processed.
    #[error("backup error: {0}")]
    Backup(#[from] BackupError),

    /// Directory scan error.
    #[error("scan error: {0}")]
    Scan(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw document bytes into normalized text.
///
/// These are row-level: the batch driver converts them into per-field
/// sentinel values and continues with the next document.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Document bytes are not valid text in the expected encoding.
    #[error("invalid UTF-8 at byte {0}")]
    Decode(usize),

    /// Markup could not be reduced to text even with lenient parsing.
    #[error("unparseable content: {0}")]
    Parse(String),
}

/// Errors reading the input manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be opened or read.
    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest rows could not be parsed as CSV.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] csv::Error),

    /// The configured document-path column is missing from the header.
    #[error("manifest has no '{0}' column")]
    MissingPathColumn(String),
}

/// Errors writing the output table. Always fatal: a run must never
/// report success without its results on disk.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Failed to create or open the output file.
    #[error("failed to open output {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write or flush a record.
    #[error("failed to write record: {0}")]
    Write(#[from] csv::Error),

    /// Failed to flush buffered output.
    #[error("failed to flush output: {0}")]
    Flush(#[from] std::io::Error),
}

/// Errors taking the pre-run backup copy of the input manifest.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The source file could not be copied.
    #[error("failed to copy {} to {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },

    /// The copy completed but its size does not match the source.
    #[error("backup {} is {actual} bytes, expected {expected}", dst.display())]
    SizeMismatch {
        dst: PathBuf,
        expected: u64,
        actual: u64,
    },
}

/// Result type for the chscan library.
pub type Result<T> = std::result::Result<T, ChscanError>;
