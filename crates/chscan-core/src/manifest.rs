//! Input manifest reading.
//!
//! The manifest is a tabular file with one document path per row. All
//! columns, including the path column, pass through unchanged to the
//! output; extracted fields are appended after them.

use std::path::Path;

use tracing::info;

use crate::error::ManifestError;
use crate::models::config::ManifestConfig;
use crate::models::record::DocumentRef;

/// A loaded manifest: the original headers plus one document reference
/// per row.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Original column headers, in file order.
    pub headers: Vec<String>,
    /// One reference per row, in file order.
    pub documents: Vec<DocumentRef>,
}

/// Read a CSV manifest, resolving the configured path column.
pub fn read_manifest(path: &Path, config: &ManifestConfig) -> Result<Manifest, ManifestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        if matches!(e.kind(), csv::ErrorKind::Io(_)) {
            ManifestError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            }
        } else {
            ManifestError::Parse(e)
        }
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(ManifestError::Parse)?
        .iter()
        .map(str::to_string)
        .collect();

    let path_index = headers
        .iter()
        .position(|h| h == &config.path_column)
        .ok_or_else(|| ManifestError::MissingPathColumn(config.path_column.clone()))?;

    let mut documents = Vec::new();
    for row in reader.records() {
        let row = row.map_err(ManifestError::Parse)?;
        let cells: Vec<String> = row.iter().map(str::to_string).collect();
        let doc_path = cells.get(path_index).cloned().unwrap_or_default();
        documents.push(DocumentRef::new(doc_path).with_passthrough(cells));
    }

    info!(path = %path.display(), rows = documents.len(), "loaded manifest");

    Ok(Manifest { headers, documents })
}
