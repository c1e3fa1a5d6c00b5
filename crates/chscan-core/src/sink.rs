//! Result sink: the output table.
//!
//! Rows are written and flushed as they are produced, so a crash late
//! in a long run leaves everything processed so far on disk. The
//! legacy pipeline wrote once at the end and could lose an entire run.
//! Any write failure is fatal: the run must not report success with
//! results missing from disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SinkError;
use crate::models::record::OutputRecord;

/// Incremental CSV sink.
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvSink {
    /// Create the output file and write the header row: pass-through
    /// headers first, then one column per extracted field.
    pub fn create(path: &Path, headers: &[String]) -> Result<Self, SinkError> {
        // Flexible: the scan summary row is shorter than the header.
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| SinkError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?;

        let mut sink = Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        };
        sink.writer.write_record(headers)?;
        sink.writer.flush()?;
        Ok(sink)
    }

    /// Append one record and flush it to disk.
    pub fn write_record(&mut self, record: &OutputRecord) -> Result<(), SinkError> {
        self.write_row(&record.cells())
    }

    /// Append one raw row and flush it to disk.
    pub fn write_row(&mut self, cells: &[String]) -> Result<(), SinkError> {
        self.writer.write_record(cells)?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append the trailing summary row reporting how many documents
    /// were scanned.
    pub fn write_scan_summary(&mut self, files_scanned: usize) -> Result<(), SinkError> {
        self.writer
            .write_record(["Total Files Scanned", &files_scanned.to_string()])?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Final flush. Logs where the results landed.
    pub fn finish(mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        info!(path = %self.path.display(), rows = self.rows_written, "results saved");
        Ok(())
    }
}
