//! Scan command - keyword scan over a directory tree of filings.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;

use chscan_core::scan::{ScanRecord, scan_directory_with};
use chscan_core::CsvSink;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Parent directory containing filing subfolders
    #[arg(short, long)]
    parent: PathBuf,

    /// Output results file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let mut sink = CsvSink::create(&args.output, &ScanRecord::headers())?;

    let outcome = scan_directory_with(&args.parent, &config, |record| {
        sink.write_row(&record.cells()).map_err(Into::into)
    })?;

    sink.write_scan_summary(outcome.files_scanned)?;
    sink.finish()?;

    println!(
        "{} Scanned {} files in {:?}",
        style("✓").green(),
        outcome.files_scanned,
        start.elapsed()
    );
    println!(
        "   {} with keyword matches",
        style(outcome.records.len()).green()
    );
    println!("   Results saved to {}", args.output.display());

    Ok(())
}
