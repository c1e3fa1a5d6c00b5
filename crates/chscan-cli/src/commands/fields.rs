//! Fields command - company name, turnover, and registration number.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;

use chscan_core::rules::{RuleSet, catalog};
use chscan_core::{BatchDriver, CsvSink, backup, read_manifest};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Input manifest (CSV with a document-path column)
    #[arg(short, long)]
    input: PathBuf,

    /// Output results file
    #[arg(short, long)]
    output: PathBuf,

    /// Backup path for the input manifest; taken before any document
    /// is processed, and the run stops if it cannot be written
    #[arg(short, long)]
    backup: PathBuf,
}

pub fn run(args: FieldsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Backup first. Nothing is read for extraction until the source
    // manifest is safely copied.
    backup(&args.input, &args.backup)?;
    println!(
        "{} Backup created: {}",
        style("ℹ").blue(),
        args.backup.display()
    );

    let manifest = read_manifest(&args.input, &config.manifest)?;
    let rules = RuleSet::new(catalog::account_field_rules(&config.extraction)?);

    let mut headers = manifest.headers.clone();
    headers.extend(rules.field_names().iter().map(|s| s.to_string()));
    let mut sink = CsvSink::create(&args.output, &headers)?;

    let pb = super::progress_bar(manifest.documents.len());
    let driver = BatchDriver::new(rules);
    let records = driver.run_with(&manifest.documents, |record| {
        pb.inc(1);
        sink.write_record(record).map_err(Into::into)
    })?;
    pb.finish_with_message("Complete");
    sink.finish()?;

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!("   Results saved to {}", args.output.display());

    Ok(())
}
