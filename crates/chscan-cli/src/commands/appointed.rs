//! Appointed command - director appointment dates for a manifest.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;

use chscan_core::models::record::FieldValue;
use chscan_core::rules::{RuleSet, catalog};
use chscan_core::{BatchDriver, CsvSink, read_manifest};

/// Arguments for the appointed command.
#[derive(Args)]
pub struct AppointedArgs {
    /// Input manifest (CSV with a document-path column)
    #[arg(short, long)]
    input: PathBuf,

    /// Output results file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: AppointedArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let manifest = read_manifest(&args.input, &config.manifest)?;
    println!(
        "{} Loaded {} documents from {}",
        style("ℹ").blue(),
        manifest.documents.len(),
        args.input.display()
    );

    let rules = RuleSet::new(vec![catalog::appointed_rule(&config.extraction)?]);

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

    let with_dates = records
        .iter()
        .filter(|r| {
            matches!(
                r.fields.get(catalog::APPOINTED_DATES),
                Some(FieldValue::Found(_))
            )
        })
        .count();

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} with appointment dates, {} without",
        style(with_dates).green(),
        records.len() - with_dates
    );
    println!("   Results saved to {}", args.output.display());

    Ok(())
}
