//! CLI application for scanning Companies House accounts filings.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{appointed, config, fields, scan};

/// chscan - Extract structured fields from Companies House accounts filings
#[derive(Parser)]
#[command(name = "chscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract director appointment dates for a manifest of filings
    Appointed(appointed::AppointedArgs),

    /// Extract company name, turnover, and registration number for a manifest
    Fields(fields::FieldsArgs),

    /// Scan a directory tree of filings for context keywords
    Scan(scan::ScanArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Appointed(args) => appointed::run(args, cli.config.as_deref()),
        Commands::Fields(args) => fields::run(args, cli.config.as_deref()),
        Commands::Scan(args) => scan::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
