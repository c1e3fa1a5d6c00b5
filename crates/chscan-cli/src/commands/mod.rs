//! CLI subcommands.

pub mod appointed;
pub mod config;
pub mod fields;
pub mod scan;

use chscan_core::ChscanConfig;
use indicatif::{ProgressBar, ProgressStyle};

/// Load configuration from an explicit path, or defaults when none is
/// given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ChscanConfig> {
    match config_path {
        Some(path) => Ok(ChscanConfig::from_file(std::path::Path::new(path))?),
        None => Ok(ChscanConfig::default()),
    }
}

/// Standard per-document progress bar.
pub fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb
}
