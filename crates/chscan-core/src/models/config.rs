//! Configuration structures for the scan pipeline.
//!
//! All extraction constants live here rather than in the strategy code,
//! so runs against a different filing year or keyword list only need a
//! config file, and tests can drive the batch driver with fixtures
//! instead of real paths.

use serde::{Deserialize, Serialize};

/// Main configuration for the chscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChscanConfig {
    /// Input manifest configuration.
    pub manifest: ManifestConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Directory keyword-scan configuration.
    pub scan: ScanConfig,
}

/// Input manifest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Header of the column holding the document path in the input
    /// spreadsheet. Remaining columns pass through to the output.
    pub path_column: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path_column: "File Path".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Year tokens accepted in appointment dates. Dates from other
    /// years are ignored.
    pub year_tokens: Vec<String>,

    /// Keywords tried (in order) when locating the turnover figure.
    pub turnover_keywords: Vec<String>,

    /// First token offset after a keyword considered by the
    /// value-offset scan.
    pub value_min_offset: usize,

    /// Last token offset after a keyword considered by the
    /// value-offset scan.
    pub value_max_offset: usize,

    /// A candidate numeric token must have more than this many digits
    /// once comma separators are stripped.
    pub min_value_digits: usize,

    /// Size, in characters, of the header window searched first for
    /// cover-page fields such as the registration number.
    pub header_window: usize,

    /// Retry over the full text when the header window misses.
    pub header_fallback: bool,

    /// Separator used when joining multiple appointment dates.
    pub join_separator: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            year_tokens: vec!["2023".to_string(), "2024".to_string()],
            turnover_keywords: vec![
                "turnover".to_string(),
                "total revenue".to_string(),
                "net revenue".to_string(),
            ],
            value_min_offset: 1,
            value_max_offset: 3,
            min_value_digits: 3,
            header_window: 500,
            header_fallback: true,
            join_separator: ", ".to_string(),
        }
    }
}

/// Directory keyword-scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Context keywords tried in order; the first keyword found in a
    /// document selects the reported sentence.
    pub keywords: Vec<String>,

    /// File extensions scanned under the parent directory.
    pub extensions: Vec<String>,

    /// Marker word for the unaudited flag (searched in document text).
    pub unaudited_marker: String,

    /// Marker word for the dormant flag (searched in the extracted
    /// company-name string, as the legacy pipeline did).
    pub dormant_marker: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            keywords: vec![
                "cyber".to_string(),
                "cybersecurity".to_string(),
                "data breach".to_string(),
                "it security".to_string(),
                "information security".to_string(),
            ],
            extensions: vec!["html".to_string(), "xhtml".to_string()],
            unaudited_marker: "unaudited".to_string(),
            dormant_marker: "dormant".to_string(),
        }
    }
}

impl ChscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_constants() {
        let config = ChscanConfig::default();
        assert_eq!(config.manifest.path_column, "File Path");
        assert_eq!(config.extraction.year_tokens, ["2023", "2024"]);
        assert_eq!(config.extraction.header_window, 500);
        assert_eq!(config.extraction.min_value_digits, 3);
        assert_eq!(config.scan.keywords[0], "cyber");
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = ChscanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ChscanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.header_window, config.extraction.header_window);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let json = r#"{"extraction": {"header_window": 1000}}"#;
        let config: ChscanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction.header_window, 1000);
        assert_eq!(config.manifest.path_column, "File Path");
    }
}
