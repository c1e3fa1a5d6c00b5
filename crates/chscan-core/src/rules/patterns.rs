//! Common regex patterns for Companies House accounts extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Director appointment dates: "appointed 5th October 2023",
    // "appointed 7 July 2024", "appointed 3rd 10 2023". Group 1 is the
    // date without the leading keyword. Year alternation is rebuilt from
    // config at catalog time; this is the default 2023/2024 form.
    pub static ref APPOINTED_DATE: Regex = Regex::new(
        r"(?i)appointed\s(\d{1,2}(?:st|nd|rd|th)?\s(?:[A-Za-z]+|\d{1,2})\s(?:2023|2024))"
    ).unwrap();

    // Company name by legal suffix.
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"(?i)([A-Za-z0-9\s\-\(\)&']+?\s(?:Limited|Ltd|LLP|Incorporated|Inc|Company|Holdings))"
    ).unwrap();

    // Registration number labels, in priority order.
    pub static ref REGISTRATION_LABEL: Regex = Regex::new(
        r"(?i)registration number"
    ).unwrap();

    pub static ref COMPANY_NUMBER_LABEL: Regex = Regex::new(
        r"(?i)company number"
    ).unwrap();

    pub static ref NUMBER_WITH_COLON: Regex = Regex::new(
        r"(?i)number:\s?\d{5,}"
    ).unwrap();

    pub static ref NUMBER_BARE: Regex = Regex::new(
        r"(?i)number\s?\d{5,}"
    ).unwrap();

    // Turnover keywords for the value-offset scan.
    pub static ref TURNOVER: Regex = Regex::new(r"(?i)turnover").unwrap();
    pub static ref TOTAL_REVENUE: Regex = Regex::new(r"(?i)total revenue").unwrap();
    pub static ref NET_REVENUE: Regex = Regex::new(r"(?i)net revenue").unwrap();

    // Sentence-terminal split: full stops and line breaks.
    pub static ref SENTENCE_SPLIT: Regex = Regex::new(r"[.\n]").unwrap();
}

/// Build the appointed-date pattern for a configured set of year tokens.
///
/// Restricting the year alternation keeps dates from unrelated filing
/// periods out of the results.
pub fn appointed_date_pattern(years: &[String]) -> Result<Regex, regex::Error> {
    let alternation = years
        .iter()
        .map(|y| regex::escape(y))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)appointed\s(\d{{1,2}}(?:st|nd|rd|th)?\s(?:[A-Za-z]+|\d{{1,2}})\s(?:{alternation}))"
    ))
}
