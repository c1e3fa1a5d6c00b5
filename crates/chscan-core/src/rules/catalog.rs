//! The default Companies House rule catalog.
//!
//! Field definitions live here as data; the strategy implementations
//! in [`crate::extract`] never mention a concrete field.

use regex::Regex;

use super::patterns::{
    self, COMPANY_NAME, COMPANY_NUMBER_LABEL, NUMBER_BARE, NUMBER_WITH_COLON, REGISTRATION_LABEL,
};
use super::{Rule, RuleSet, Strategy};
use crate::error::ChscanError;
use crate::models::config::ExtractionConfig;

/// Column name for joined director appointment dates.
pub const APPOINTED_DATES: &str = "Appointed Dates";
/// Column name for the company name recovered by legal suffix.
pub const COMPANY_NAME_CHECK: &str = "Company Name Check";
/// Column name for the turnover figure.
pub const TURNOVER: &str = "Turnover";
/// Column name for the registration number.
pub const REGISTRATION_NUMBER: &str = "Registration Number";

/// Rule for the appointment-dates pass: every `appointed <date>`
/// occurrence in the accepted years, joined in order of appearance.
pub fn appointed_rule(config: &ExtractionConfig) -> Result<Rule, ChscanError> {
    let pattern = patterns::appointed_date_pattern(&config.year_tokens)
        .map_err(|e| ChscanError::Config(format!("bad appointed-date pattern: {e}")))?;

    Ok(Rule::new(
        APPOINTED_DATES,
        vec![pattern],
        Strategy::MultiMatchJoin {
            separator: config.join_separator.clone(),
        },
    ))
}

/// Rules for the accounts-field pass: company name, turnover, and
/// registration number.
pub fn account_field_rules(config: &ExtractionConfig) -> Result<Vec<Rule>, ChscanError> {
    let turnover_keywords = config
        .turnover_keywords
        .iter()
        .map(|keyword| Regex::new(&format!("(?i){}", regex::escape(keyword))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ChscanError::Config(format!("bad turnover keyword: {e}")))?;

    Ok(vec![
        Rule::new(
            COMPANY_NAME_CHECK,
            vec![COMPANY_NAME.clone()],
            Strategy::FirstMatch,
        ),
        Rule::new(
            TURNOVER,
            turnover_keywords,
            Strategy::ValueOffset {
                min_offset: config.value_min_offset,
                max_offset: config.value_max_offset,
                min_digits: config.min_value_digits,
            },
        ),
        Rule::new(
            REGISTRATION_NUMBER,
            vec![
                REGISTRATION_LABEL.clone(),
                COMPANY_NUMBER_LABEL.clone(),
                NUMBER_WITH_COLON.clone(),
                NUMBER_BARE.clone(),
            ],
            Strategy::HeaderWindow {
                window: config.header_window,
                fallback: config.header_fallback,
            },
        ),
    ])
}

/// The full default rule set, applied when a run extracts every field.
pub fn default_rules(config: &ExtractionConfig) -> Result<RuleSet, ChscanError> {
    let mut rules = vec![appointed_rule(config)?];
    rules.extend(account_field_rules(config)?);
    Ok(RuleSet::new(rules))
}
