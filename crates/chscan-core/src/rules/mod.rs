//! Extraction rules: field names bound to patterns and a match strategy.
//!
//! Rules are data, not code. A [`RuleSet`] is built once at process
//! start (normally from [`ExtractionConfig`](crate::models::config::ExtractionConfig)
//! via [`catalog`]) and shared read-only across every document in the
//! run. Adding a field means adding a rule, not touching the strategy
//! implementations in [`crate::extract`].

pub mod catalog;
pub mod patterns;

pub use catalog::default_rules;

use regex::Regex;

/// How a rule turns pattern matches into a field value.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Return the first substring matched by any pattern, trying
    /// patterns in declared order. Later patterns are fallbacks, not
    /// alternatives merged together.
    FirstMatch,

    /// Find every match of the first pattern and join them with the
    /// separator, preserving order of appearance. The only strategy
    /// that aggregates multiple occurrences.
    MultiMatchJoin { separator: String },

    /// Locate the first keyword occurrence, then scan the tokens at
    /// offsets `min_offset..=max_offset` after it for the first purely
    /// numeric token (after stripping comma separators) longer than
    /// `min_digits` digits. Short tokens are rejected so footnote and
    /// reference numbers do not pass as financial figures.
    ValueOffset {
        min_offset: usize,
        max_offset: usize,
        min_digits: usize,
    },

    /// Restrict the search to the first `window` characters of the
    /// text, where cover-page fields usually sit. With `fallback`, a
    /// miss in the window retries as an unrestricted first-match pass.
    HeaderWindow { window: usize, fallback: bool },

    /// Split the text into sentence-like units and return the first
    /// unit containing a keyword, trimmed. Keywords are tried in
    /// declared order; the first keyword with any hit wins.
    SentenceContaining { keywords: Vec<String> },
}

/// A named field bound to ordered patterns and a strategy.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Output column name for this field.
    pub field: String,
    /// Patterns in priority order. Unused by `SentenceContaining`,
    /// which carries its keywords in the strategy.
    pub patterns: Vec<Regex>,
    /// Match strategy.
    pub strategy: Strategy,
}

impl Rule {
    pub fn new(field: impl Into<String>, patterns: Vec<Regex>, strategy: Strategy) -> Self {
        Self {
            field: field.into(),
            patterns,
            strategy,
        }
    }
}

/// An ordered, read-only collection of rules applied per document.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Output column names, in rule order.
    pub fn field_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.field.as_str()).collect()
    }
}
