//! Field extraction strategies.
//!
//! Every function here is pure: given normalized text and a rule, it
//! produces one [`FieldValue`] and touches nothing else. The rule set
//! is shared read-only across documents, so nothing in this module
//! holds state between calls.

use tracing::debug;

use crate::models::record::{ExtractionResult, FieldValue};
use crate::rules::patterns::SENTENCE_SPLIT;
use crate::rules::{Rule, RuleSet, Strategy};

/// Apply one rule to normalized text.
pub fn apply_rule(text: &str, rule: &Rule) -> FieldValue {
    match &rule.strategy {
        Strategy::FirstMatch => first_match(text, rule),
        Strategy::MultiMatchJoin { separator } => multi_match_join(text, rule, separator),
        Strategy::ValueOffset {
            min_offset,
            max_offset,
            min_digits,
        } => value_offset(text, rule, *min_offset, *max_offset, *min_digits),
        Strategy::HeaderWindow { window, fallback } => {
            header_window(text, rule, *window, *fallback)
        }
        Strategy::SentenceContaining { keywords } => sentence_containing(text, keywords),
    }
}

/// Apply a full rule set to one document's text, producing one result
/// per field in rule order.
pub fn apply_rules(text: &str, rules: &RuleSet) -> ExtractionResult {
    let mut result = ExtractionResult::new();
    for rule in rules.rules() {
        let value = apply_rule(text, rule);
        debug!(field = %rule.field, found = value.is_found(), "applied rule");
        result.push(rule.field.clone(), value);
    }
    result
}

/// Case-insensitive marker presence in document text. Backs derived
/// boolean flags such as "unaudited".
pub fn text_contains(text: &str, marker: &str) -> bool {
    text.to_lowercase().contains(&marker.to_lowercase())
}

/// Patterns in priority order; the first pattern that matches anywhere
/// wins and later patterns are never consulted.
fn first_match(text: &str, rule: &Rule) -> FieldValue {
    for pattern in &rule.patterns {
        if let Some(caps) = pattern.captures(text) {
            let matched = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            return FieldValue::Found(matched.to_string());
        }
    }
    FieldValue::NotFound
}

/// All matches of the first pattern, joined in order of appearance.
fn multi_match_join(text: &str, rule: &Rule, separator: &str) -> FieldValue {
    let Some(pattern) = rule.patterns.first() else {
        return FieldValue::NotFound;
    };

    let matches: Vec<&str> = pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str())
        .collect();

    if matches.is_empty() {
        FieldValue::NotFound
    } else {
        FieldValue::Found(matches.join(separator))
    }
}

/// Scan the tokens after the first occurrence of each keyword for a
/// plausible figure. A token qualifies if, after stripping comma
/// separators, every character is a digit and more than `min_digits`
/// remain; anything shorter is assumed to be a reference or footnote
/// number. Only the first occurrence of each keyword is examined.
fn value_offset(
    text: &str,
    rule: &Rule,
    min_offset: usize,
    max_offset: usize,
    min_digits: usize,
) -> FieldValue {
    for pattern in &rule.patterns {
        let Some(m) = pattern.find(text) else {
            continue;
        };

        let tokens: Vec<&str> = text[m.start()..].split_whitespace().collect();
        for offset in min_offset..=max_offset {
            let Some(token) = tokens.get(offset) else {
                break;
            };
            let stripped = token.replace(',', "");
            if !stripped.is_empty()
                && stripped.chars().all(|c| c.is_ascii_digit())
                && stripped.len() > min_digits
            {
                return FieldValue::Found((*token).to_string());
            }
        }
        // Keyword present but no qualifying value nearby; the next
        // keyword may sit closer to the actual figure.
    }
    FieldValue::NotFound
}

/// First-match restricted to the first `window` characters, where
/// cover-page fields normally appear. Falls back to the full text when
/// configured and the window misses.
fn header_window(text: &str, rule: &Rule, window: usize, fallback: bool) -> FieldValue {
    let end = text
        .char_indices()
        .nth(window)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    match first_match(&text[..end], rule) {
        FieldValue::NotFound if fallback => first_match(text, rule),
        value => value,
    }
}

/// Split into sentence-like units on terminal punctuation and line
/// breaks; return the first trimmed unit containing a keyword.
/// Keywords are tried in declared order against the whole unit list.
fn sentence_containing(text: &str, keywords: &[String]) -> FieldValue {
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        for unit in SENTENCE_SPLIT.split(text) {
            if unit.to_lowercase().contains(&keyword) {
                return FieldValue::Found(unit.trim().to_string());
            }
        }
    }
    FieldValue::NotFound
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::*;
    use crate::models::config::ExtractionConfig;
    use crate::rules::catalog;

    fn rule(patterns: &[&str], strategy: Strategy) -> Rule {
        Rule::new(
            "test",
            patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
            strategy,
        )
    }

    #[test]
    fn test_first_match_prefers_earlier_pattern() {
        // The second pattern matches earlier in the text, but pattern
        // order wins over position.
        let r = rule(&["beta", "alpha"], Strategy::FirstMatch);
        assert_eq!(
            apply_rule("alpha then beta", &r),
            FieldValue::Found("beta".into())
        );
    }

    #[test]
    fn test_first_match_falls_back_when_earlier_misses() {
        let r = rule(&["gamma", "alpha"], Strategy::FirstMatch);
        assert_eq!(
            apply_rule("alpha then beta", &r),
            FieldValue::Found("alpha".into())
        );
    }

    #[test]
    fn test_no_match_is_not_found() {
        let r = rule(&["gamma"], Strategy::FirstMatch);
        assert_eq!(apply_rule("alpha then beta", &r), FieldValue::NotFound);
    }

    #[test]
    fn test_multi_match_join_preserves_order() {
        let config = ExtractionConfig::default();
        let r = catalog::appointed_rule(&config).unwrap();
        let text =
            "mr smith was appointed 5th october 2023 and ms jones was appointed 7th july 2024";
        assert_eq!(
            apply_rule(text, &r),
            FieldValue::Found("5th october 2023, 7th july 2024".into())
        );
    }

    #[test]
    fn test_multi_match_join_single_occurrence() {
        let config = ExtractionConfig::default();
        let r = catalog::appointed_rule(&config).unwrap();
        assert_eq!(
            apply_rule("appointed 1st march 2024", &r),
            FieldValue::Found("1st march 2024".into())
        );
    }

    #[test]
    fn test_value_offset_finds_figure_after_keyword() {
        let r = rule(
            &["turnover"],
            Strategy::ValueOffset {
                min_offset: 1,
                max_offset: 3,
                min_digits: 3,
            },
        );
        assert_eq!(
            apply_rule("turnover for the period 1,234,567 and costs", &r),
            FieldValue::NotFound,
            "figure beyond the offset window must not match"
        );
        assert_eq!(
            apply_rule("turnover was approximately 1,234,567", &r),
            FieldValue::Found("1,234,567".into())
        );
    }

    #[test]
    fn test_value_offset_rejects_short_tokens() {
        let r = rule(
            &["turnover"],
            Strategy::ValueOffset {
                min_offset: 1,
                max_offset: 3,
                min_digits: 3,
            },
        );
        // 123 has only three digits: a footnote number, not a figure.
        assert_eq!(apply_rule("turnover 123 45 67", &r), FieldValue::NotFound);
    }

    #[test]
    fn test_value_offset_rejects_mixed_tokens() {
        let r = rule(
            &["turnover"],
            Strategy::ValueOffset {
                min_offset: 1,
                max_offset: 3,
                min_digits: 3,
            },
        );
        assert_eq!(
            apply_rule("turnover note4 12a34 12.34", &r),
            FieldValue::NotFound
        );
    }

    #[test]
    fn test_value_offset_uses_first_keyword_occurrence_only() {
        let r = rule(
            &["turnover"],
            Strategy::ValueOffset {
                min_offset: 1,
                max_offset: 3,
                min_digits: 3,
            },
        );
        // The first occurrence has no nearby figure; the second does,
        // but only the first is scanned.
        assert_eq!(
            apply_rule("turnover policy note turnover was 98,765 overall", &r),
            FieldValue::NotFound
        );
    }

    #[test]
    fn test_value_offset_tries_next_keyword() {
        let r = rule(
            &["turnover", "total revenue"],
            Strategy::ValueOffset {
                min_offset: 1,
                max_offset: 3,
                min_digits: 3,
            },
        );
        assert_eq!(
            apply_rule("turnover policy as stated total revenue of 45,000 gross", &r),
            FieldValue::Found("45,000".into())
        );
    }

    #[test]
    fn test_header_window_restricts_search() {
        let r = rule(
            &["registration number"],
            Strategy::HeaderWindow {
                window: 20,
                fallback: false,
            },
        );
        let text = format!("{} registration number 0123", "x".repeat(30));
        assert_eq!(apply_rule(&text, &r), FieldValue::NotFound);
    }

    #[test]
    fn test_header_window_falls_back_to_full_text() {
        let r = rule(
            &["registration number"],
            Strategy::HeaderWindow {
                window: 20,
                fallback: true,
            },
        );
        let text = format!("{} registration number 0123", "x".repeat(30));
        assert_eq!(
            apply_rule(&text, &r),
            FieldValue::Found("registration number".into())
        );
    }

    #[test]
    fn test_header_window_hit_inside_window() {
        let r = rule(
            &["company number"],
            Strategy::HeaderWindow {
                window: 500,
                fallback: true,
            },
        );
        assert_eq!(
            apply_rule("acme ltd company number 01234567 annual accounts", &r),
            FieldValue::Found("company number".into())
        );
    }

    #[test]
    fn test_sentence_containing_trims_unit() {
        let r = Rule::new(
            "test",
            vec![],
            Strategy::SentenceContaining {
                keywords: vec!["cyber".into()],
            },
        );
        let text = "Revenue grew. Cyber security spend increased. Net loss narrowed.";
        assert_eq!(
            apply_rule(text, &r),
            FieldValue::Found("Cyber security spend increased".into())
        );
    }

    #[test]
    fn test_sentence_containing_keyword_priority() {
        let r = Rule::new(
            "test",
            vec![],
            Strategy::SentenceContaining {
                keywords: vec!["data breach".into(), "cyber".into()],
            },
        );
        // "cyber" appears first in the text, but "data breach" is the
        // higher-priority keyword.
        let text = "Cyber posture improved.\nA data breach was reported.";
        assert_eq!(
            apply_rule(text, &r),
            FieldValue::Found("A data breach was reported".into())
        );
    }

    #[test]
    fn test_sentence_containing_splits_on_newlines() {
        let r = Rule::new(
            "test",
            vec![],
            Strategy::SentenceContaining {
                keywords: vec!["it security".into()],
            },
        );
        let text = "first line\nspend on IT security rose\nlast line";
        assert_eq!(
            apply_rule(text, &r),
            FieldValue::Found("spend on IT security rose".into())
        );
    }

    #[test]
    fn test_apply_rules_produces_one_value_per_rule() {
        let config = ExtractionConfig::default();
        let rules = catalog::default_rules(&config).unwrap();
        let result = apply_rules("no relevant content here", &rules);
        assert_eq!(result.len(), rules.len());
        assert!(result.iter().all(|(_, v)| *v == FieldValue::NotFound));
    }

    #[test]
    fn test_text_contains_is_case_insensitive() {
        assert!(text_contains("Accounts are UNAUDITED", "unaudited"));
        assert!(!text_contains("audited accounts", "unaudited"));
    }
}
