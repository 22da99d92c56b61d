//! Query intent classification.
//!
//! A priority-ordered keyword rule set: the opinion gate runs strictly
//! before any field keywords. That ordering is a safety invariant - a
//! query mixing an opinion phrase with a field phrase ("should I buy
//! based on the expense ratio?") must refuse, never answer.

use fund_extraction::FactField;
use serde::{Deserialize, Serialize};

/// Classified purpose of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Advice-seeking; always refused
    Opinionated,

    /// A factual question about one field
    Field(FactField),

    /// Anything else
    General,
}

impl Intent {
    /// Wire label, shared with the answer payload and the fixed
    /// vocabulary the enhancement adapter is validated against.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Opinionated => "opinionated",
            Intent::Field(field) => field.as_str(),
            Intent::General => "general",
        }
    }

    /// Parse a label back into an intent. Out-of-vocabulary input is
    /// `None`, which callers must treat as "keep the deterministic
    /// result".
    pub fn parse_label(label: &str) -> Option<Intent> {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "opinionated" => Some(Intent::Opinionated),
            "general" => Some(Intent::General),
            other => FactField::parse(other).map(Intent::Field),
        }
    }
}

/// Phrases that mark a query as advice-seeking.
const OPINION_KEYWORDS: &[&str] = &[
    "should i",
    "can i buy",
    "should i invest",
    "should i sell",
    "should i hold",
    "should i exit",
    "should i continue",
    "is it good",
    "is it bad",
    "recommend",
    "advice",
    "suggestion",
    "suggest",
    "worth investing",
    "good investment",
    "bad investment",
    "best",
    "better",
    "which one",
];

/// Per-field keyword sets, checked in [`FactField`] declaration order.
/// First field whose set matches wins.
const FIELD_KEYWORDS: &[(FactField, &[&str])] = &[
    (
        FactField::ExpenseRatio,
        &["expense ratio", "expense", "fees", "charges"],
    ),
    (
        FactField::ExitLoad,
        &["exit load", "exit charge", "redemption charge"],
    ),
    (
        FactField::MinimumSip,
        &["minimum sip", "min sip", "sip amount", "sip minimum"],
    ),
    (
        FactField::MinimumLumpsum,
        &["minimum lumpsum", "min lumpsum", "lumpsum"],
    ),
    (
        FactField::FirstInvestment,
        &["first investment", "1st investment"],
    ),
    (
        FactField::SubsequentInvestment,
        &["subsequent investment", "2nd investment"],
    ),
    (
        FactField::LockIn,
        &["lock-in", "lock in", "lockin", "elss", "holding period"],
    ),
    (
        FactField::Riskometer,
        &["riskometer", "risk meter", "risk level", "risk rating", "risk"],
    ),
    (FactField::Benchmark, &["benchmark", "index"]),
    (
        FactField::Nav,
        &["nav", "net asset value", "current value", "price"],
    ),
    (
        FactField::FundSize,
        &["fund size", "aum", "assets under management"],
    ),
    (
        FactField::FundManager,
        &["fund manager", "who manages", "managed by", "manager"],
    ),
    (FactField::StampDuty, &["stamp duty", "stamp"]),
    (
        FactField::TaxImplications,
        &["tax implication", "taxation", "tax"],
    ),
];

/// Classify a query into the fixed intent vocabulary.
///
/// This deterministic classifier is the system of record; an enhancement
/// adapter may propose a different label but can never widen the
/// vocabulary, and can never downgrade an `Opinionated` result.
pub fn classify(query: &str) -> Intent {
    let query_lower = query.to_lowercase();

    if let Some(keyword) = OPINION_KEYWORDS.iter().find(|k| query_lower.contains(*k)) {
        tracing::debug!(keyword, "query classified as opinionated");
        return Intent::Opinionated;
    }

    for (field, keywords) in FIELD_KEYWORDS {
        if let Some(keyword) = keywords.iter().find(|k| query_lower.contains(*k)) {
            tracing::debug!(field = field.as_str(), keyword, "query classified");
            return Intent::Field(*field);
        }
    }

    tracing::debug!("query classified as general");
    Intent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opinion_gate_runs_before_field_keywords() {
        // Contains both an opinion phrase and a field phrase; the
        // opinion gate must win.
        assert_eq!(
            classify("Should I invest based on the expense ratio of Fund X?"),
            Intent::Opinionated
        );
        assert_eq!(
            classify("Is it good to buy looking at the exit load?"),
            Intent::Opinionated
        );
    }

    #[test]
    fn field_queries_classify_by_keyword() {
        assert_eq!(
            classify("Expense ratio of Axis Bluechip Fund?"),
            Intent::Field(FactField::ExpenseRatio)
        );
        assert_eq!(
            classify("What is the exit load for HDFC Large Cap?"),
            Intent::Field(FactField::ExitLoad)
        );
        assert_eq!(
            classify("minimum sip for SBI Small Cap"),
            Intent::Field(FactField::MinimumSip)
        );
        assert_eq!(
            classify("ELSS lock-in period?"),
            Intent::Field(FactField::LockIn)
        );
        assert_eq!(
            classify("Who manages Nippon India Growth Fund"),
            Intent::Field(FactField::FundManager)
        );
    }

    #[test]
    fn multi_field_queries_use_declaration_order() {
        // Mentions both expense and exit load; expense ratio is declared
        // first and wins the tie.
        assert_eq!(
            classify("expense ratio and exit load of Fund X"),
            Intent::Field(FactField::ExpenseRatio)
        );
    }

    #[test]
    fn unmatched_queries_are_general() {
        assert_eq!(classify("Tell me about this fund"), Intent::General);
        assert_eq!(classify(""), Intent::General);
    }

    #[test]
    fn labels_round_trip_through_the_fixed_vocabulary() {
        assert_eq!(Intent::parse_label("opinionated"), Some(Intent::Opinionated));
        assert_eq!(Intent::parse_label("general"), Some(Intent::General));
        assert_eq!(
            Intent::parse_label("expense_ratio"),
            Some(Intent::Field(FactField::ExpenseRatio))
        );
        assert_eq!(Intent::parse_label(" NAV "), Some(Intent::Field(FactField::Nav)));
        // Out-of-vocabulary labels never become intents.
        assert_eq!(Intent::parse_label("buy_recommendation"), None);
    }
}
