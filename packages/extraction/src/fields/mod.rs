//! Field extraction - ordered pattern cascades over raw page text.
//!
//! Each fact field owns an ordered list of candidate patterns, most
//! specific first. Patterns are evaluated in order and the first match
//! that survives its normalizer wins. A field with no surviving match
//! yields [`FactValue::Unavailable`] - extraction never errors and never
//! panics, because the composer downstream renders the sentinel as a
//! user-facing phrase.
//!
//! Per-field extractors are independent: they share no mutable state and
//! each runs against the same text, so [`extract_all`] is just a merge of
//! fourteen isolated lookups.

mod patterns;
mod structure;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::{FactField, FactSet, FactValue, HoldingEntry, RawDocument};

pub use structure::{extract_category, extract_display_name, extract_holdings, extract_sector_allocation};

/// How a matched capture is turned into a stored value.
///
/// Returning `None` rejects the match (failed sanity guard) and lets the
/// cascade fall through to the next, more permissive pattern.
pub(crate) type Normalizer = fn(&str) -> Option<String>;

/// One candidate pattern in a field's cascade.
pub(crate) struct FieldPattern {
    regex: Regex,
    normalize: Normalizer,
}

impl FieldPattern {
    pub(crate) fn new(pattern: &str, normalize: Normalizer) -> Self {
        Self {
            // Patterns are compile-time literals; a failure here is a
            // programming error caught by the test suite.
            regex: Regex::new(pattern).expect("invalid field pattern"),
            normalize,
        }
    }
}

/// Extract a single field from raw page text.
///
/// Returns the normalized value of the first cascade entry that matches
/// and passes its sanity guard, or [`FactValue::Unavailable`].
pub fn extract(field: FactField, text: &str) -> FactValue {
    for (position, pattern) in patterns::cascade(field).iter().enumerate() {
        let Some(captures) = pattern.regex.captures(text) else {
            continue;
        };
        let raw = captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str())
            .unwrap_or_default();

        if let Some(value) = (pattern.normalize)(raw) {
            tracing::debug!(
                field = field.as_str(),
                pattern = position,
                value = %value,
                "field extracted"
            );
            return FactValue::Available(value);
        }
        tracing::trace!(
            field = field.as_str(),
            pattern = position,
            raw = %raw,
            "match rejected by normalizer"
        );
    }

    tracing::trace!(field = field.as_str(), "no pattern matched");
    FactValue::Unavailable
}

/// Run every field extractor against the same text and merge the results.
pub fn extract_all(text: &str) -> FactSet {
    let mut facts = FactSet::empty();
    for field in FactField::ALL {
        facts.set(*field, extract(*field, text));
    }
    facts
}

/// Everything pulled out of one raw document, before normalization.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtraction {
    /// Scheme display name, if a plausible one was found
    pub display_name: Option<String>,

    /// Category keyword detected in the text
    pub category: Option<String>,

    /// One value per fact field
    pub facts: FactSet,

    /// Parsed holdings rows
    pub holdings: Vec<HoldingEntry>,

    /// Sector name to percentage string
    pub sector_allocation: IndexMap<String, String>,
}

/// Extract all facts and structures from a raw document.
pub fn extract_document(doc: &RawDocument) -> DocumentExtraction {
    let extraction = DocumentExtraction {
        display_name: extract_display_name(&doc.text),
        category: extract_category(&doc.text),
        facts: extract_all(&doc.text),
        holdings: extract_holdings(&doc.text),
        sector_allocation: extract_sector_allocation(&doc.text),
    };

    tracing::info!(
        source = %doc.source_locator,
        display_name = extraction.display_name.as_deref().unwrap_or("<none>"),
        facts_available = extraction.facts.available_count(),
        holdings = extraction.holdings.len(),
        "document extracted"
    );

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = "\
Axis Bluechip Fund Direct Growth | Groww
NAV: 21 Nov 2025 ₹42.58
Equity Large Cap fund benchmarked to NIFTY 100 TRI.
Expense ratio: 0.45%
Exit load of 1% if redeemed within 1 year. Stamp duty: 0.005% (from July 1st 2020)
Min. SIP amount: ₹500
Riskometer level is Very High
Fund manager: Shreyash Devalkar
Fund size: ₹33,518Cr
";

    #[test]
    fn extracts_every_field_it_can_find() {
        let facts = extract_all(SAMPLE_PAGE);

        assert_eq!(facts.expense_ratio.value(), Some("0.45%"));
        assert_eq!(facts.minimum_sip.value(), Some("₹500"));
        assert_eq!(facts.nav.value(), Some("₹42.58"));
        assert_eq!(facts.riskometer.value(), Some("Very High"));
        assert_eq!(facts.fund_manager.value(), Some("Shreyash Devalkar"));
        assert_eq!(facts.stamp_duty.value(), Some("0.005% (from July 1st 2020)"));
    }

    #[test]
    fn missing_fields_are_unavailable_not_errors() {
        let facts = extract_all("nothing useful here");
        for field in FactField::ALL {
            assert_eq!(facts.get(*field), &FactValue::Unavailable);
        }
    }

    #[test]
    fn extractors_are_order_insensitive() {
        // Each field reads the same immutable text; running one extractor
        // must not affect another.
        let alone = extract(FactField::ExpenseRatio, SAMPLE_PAGE);
        let merged = extract_all(SAMPLE_PAGE);
        assert_eq!(&alone, merged.get(FactField::ExpenseRatio));
    }

    #[test]
    fn extract_document_assembles_all_parts() {
        let doc = RawDocument::new(SAMPLE_PAGE, "https://groww.in/mutual-funds/axis-bluechip");
        let extraction = extract_document(&doc);

        assert_eq!(
            extraction.display_name.as_deref(),
            Some("Axis Bluechip Fund Direct Growth")
        );
        assert_eq!(extraction.category.as_deref(), Some("Large Cap"));
        assert!(extraction.facts.available_count() >= 6);
    }
}
