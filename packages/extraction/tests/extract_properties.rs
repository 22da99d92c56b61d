//! Property tests for the field extraction invariants: extraction never
//! panics, and normalized values keep their field-specific shape.

use fund_extraction::{extract, extract_all, FactField, FactValue};
use proptest::prelude::*;

proptest! {
    /// For any input text, every field extractor returns a value or the
    /// sentinel - it never panics.
    #[test]
    fn extraction_never_panics(text in ".{0,500}") {
        for field in FactField::ALL {
            let _ = extract(*field, &text);
        }
    }

    /// Percentage-shaped fields always come back ending in `%`.
    #[test]
    fn expense_ratio_values_end_in_percent(text in ".{0,500}") {
        if let FactValue::Available(value) = extract(FactField::ExpenseRatio, &text) {
            prop_assert!(value.ends_with('%'), "got {value}");
        }
    }

    /// NAV values stay inside the plausibility window.
    #[test]
    fn nav_values_are_plausible(text in ".{0,500}") {
        if let FactValue::Available(value) = extract(FactField::Nav, &text) {
            let numeric: f64 = value
                .trim_start_matches('₹')
                .parse()
                .expect("NAV values are numeric");
            prop_assert!(numeric > 1.0 && numeric < 100_000.0, "got {numeric}");
        }
    }

    /// Rupee-amount fields are always rendered with the currency prefix.
    #[test]
    fn sip_amounts_carry_currency_prefix(text in ".{0,500}") {
        if let FactValue::Available(value) = extract(FactField::MinimumSip, &text) {
            prop_assert!(value.starts_with('₹'), "got {value}");
            prop_assert!(value[3..].parse::<u64>().is_ok(), "got {value}");
        }
    }

    /// The merged fact set always carries all fourteen fields.
    #[test]
    fn extract_all_is_total(text in ".{0,300}") {
        let facts = extract_all(&text);
        for field in FactField::ALL {
            // Either branch is fine; touching the value proves presence.
            let _ = facts.get(*field).is_available();
        }
    }
}
