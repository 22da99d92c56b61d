//! Per-field pattern cascades and their normalizers.
//!
//! Cascade order goes from the most specific form seen on fund pages to
//! the most permissive fallback. Normalizers double as sanity guards:
//! a match with an implausible value is rejected so the cascade can keep
//! looking - a false positive is worse than no answer.

use std::sync::LazyLock;

use super::FieldPattern;
use crate::types::FactField;

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

/// Trim and require non-empty.
fn plain(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Percentage: strip a trailing `%` if present, require a numeric body,
/// re-render with the `%` suffix.
fn percent(raw: &str) -> Option<String> {
    let body = raw.trim().trim_end_matches('%').trim();
    body.parse::<f64>().ok()?;
    Some(format!("{body}%"))
}

/// Rupee amount: strip thousands separators, render with the `₹` prefix.
fn rupee_amount(raw: &str) -> Option<String> {
    let body = raw.trim().replace(',', "");
    body.parse::<u64>().ok()?;
    Some(format!("₹{body}"))
}

/// NAV figure: must parse and fall in a plausible range, otherwise the
/// match is discarded rather than propagated.
fn nav_amount(raw: &str) -> Option<String> {
    let body = raw.trim().replace(',', "");
    let value: f64 = body.parse().ok()?;
    if value > 1.0 && value < 100_000.0 {
        Some(format!("₹{body}"))
    } else {
        None
    }
}

/// Fund size keeps the printed magnitude suffix (Cr/L) as-is.
fn fund_size_amount(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| format!("₹{value}"))
}

/// Exit load text: drop stamp-duty spill-over and a dangling `S` left by
/// sentence truncation.
fn exit_load_text(raw: &str) -> Option<String> {
    let mut value = raw.trim();
    if let Some(idx) = value.find("Stamp duty") {
        value = value[..idx].trim();
    }
    let mut value = value.to_string();
    if value.ends_with('S') {
        value = value[..value.len() - 1].trim_end().to_string();
    }
    (!value.is_empty()).then_some(value)
}

/// Fixed value for ELSS schemes: the statutory three-year lock-in.
fn elss_lock_in(_raw: &str) -> Option<String> {
    Some("3 years (ELSS)".to_string())
}

/// Canonical riskometer level from a case-insensitive match.
fn risk_level(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.to_lowercase().as_str() {
        "very high" => Some("Very High".to_string()),
        "moderately high" => Some("Moderately High".to_string()),
        "high" => Some("High".to_string()),
        "moderate" => Some("Moderate".to_string()),
        "very low" => Some("Very Low".to_string()),
        "low" => Some("Low".to_string()),
        _ => None,
    }
}

/// Benchmark names longer than this are assumed to be a bad capture.
fn benchmark_name(raw: &str) -> Option<String> {
    let value = raw.trim();
    (value.len() >= 3 && value.len() < 50).then(|| value.to_string())
}

/// Fund manager captures must look like a person's name.
fn person_name(raw: &str) -> Option<String> {
    let value = raw.trim();
    (value.len() > 5 && value.len() < 40 && value.contains(' ')).then(|| value.to_string())
}

/// Tax section prose: collapse whitespace, require substance, cap length.
fn tax_prose(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() <= 20 {
        return None;
    }
    let capped: String = collapsed.chars().take(300).collect();
    Some(capped)
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

static EXPENSE_RATIO: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(r"(?i)expense\s*ratio[:\s]*([\d.]+%)", percent),
        FieldPattern::new(r"(?i)expense\s*ratio[:\s]*([\d.]+)", percent),
    ]
});

static EXIT_LOAD: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)exit\s*load\s*of\s*([\d.]+%[^.]*year[^.]*?)(?:\.|$)",
            exit_load_text,
        ),
        FieldPattern::new(r"(?i)exit\s*load[:\s]*([\d.]+%[^.]+?)(?:\.|$)", exit_load_text),
        FieldPattern::new(
            r"(?i)([\d.]+%\s*if\s*redeemed\s*within[^.]+?)(?:\.|$)",
            exit_load_text,
        ),
        FieldPattern::new(r"(?i)exit\s*load[:\s]*([^.\n]+)", exit_load_text),
    ]
});

static MINIMUM_SIP: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)min(?:imum|\.)?\s*SIP\s*amount[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(
            r"(?i)minimum\s*SIP[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(r"(?i)min\.?\s*SIP[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)", rupee_amount),
    ]
});

static MINIMUM_LUMPSUM: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)min(?:imum|\.)?\s*lumpsum[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(r"(?i)lumpsum[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)", rupee_amount),
    ]
});

static FIRST_INVESTMENT: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)1st\s*investment[:\s]*(?:is\s*)?(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(
            r"(?i)first\s*investment[:\s]*(?:is\s*)?(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(
            r"(?i)minimum[^.]*1st[^.]*?(?:₹|Rs\.?)\s*([\d,]+)",
            rupee_amount,
        ),
    ]
});

static SUBSEQUENT_INVESTMENT: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)2nd\s*investment\s*onwards[:\s]*(?:it\s*is\s*)?(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(
            r"(?i)2nd\s*investment[:\s]*(?:₹|Rs\.?)?\s*([\d,]+)",
            rupee_amount,
        ),
        FieldPattern::new(
            r"(?i)subsequent\s*investments?[^.]*?(?:₹|Rs\.?)\s*([\d,]+)",
            rupee_amount,
        ),
    ]
});

static LOCK_IN: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)lock[-\s]?in(?:\s*period)?[:\s]*([\d]+\s*(?:year|month|day)s?)",
            plain,
        ),
        FieldPattern::new(r"(?i)\bELSS\b|tax\s*saver", elss_lock_in),
    ]
});

// Level list scanned longest-first so "Moderately High" is never
// reported as "High".
static RISKOMETER: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(r"(?i)\b(very\s+high)\b", risk_level),
        FieldPattern::new(r"(?i)\b(moderately\s+high)\b", risk_level),
        FieldPattern::new(r"(?i)\b(high)\b", risk_level),
        FieldPattern::new(r"(?i)\b(moderate)\b", risk_level),
        FieldPattern::new(r"(?i)\b(very\s+low)\b", risk_level),
        FieldPattern::new(r"(?i)\b(low)\b", risk_level),
    ]
});

static BENCHMARK: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)benchmark(?:ed\s+to)?[:\s]+([A-Za-z0-9][A-Za-z0-9 &\-]*?(?:Index|TRI))\b",
            benchmark_name,
        ),
        FieldPattern::new(
            r"(?i)benchmark[:\s]+([A-Za-z0-9][A-Za-z0-9 &\-]{2,48})",
            benchmark_name,
        ),
    ]
});

static NAV: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        // "NAV: 21 Nov 2025 ₹35.07" - dated quote
        FieldPattern::new(
            r"(?i)NAV[:\s]*\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4}\s*(?:₹|Rs\.?)?\s*([\d,]+(?:\.\d{1,2})?)",
            nav_amount,
        ),
        FieldPattern::new(
            r"(?i)NAV[:\s]*(?:₹|Rs\.?)?\s*([\d,]+(?:\.\d{1,2})?)",
            nav_amount,
        ),
        FieldPattern::new(
            r"(?i)Net\s*Asset\s*Value[:\s]*(?:₹|Rs\.?)?\s*([\d,]+(?:\.\d{1,2})?)",
            nav_amount,
        ),
    ]
});

static FUND_SIZE: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)fund\s*size[:\s]*(?:₹|Rs\.?)?\s*([\d,]+(?:\.\d+)?\s*(?:Cr|Crore)s?)",
            fund_size_amount,
        ),
        FieldPattern::new(
            r"(?i)AUM[:\s]*(?:₹|Rs\.?)?\s*([\d,]+(?:\.\d+)?\s*(?:Cr|Crore|L|Lakh)s?)",
            fund_size_amount,
        ),
    ]
});

static FUND_MANAGER: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        // Name words must stay on one line; `\s` would happily run the
        // capture into the next heading.
        FieldPattern::new(
            r"(?i:fund\s*manager)[:\s]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2})",
            person_name,
        ),
        FieldPattern::new(
            r"(?i:managed\s*by)[:\s]*([A-Z][a-z]+[ \t]+[A-Z][a-z]+)",
            person_name,
        ),
    ]
});

static STAMP_DUTY: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            r"(?i)stamp\s*duty[:\s]*([\d.]+%\s*\(from[^)]+\))",
            plain,
        ),
        FieldPattern::new(r"(?i)stamp\s*duty[:\s]*([\d.]+%)", percent),
    ]
});

static TAX_IMPLICATIONS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![FieldPattern::new(
        r"(?is)tax\s*implications?[:\s]*(.+?)(?:Understand|Check|Fund management|Fund size)",
        tax_prose,
    )]
});

/// The cascade for a given field.
pub(crate) fn cascade(field: FactField) -> &'static [FieldPattern] {
    match field {
        FactField::ExpenseRatio => &EXPENSE_RATIO,
        FactField::ExitLoad => &EXIT_LOAD,
        FactField::MinimumSip => &MINIMUM_SIP,
        FactField::MinimumLumpsum => &MINIMUM_LUMPSUM,
        FactField::FirstInvestment => &FIRST_INVESTMENT,
        FactField::SubsequentInvestment => &SUBSEQUENT_INVESTMENT,
        FactField::LockIn => &LOCK_IN,
        FactField::Riskometer => &RISKOMETER,
        FactField::Benchmark => &BENCHMARK,
        FactField::Nav => &NAV,
        FactField::FundSize => &FUND_SIZE,
        FactField::FundManager => &FUND_MANAGER,
        FactField::StampDuty => &STAMP_DUTY,
        FactField::TaxImplications => &TAX_IMPLICATIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::super::extract;
    use crate::types::{FactField, FactValue};

    fn available(field: FactField, text: &str) -> Option<String> {
        match extract(field, text) {
            FactValue::Available(v) => Some(v),
            FactValue::Unavailable => None,
        }
    }

    #[test]
    fn expense_ratio_always_ends_in_percent() {
        assert_eq!(
            available(FactField::ExpenseRatio, "Expense ratio: 1.04%"),
            Some("1.04%".to_string())
        );
        // Bare number fallback still normalizes to a percentage.
        assert_eq!(
            available(FactField::ExpenseRatio, "expense ratio 0.63 as of March"),
            Some("0.63%".to_string())
        );
    }

    #[test]
    fn exit_load_trims_stamp_duty_spill() {
        let text = "Exit load of 1% if redeemed within 1 year. More text.";
        assert_eq!(
            available(FactField::ExitLoad, text),
            Some("1% if redeemed within 1 year".to_string())
        );

        let spill = "Exit load: 1% if redeemed within 365 days Stamp duty 0.005%.";
        let value = available(FactField::ExitLoad, spill).unwrap();
        assert!(!value.contains("Stamp duty"), "got {value}");
    }

    #[test]
    fn minimum_sip_strips_separators() {
        assert_eq!(
            available(FactField::MinimumSip, "Min. SIP amount ₹1,000"),
            Some("₹1000".to_string())
        );
    }

    #[test]
    fn first_and_subsequent_investment_sentence_form() {
        let text = "Minimum investment amount for 1st investment is 5000 rupees \
                    and for 2nd investment onwards it is 1000 rupees";
        assert_eq!(
            available(FactField::FirstInvestment, text),
            Some("₹5000".to_string())
        );
        assert_eq!(
            available(FactField::SubsequentInvestment, text),
            Some("₹1000".to_string())
        );
    }

    #[test]
    fn lock_in_prefers_explicit_period_over_elss_rule() {
        assert_eq!(
            available(FactField::LockIn, "Lock-in period: 3 years (ELSS scheme)"),
            Some("3 years".to_string())
        );
        assert_eq!(
            available(FactField::LockIn, "This ELSS fund invests in equity."),
            Some("3 years (ELSS)".to_string())
        );
        assert_eq!(available(FactField::LockIn, "open ended fund"), None);
    }

    #[test]
    fn riskometer_matches_longest_level_first() {
        assert_eq!(
            available(FactField::Riskometer, "Riskometer: Very High"),
            Some("Very High".to_string())
        );
        assert_eq!(
            available(FactField::Riskometer, "Riskometer: Moderately High"),
            Some("Moderately High".to_string())
        );
        assert_eq!(
            available(FactField::Riskometer, "classified as low risk"),
            Some("Low".to_string())
        );
    }

    #[test]
    fn nav_discards_implausible_values() {
        assert_eq!(
            available(FactField::Nav, "NAV: ₹42.58"),
            Some("₹42.58".to_string())
        );
        // A year-like figure is out of range and must not leak through
        // when no plausible figure follows.
        assert_eq!(available(FactField::Nav, "NAV: ₹925000"), None);
        assert_eq!(
            available(FactField::Nav, "NAV: 21 Nov 2025 ₹35.07"),
            Some("₹35.07".to_string())
        );
    }

    #[test]
    fn benchmark_keeps_index_suffix_and_rejects_run_ons() {
        assert_eq!(
            available(FactField::Benchmark, "Benchmark: NIFTY 100 TRI"),
            Some("NIFTY 100 TRI".to_string())
        );
        assert_eq!(
            available(FactField::Benchmark, "benchmarked to NIFTY Large Midcap 250 Index funds"),
            Some("NIFTY Large Midcap 250 Index".to_string())
        );
    }

    #[test]
    fn fund_manager_requires_name_shape() {
        assert_eq!(
            available(FactField::FundManager, "Fund manager: Shreyash Devalkar"),
            Some("Shreyash Devalkar".to_string())
        );
        assert_eq!(available(FactField::FundManager, "Fund manager: TBD"), None);
    }

    #[test]
    fn fund_size_keeps_magnitude_suffix() {
        assert_eq!(
            available(FactField::FundSize, "Fund size: ₹33,518Cr"),
            Some("₹33,518Cr".to_string())
        );
    }

    #[test]
    fn tax_implications_capped_and_collapsed() {
        let text = "Tax implications: Returns are taxed at 20% with indexation \
                    benefits when held over three years.\nUnderstand terms";
        let value = available(FactField::TaxImplications, text).unwrap();
        assert!(value.starts_with("Returns are taxed"));
        assert!(value.len() <= 300);
        assert!(!value.contains('\n'));
    }
}
