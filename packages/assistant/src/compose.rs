//! Answer composition - turning (intent, resolution) pairs into
//! citation-bearing factual answers, refusals or clarifications.
//!
//! Hard policy: facts only. Opinionated queries get a fixed refusal and
//! any resolved record is ignored entirely. When a record is present its
//! own source locator is always the citation; the generic educational
//! link only appears when there is no record to cite.

use fund_extraction::{FactField, Scheme, SchemeId};
use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Landing page cited when no specific scheme record applies.
pub const GENERAL_LINK: &str = "https://groww.in/mutual-funds";

/// Educational links per field, cited on clarification answers.
fn educational_link(field: FactField) -> &'static str {
    match field {
        FactField::MinimumSip => "https://groww.in/blog/what-is-sip",
        FactField::ExpenseRatio => "https://groww.in/blog/expense-ratio-in-mutual-funds",
        FactField::ExitLoad => "https://groww.in/blog/exit-load-in-mutual-funds",
        FactField::Riskometer => "https://groww.in/blog/riskometer-in-mutual-funds",
        _ => GENERAL_LINK,
    }
}

const REFUSAL_TEXT: &str = "I can only provide factual information about mutual fund schemes, \
not investment advice. For personalized investment recommendations, please consult with a \
certified financial advisor. I can help you with factual queries like expense ratios, exit \
loads, minimum SIP amounts, lock-in periods, riskometer ratings, benchmarks, and NAVs.";

const CAPABILITY_TEXT: &str = "I can answer factual questions about mutual fund schemes - \
expense ratios, exit loads, minimum SIP amounts, lock-in periods, riskometer ratings, \
benchmarks, NAVs, fund sizes and fund managers. Ask about a specific scheme to get started.";

/// The answer payload returned to the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub source_locator: String,
    pub intent_label: String,
    pub record_id: Option<SchemeId>,
}

/// What resolution produced for this query.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    /// A stored record was found
    Resolved(Scheme),

    /// A candidate name was extracted but matched nothing in the store
    NotFound { candidate: String },

    /// No scheme reference could be extracted at all
    NoCandidate,
}

/// Compose the final answer for a classified, resolved query.
pub fn compose(intent: Intent, outcome: &ResolutionOutcome) -> Answer {
    match intent {
        // Refusal is unconditional: even a resolved record is ignored.
        Intent::Opinionated => Answer {
            answer: REFUSAL_TEXT.to_string(),
            source_locator: GENERAL_LINK.to_string(),
            intent_label: intent.label().to_string(),
            record_id: None,
        },

        Intent::Field(field) => match outcome {
            ResolutionOutcome::Resolved(scheme) => Answer {
                answer: render_field(field, scheme),
                source_locator: scheme.source_locator.clone(),
                intent_label: intent.label().to_string(),
                record_id: Some(scheme.id.clone()),
            },
            ResolutionOutcome::NotFound { candidate } => Answer {
                answer: format!(
                    "I couldn't find information about '{candidate}' in our records. \
                     Please check the scheme name and try again, or visit Groww to \
                     search for the scheme."
                ),
                source_locator: GENERAL_LINK.to_string(),
                intent_label: intent.label().to_string(),
                record_id: None,
            },
            ResolutionOutcome::NoCandidate => Answer {
                answer: format!(
                    "I can help you with {} information, but I need to know which \
                     mutual fund scheme you're asking about. Please specify the \
                     scheme name in your question.",
                    field.label().to_lowercase()
                ),
                source_locator: educational_link(field).to_string(),
                intent_label: intent.label().to_string(),
                record_id: None,
            },
        },

        Intent::General => match outcome {
            ResolutionOutcome::Resolved(scheme) => Answer {
                answer: render_general(scheme),
                source_locator: scheme.source_locator.clone(),
                intent_label: intent.label().to_string(),
                record_id: Some(scheme.id.clone()),
            },
            _ => Answer {
                answer: CAPABILITY_TEXT.to_string(),
                source_locator: GENERAL_LINK.to_string(),
                intent_label: intent.label().to_string(),
                record_id: None,
            },
        },
    }
}

/// Render one field's value, or its field-specific "not available"
/// phrase. The citation stays the scheme's own source either way.
fn render_field(field: FactField, scheme: &Scheme) -> String {
    let name = &scheme.display_name;
    let value = scheme.facts.get(field).value();

    match field {
        FactField::MinimumSip => render_minimum_sip(scheme),
        FactField::LockIn => render_lock_in(scheme),
        FactField::ExitLoad => match value {
            Some(v) => format!("The exit load for {name} is: {v}."),
            None => format!(
                "Exit load information for {name} is not available. \
                 Please check the scheme document."
            ),
        },
        FactField::Nav => match value {
            Some(v) => format!("The NAV (Net Asset Value) of {name} is {v}."),
            None => format!("NAV information for {name} is not available in our records."),
        },
        FactField::FundSize => match value {
            Some(v) => format!("The fund size (AUM) of {name} is {v}."),
            None => format!("Fund size information for {name} is not available in our records."),
        },
        FactField::Riskometer => match value {
            Some(v) => format!("The riskometer rating for {name} is: {v}."),
            None => format!(
                "Riskometer information for {name} is not available in our records."
            ),
        },
        FactField::TaxImplications => match value {
            Some(v) => format!("Tax implications for {name}: {v}"),
            None => format!(
                "Tax information for {name} is not available in our records."
            ),
        },
        _ => match value {
            Some(v) => format!("The {} of {name} is {v}.", field.label().to_lowercase()),
            None => format!(
                "{} information for {name} is not available in our records.",
                field.label()
            ),
        },
    }
}

/// SIP answers aggregate the related investment minimums, falling back
/// to the lumpsum figure when no SIP amount was extracted.
fn render_minimum_sip(scheme: &Scheme) -> String {
    let name = &scheme.display_name;
    let facts = &scheme.facts;

    let mut parts = Vec::new();
    if let Some(v) = facts.minimum_sip.value() {
        parts.push(format!("Minimum SIP: {v}"));
    }
    if let Some(v) = facts.first_investment.value() {
        parts.push(format!("First investment: {v}"));
    }
    if let Some(v) = facts.subsequent_investment.value() {
        parts.push(format!("Subsequent investments: {v}"));
    }

    if !parts.is_empty() {
        return format!("For {name}: {}.", parts.join(", "));
    }

    match facts.minimum_lumpsum.value() {
        Some(v) => format!(
            "Minimum lumpsum investment for {name} is {v}. SIP information is not available."
        ),
        None => format!("Minimum SIP information for {name} is not available in our records."),
    }
}

/// Lock-in answers carry the statutory ELSS note where it applies.
fn render_lock_in(scheme: &Scheme) -> String {
    let name = &scheme.display_name;
    let name_lower = name.to_lowercase();
    let is_elss_name = name_lower.contains("elss") || name_lower.contains("tax saver");

    match scheme.facts.lock_in.value() {
        Some(v) => {
            let mut answer = format!("The lock-in period for {name} is: {v}.");
            if v.to_uppercase().contains("ELSS") || is_elss_name {
                answer.push_str(
                    " ELSS (Equity Linked Savings Scheme) funds have a mandatory \
                     3-year lock-in period as per tax regulations.",
                );
            }
            answer
        }
        None if is_elss_name => format!(
            "{name} is an ELSS fund with a 3-year lock-in period as per \
             Section 80C of the Income Tax Act."
        ),
        None => format!(
            "Lock-in period information for {name} is not available. \
             Most non-ELSS funds do not have a lock-in period."
        ),
    }
}

/// Best-effort summary of the first few available facts.
fn render_general(scheme: &Scheme) -> String {
    let name = &scheme.display_name;
    let highlights: Vec<String> = scheme
        .facts
        .available()
        .take(3)
        .map(|(field, value)| format!("{}: {}", field.label(), value))
        .collect();

    if highlights.is_empty() {
        format!(
            "I found information about {name}. What would you like to know? \
             (expense ratio, exit load, minimum SIP, lock-in, riskometer, \
             benchmark, NAV, etc.)"
        )
    } else {
        format!(
            "Here's what I have for {name}: {}. Ask about a specific detail \
             for more.",
            highlights.join("; ")
        )
    }
}
