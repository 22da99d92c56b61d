//! Scheme name resolution - pulling a product reference out of free
//! text.
//!
//! Two independent strategies, tried in order:
//!
//! 1. Direct scan: every stored display name is tested against the
//!    query (literal containment, then token overlap). Stops at the
//!    first hit in insertion order, so when one scheme's name is a
//!    prefix of another's, whichever was stored first wins.
//! 2. Generic capture: preposition- and field-boundary-anchored
//!    patterns produce an *unverified* candidate string that the store
//!    lookup must validate independently.

use std::sync::LazyLock;

use regex::Regex;

/// A resolved product reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A stored display name that appeared in the query
    Stored(String),

    /// A captured string not yet validated against the store
    Unverified(String),
}

impl Candidate {
    pub fn name(&self) -> &str {
        match self {
            Candidate::Stored(name) | Candidate::Unverified(name) => name,
        }
    }
}

// "expense ratio of Axis Bluechip Fund?" / "minimum SIP for Quant ELSS"
static CAPTURE_AFTER_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:of|for)\s+([^?]+?)\s*(?:\?|$)").expect("invalid capture pattern")
});

// "Axis Bluechip Fund expense ratio" - name runs up to a field keyword.
// "fund" itself must not be a boundary; scheme names end with it.
static CAPTURE_BEFORE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][A-Za-z\s&]+?)\s+(?i:expense|exit|sip|lock|risk|benchmark|nav|manager|stamp|tax)")
        .expect("invalid capture pattern")
});

/// Minimum overlap between a stored name's tokens and the query before
/// the name counts as mentioned. Guards against single-word false
/// positives like every fund containing "fund".
fn token_overlap_matches(name_lower: &str, query_lower: &str) -> bool {
    let tokens: Vec<&str> = name_lower.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }
    let matched = tokens.iter().filter(|t| query_lower.contains(*t)).count();
    matched >= (tokens.len() - 1).min(2)
}

/// Extract a candidate scheme name from a query.
///
/// `names` is the store's display names in insertion order.
pub fn resolve(query: &str, names: &[String]) -> Option<Candidate> {
    let query_lower = query.to_lowercase();

    // Strategy 1: direct scan of stored names.
    for name in names {
        let name_lower = name.to_lowercase();
        if query_lower.contains(&name_lower) {
            tracing::debug!(name = %name, strategy = "containment", "scheme reference resolved");
            return Some(Candidate::Stored(name.clone()));
        }
        if token_overlap_matches(&name_lower, &query_lower) {
            tracing::debug!(name = %name, strategy = "token_overlap", "scheme reference resolved");
            return Some(Candidate::Stored(name.clone()));
        }
    }

    // Strategy 2: generic capture, only when the scan found nothing.
    for pattern in [&CAPTURE_AFTER_PREPOSITION, &CAPTURE_BEFORE_FIELD] {
        let Some(captures) = pattern.captures(query) else {
            continue;
        };
        let candidate = captures[1].trim();
        if candidate.len() > 5 && candidate.chars().any(|c| c.is_uppercase()) {
            tracing::debug!(candidate, strategy = "capture", "unverified scheme reference");
            return Some(Candidate::Unverified(candidate.to_string()));
        }
    }

    tracing::debug!("no scheme reference found in query");
    None
}
