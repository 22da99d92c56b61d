//! Enhancement adapter - optional external text generation.
//!
//! The [`Enhancer`] trait isolates the external service behind a single
//! text-in/text-out call so the deterministic path stays fully testable
//! without network access. Every use here is advisory: proposals are
//! validated against the fixed vocabulary or the store, calls are
//! time-boxed, and any failure falls back to the deterministic result
//! with nothing surfaced to the caller.

use std::time::Duration;

use async_trait::async_trait;

use fund_extraction::{FactField, Scheme};

use crate::error::EnhancerError;
use crate::intent::Intent;

/// Default time box for one adapter call.
pub const DEFAULT_ENHANCER_TIMEOUT: Duration = Duration::from_secs(8);

/// External text-generation collaborator.
///
/// Implementations wrap a specific provider and convert its failures
/// into [`EnhancerError`]; the assistant never sees provider types.
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, EnhancerError>;
}

/// Run one adapter call under the time box, flattening every failure
/// into `None` after logging it.
async fn complete_bounded(
    enhancer: &dyn Enhancer,
    timeout: Duration,
    prompt: &str,
) -> Option<String> {
    let result = tokio::time::timeout(timeout, enhancer.complete(prompt)).await;

    let response = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "enhancer call failed, using deterministic path");
            return None;
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "enhancer call timed out, using deterministic path"
            );
            return None;
        }
    };

    let trimmed = response.trim();
    if trimmed.is_empty() {
        tracing::warn!("enhancer returned empty output, using deterministic path");
        return None;
    }
    Some(trimmed.to_string())
}

/// Ask the adapter to classify the query.
///
/// Only labels inside the fixed vocabulary are accepted; anything else
/// is discarded so the deterministic classification stands.
pub async fn propose_intent(
    enhancer: &dyn Enhancer,
    timeout: Duration,
    query: &str,
) -> Option<Intent> {
    let categories: Vec<&str> = FactField::ALL
        .iter()
        .map(|f| f.as_str())
        .chain(["opinionated", "general"])
        .collect();

    let prompt = format!(
        "Classify this mutual fund query into one of these categories:\n{}\n\n\
         Query: \"{query}\"\n\n\
         Use \"opinionated\" if the query asks for advice or a recommendation. \
         Return only the category name, nothing else.",
        categories.join("\n")
    );

    let response = complete_bounded(enhancer, timeout, &prompt).await?;
    match Intent::parse_label(&response) {
        Some(intent) => {
            tracing::debug!(label = intent.label(), "enhancer proposed intent");
            Some(intent)
        }
        None => {
            tracing::warn!(label = %response, "enhancer proposed out-of-vocabulary label, ignored");
            None
        }
    }
}

/// Ask the adapter to pull the scheme name out of the query.
///
/// The proposal is validated against stored names (containment or
/// two-token overlap); a free-standing candidate is only kept when it is
/// long enough to plausibly be a name.
pub async fn propose_scheme_name(
    enhancer: &dyn Enhancer,
    timeout: Duration,
    query: &str,
    known_names: &[String],
) -> Option<String> {
    let sample: Vec<&str> = known_names.iter().take(20).map(String::as_str).collect();
    let prompt = format!(
        "Extract the mutual fund scheme name from this query. If no scheme name \
         is found, return \"NONE\".\n\n\
         Available scheme names (examples):\n{}\n\n\
         Query: \"{query}\"\n\n\
         Return only the scheme name if found, or \"NONE\" if not found. Do not \
         include any explanation.",
        sample.join(", ")
    );

    let response = complete_bounded(enhancer, timeout, &prompt).await?;
    if response.eq_ignore_ascii_case("none") {
        return None;
    }

    let response_lower = response.to_lowercase();
    for name in known_names {
        let name_lower = name.to_lowercase();
        if response_lower.contains(&name_lower) || name_lower.contains(&response_lower) {
            return Some(name.clone());
        }
        let response_tokens: Vec<&str> = response_lower.split_whitespace().collect();
        let overlap = name_lower
            .split_whitespace()
            .filter(|t| response_tokens.contains(t))
            .count();
        if overlap >= 2 {
            return Some(name.clone());
        }
    }

    (response.len() > 5).then_some(response)
}

/// Ask the adapter to paraphrase a field answer from the record's facts.
///
/// Used only for field intents with a resolved record. The adapter sees
/// the facts verbatim and is told to stick to them; its output replaces
/// the deterministic sentence but never the answer shape.
pub async fn paraphrase_fact_answer(
    enhancer: &dyn Enhancer,
    timeout: Duration,
    query: &str,
    scheme: &Scheme,
    field: FactField,
) -> Option<String> {
    let facts_json = serde_json::to_string_pretty(&scheme.facts).ok()?;
    let prompt = format!(
        "You are a factual assistant for mutual fund information. Answer the \
         user's query using ONLY the provided facts. Do not provide investment \
         advice.\n\n\
         Query: \"{query}\"\n\
         Scheme Name: {name}\n\
         Question Type: {field}\n\n\
         Facts Available:\n{facts_json}\n\n\
         Instructions:\n\
         1. Answer the query using ONLY the facts provided above\n\
         2. Be concise and factual\n\
         3. If a fact is missing, say it's not available\n\
         4. Do NOT provide investment advice or recommendations\n\
         5. Do NOT make up information\n\n\
         Answer:",
        name = scheme.display_name,
        field = field.as_str(),
    );

    let answer = complete_bounded(enhancer, timeout, &prompt).await?;

    // Keep the scheme name visible in the rendered text.
    if answer.contains(&scheme.display_name) {
        Some(answer)
    } else {
        Some(format!("For {}, {answer}", scheme.display_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEnhancer;

    const TIMEOUT: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn in_vocabulary_label_is_accepted() {
        let enhancer = MockEnhancer::new().with_response("expense_ratio");
        let intent = propose_intent(&enhancer, TIMEOUT, "what are the fees?").await;
        assert_eq!(intent, Some(Intent::Field(FactField::ExpenseRatio)));
    }

    #[tokio::test]
    async fn out_of_vocabulary_label_is_discarded() {
        let enhancer = MockEnhancer::new().with_response("buy_signal");
        let intent = propose_intent(&enhancer, TIMEOUT, "what are the fees?").await;
        assert_eq!(intent, None);
    }

    #[tokio::test]
    async fn failures_and_timeouts_yield_none() {
        let failing = MockEnhancer::new().always_fail();
        assert_eq!(propose_intent(&failing, TIMEOUT, "query").await, None);

        let slow = MockEnhancer::new()
            .with_response("general")
            .with_delay(Duration::from_millis(500));
        assert_eq!(propose_intent(&slow, TIMEOUT, "query").await, None);

        let empty = MockEnhancer::new().with_response("   ");
        assert_eq!(propose_intent(&empty, TIMEOUT, "query").await, None);
    }

    #[tokio::test]
    async fn proposed_name_is_validated_against_known_names() {
        let known = vec!["Axis Bluechip Fund Direct Growth".to_string()];

        let enhancer = MockEnhancer::new().with_response("axis bluechip");
        let name = propose_scheme_name(&enhancer, TIMEOUT, "q", &known).await;
        assert_eq!(name, Some("Axis Bluechip Fund Direct Growth".to_string()));

        let none = MockEnhancer::new().with_response("NONE");
        assert_eq!(propose_scheme_name(&none, TIMEOUT, "q", &known).await, None);

        // Unknown but plausible names pass through for store validation.
        let unknown = MockEnhancer::new().with_response("Parag Parikh Flexi Cap");
        assert_eq!(
            propose_scheme_name(&unknown, TIMEOUT, "q", &known).await,
            Some("Parag Parikh Flexi Cap".to_string())
        );
    }
}
