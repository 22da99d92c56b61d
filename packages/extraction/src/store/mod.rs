//! Scheme record storage - persistence, indexing and name lookup.
//!
//! Lookups use a three-tier cascade (exact, substring, token subset);
//! ties at every tier go to the first record in insertion order, which
//! keeps resolution deterministic at the cost of never ranking matches.

pub mod json;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{FactField, Scheme, SchemeId};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Whether an upsert inserted a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Availability stats for one fact field across the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAvailability {
    pub available: usize,
    pub percentage: f64,
}

/// Store-wide statistics: record count and per-field completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_schemes: usize,
    pub field_availability: IndexMap<String, FieldAvailability>,
    pub generated_at: DateTime<Utc>,
}

impl StoreStats {
    pub(crate) fn compute(schemes: &[Scheme]) -> Self {
        let total = schemes.len();
        let mut field_availability = IndexMap::new();

        for field in FactField::ALL {
            let available = schemes
                .iter()
                .filter(|s| s.facts.get(*field).is_available())
                .count();
            let percentage = if total > 0 {
                available as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            field_availability.insert(
                field.as_str().to_string(),
                FieldAvailability { available, percentage },
            );
        }

        Self {
            total_schemes: total,
            field_availability,
            generated_at: Utc::now(),
        }
    }
}

/// Name and category index over the stored records.
///
/// Rebuilt in full on every store operation; there is no incremental
/// maintenance to get wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeIndex {
    pub created_at: DateTime<Utc>,
    pub total_schemes: usize,
    pub scheme_names: IndexMap<String, Vec<SchemeId>>,
    pub categories: IndexMap<String, Vec<SchemeId>>,
}

impl SchemeIndex {
    pub fn build(schemes: &[Scheme]) -> Self {
        let mut scheme_names: IndexMap<String, Vec<SchemeId>> = IndexMap::new();
        let mut categories: IndexMap<String, Vec<SchemeId>> = IndexMap::new();

        for scheme in schemes {
            scheme_names
                .entry(scheme.display_name.to_lowercase())
                .or_default()
                .push(scheme.id.clone());

            let category = scheme.category.as_deref().unwrap_or("Unknown");
            categories
                .entry(category.to_string())
                .or_default()
                .push(scheme.id.clone());
        }

        Self {
            created_at: Utc::now(),
            total_schemes: schemes.len(),
            scheme_names,
            categories,
        }
    }
}

/// Persistent store of canonical scheme records.
///
/// `store` rebuilds the index wholesale and is not reentrant; callers
/// must serialize concurrent store calls on one instance. Lookups never
/// error on a miss - not-found is `Ok(None)`.
#[async_trait]
pub trait SchemeStore: Send + Sync {
    /// Upsert a batch of records and persist. Replacement is keyed by
    /// source locator equality, making re-ingestion idempotent.
    async fn store(&self, schemes: Vec<Scheme>) -> Result<()>;

    /// Upsert a single record and persist.
    async fn upsert(&self, scheme: Scheme) -> Result<UpsertOutcome>;

    /// Fetch by exact id. First record in insertion order wins when two
    /// distinct schemes share a slugged id.
    async fn get(&self, id: &SchemeId) -> Result<Option<Scheme>>;

    /// Find by name via the three-tier cascade.
    async fn find(&self, name: &str) -> Result<Option<Scheme>>;

    /// All records in insertion order.
    async fn all(&self) -> Result<Vec<Scheme>>;

    /// All display names in insertion order, for resolution scans.
    async fn display_names(&self) -> Result<Vec<String>>;

    async fn count(&self) -> Result<usize>;

    async fn stats(&self) -> Result<StoreStats>;
}

/// Three-tier name lookup over an insertion-ordered slice.
///
/// 1. Exact case-insensitive match on display name.
/// 2. Case-insensitive substring containment, in either direction.
/// 3. Query token set is a subset of the candidate's token set.
///
/// Each tier is only attempted when the previous one found nothing, and
/// the first record encountered wins within a tier.
pub(crate) fn find_by_name<'a>(schemes: &'a [Scheme], query: &str) -> Option<&'a Scheme> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return None;
    }

    if let Some(scheme) = schemes
        .iter()
        .find(|s| s.display_name.to_lowercase() == query_lower)
    {
        tracing::debug!(query, matched = %scheme.display_name, tier = "exact", "scheme matched");
        return Some(scheme);
    }

    if let Some(scheme) = schemes.iter().find(|s| {
        let name_lower = s.display_name.to_lowercase();
        name_lower.contains(&query_lower) || query_lower.contains(&name_lower)
    }) {
        tracing::debug!(query, matched = %scheme.display_name, tier = "substring", "scheme matched");
        return Some(scheme);
    }

    let query_tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if query_tokens.is_empty() {
        return None;
    }

    if let Some(scheme) = schemes.iter().find(|s| {
        let name_lower = s.display_name.to_lowercase();
        let name_tokens: Vec<&str> = name_lower.split_whitespace().collect();
        query_tokens.iter().all(|t| name_tokens.contains(t))
    }) {
        tracing::debug!(query, matched = %scheme.display_name, tier = "tokens", "scheme matched");
        return Some(scheme);
    }

    tracing::debug!(query, "no scheme matched");
    None
}

/// Replace-or-append by source locator. Returns the outcome so callers
/// can log replacement separately from first ingestion.
pub(crate) fn upsert_by_locator(schemes: &mut Vec<Scheme>, scheme: Scheme) -> UpsertOutcome {
    match schemes
        .iter_mut()
        .find(|s| s.source_locator == scheme.source_locator)
    {
        Some(existing) => {
            *existing = scheme;
            UpsertOutcome::Replaced
        }
        None => {
            schemes.push(scheme);
            UpsertOutcome::Inserted
        }
    }
}
