//! Record normalization - assembling extractor output into canonical
//! [`Scheme`] records.

use chrono::Utc;

use crate::fields::DocumentExtraction;
use crate::types::{Scheme, SchemeId};

/// Placeholder display name for documents where no name could be
/// extracted. The record is still constructed and stored; filtering
/// low-quality records is the ingestion caller's decision.
pub const UNKNOWN_SCHEME_NAME: &str = "Unknown Scheme";

/// Build a canonical scheme record from a document extraction.
///
/// The id is derived deterministically from the display name, so
/// re-ingesting the same page always produces the same id. Collisions
/// between distinct schemes that slug to the same id are tolerated:
/// replacement in the store is keyed by source locator, never by id.
pub fn normalize(extraction: DocumentExtraction, source_locator: &str) -> Scheme {
    let display_name = match extraction.display_name {
        Some(name) => name,
        None => {
            tracing::warn!(
                source = source_locator,
                "no display name extracted, storing with placeholder"
            );
            UNKNOWN_SCHEME_NAME.to_string()
        }
    };

    Scheme {
        id: SchemeId::from_display_name(&display_name),
        display_name,
        category: extraction.category,
        source_locator: source_locator.to_string(),
        facts: extraction.facts,
        holdings: extraction.holdings,
        sector_allocation: extraction.sector_allocation,
        last_updated: Utc::now(),
    }
}
