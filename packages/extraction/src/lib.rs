//! Fact extraction and canonical record store for mutual fund schemes.
//!
//! Takes raw page text (already fetched and flattened by an external
//! collaborator) and turns it into canonical, de-duplicated scheme
//! records:
//!
//! 1. [`fields`] - per-field pattern cascades pull facts out of noisy,
//!    inconsistently formatted text. Missing data is a sentinel value,
//!    never an error.
//! 2. [`normalize`] - extractor output becomes a [`types::Scheme`] with
//!    a stable, name-derived id.
//! 3. [`store`] - records persist to a JSON data directory (or memory),
//!    indexed by name and category, with replacement keyed by source
//!    locator so re-ingestion is idempotent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fund_extraction::{extract_document, normalize, JsonFileStore, SchemeStore, RawDocument};
//!
//! let doc = RawDocument::new(page_text, url);
//! let scheme = normalize(extract_document(&doc), &doc.source_locator);
//!
//! let store = JsonFileStore::open("data").await?;
//! store.upsert(scheme).await?;
//! let found = store.find("Axis Bluechip").await?;
//! ```

pub mod error;
pub mod fields;
pub mod normalize;
pub mod store;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, StoreError};
pub use fields::{extract, extract_all, extract_document, DocumentExtraction};
pub use normalize::{normalize, UNKNOWN_SCHEME_NAME};
pub use store::{
    JsonFileStore, MemoryStore, SchemeIndex, SchemeStore, StoreStats, UpsertOutcome,
};
pub use types::{
    FactField, FactSet, FactValue, HoldingEntry, PortfolioComposition, RawDocument, Scheme,
    SchemeId,
};
