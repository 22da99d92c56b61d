//! Data types for scheme records and raw documents.

pub mod document;
pub mod scheme;

pub use document::RawDocument;
pub use scheme::{
    FactField, FactSet, FactValue, HoldingEntry, PortfolioComposition, Scheme, SchemeId,
};
