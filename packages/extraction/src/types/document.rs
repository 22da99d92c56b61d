//! Raw document input - the ephemeral text blob handed to extraction.

/// A raw source document: page text plus where it came from.
///
/// Produced by an external fetch collaborator and consumed once by the
/// field extractors. The locator is treated as opaque by the core.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Full page text, already stripped of markup
    pub text: String,

    /// Source locator (URL or path) used for citations and replacement
    pub source_locator: String,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, source_locator: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_locator: source_locator.into(),
        }
    }
}
