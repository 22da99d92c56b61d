//! Facts-only FAQ assistant over the mutual fund scheme store.
//!
//! Per query: [`intent::classify`] maps the text onto a fixed intent
//! vocabulary (with advice-seeking checked first), [`resolve::resolve`]
//! pulls out a scheme reference, the store validates it, and
//! [`compose::compose`] renders a citation-bearing factual answer, a
//! refusal, or a clarification. [`session::SessionStore`] remembers the
//! last resolved scheme per session for name-less follow-ups.
//!
//! An optional [`enhance::Enhancer`] can refine classification,
//! resolution and phrasing; it is never load-bearing - its output is
//! validated against the fixed vocabulary and every failure falls back
//! to the deterministic path.
//!
//! # Usage
//!
//! ```rust,ignore
//! use faq_assistant::FaqAssistant;
//! use fund_extraction::{JsonFileStore, SchemeStore};
//!
//! let store = JsonFileStore::open("data").await?;
//! let assistant = FaqAssistant::new(store);
//! let answer = assistant.answer("Expense ratio of Axis Bluechip Fund?", Some("session-1")).await?;
//! println!("{} ({})", answer.answer, answer.source_locator);
//! ```

pub mod assistant;
pub mod compose;
pub mod enhance;
pub mod error;
pub mod intent;
pub mod resolve;
pub mod session;
pub mod testing;

#[cfg(feature = "gemini")]
pub mod gemini;

// Re-export core types at crate root
pub use assistant::{AssistantConfig, FaqAssistant};
pub use compose::{Answer, ResolutionOutcome, GENERAL_LINK};
pub use enhance::{Enhancer, DEFAULT_ENHANCER_TIMEOUT};
pub use error::{AssistantError, EnhancerError, Result};
pub use intent::{classify, Intent};
pub use resolve::{resolve, Candidate};
pub use session::{SessionStore, DEFAULT_MAX_SESSIONS};

#[cfg(feature = "gemini")]
pub use gemini::GeminiEnhancer;
