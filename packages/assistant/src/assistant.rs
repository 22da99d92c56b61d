//! The FAQ assistant - per-query orchestration.
//!
//! Flow per query: classify -> (refusal short-circuits) -> resolve ->
//! store lookup -> compose, with the optional enhancement adapter
//! consulted along the way and silently dropped on any failure.

use std::sync::Arc;
use std::time::Duration;

use fund_extraction::SchemeStore;

use crate::compose::{compose, Answer, ResolutionOutcome};
use crate::enhance::{
    paraphrase_fact_answer, propose_intent, propose_scheme_name, Enhancer,
    DEFAULT_ENHANCER_TIMEOUT,
};
use crate::error::Result;
use crate::intent::{classify, Intent};
use crate::resolve::{resolve, Candidate};
use crate::session::{SessionStore, DEFAULT_MAX_SESSIONS};

/// Tunables for the assistant.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Time box for one enhancement adapter call
    pub enhancer_timeout: Duration,

    /// Bound on tracked sessions
    pub max_sessions: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enhancer_timeout: DEFAULT_ENHANCER_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Facts-only FAQ assistant over a scheme store.
pub struct FaqAssistant<S> {
    store: S,
    sessions: SessionStore,
    enhancer: Option<Arc<dyn Enhancer>>,
    config: AssistantConfig,
}

impl<S: SchemeStore> FaqAssistant<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AssistantConfig::default())
    }

    pub fn with_config(store: S, config: AssistantConfig) -> Self {
        Self {
            store,
            sessions: SessionStore::new(config.max_sessions),
            enhancer: None,
            config,
        }
    }

    /// Attach an enhancement adapter. The deterministic path remains
    /// the system of record; the adapter only refines labels and
    /// phrasing, and every adapter failure is invisible to callers.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn Enhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Answer one query.
    ///
    /// Only store failures error; everything else - unknown schemes,
    /// unclassifiable queries, adapter trouble - produces a normal
    /// answer payload.
    pub async fn answer(&self, query: &str, session_id: Option<&str>) -> Result<Answer> {
        let query = query.trim();
        tracing::info!(query, session = session_id.unwrap_or("-"), "answering query");

        let intent = self.classify_intent(query).await;

        // Refusal is unconditional and ignores any scheme mentioned.
        if intent == Intent::Opinionated {
            return Ok(compose(intent, &ResolutionOutcome::NoCandidate));
        }

        let outcome = self.resolve_scheme(query, session_id).await?;

        if let (Some(session), ResolutionOutcome::Resolved(scheme)) = (session_id, &outcome) {
            self.sessions.remember(session, scheme.id.clone());
        }

        let mut answer = compose(intent, &outcome);

        // Optional paraphrase of a deterministic field answer; the
        // answer shape (source, label, id) is never touched.
        if let (Some(enhancer), Intent::Field(field), ResolutionOutcome::Resolved(scheme)) =
            (self.enhancer.as_deref(), intent, &outcome)
        {
            if let Some(text) = paraphrase_fact_answer(
                enhancer,
                self.config.enhancer_timeout,
                query,
                scheme,
                field,
            )
            .await
            {
                answer.answer = text;
            }
        }

        Ok(answer)
    }

    /// Deterministic classification, optionally refined by the adapter.
    ///
    /// An `Opinionated` result is final: the adapter may never downgrade
    /// a refusal. For other intents, an in-vocabulary adapter label is
    /// trusted; anything else keeps the deterministic result.
    async fn classify_intent(&self, query: &str) -> Intent {
        let deterministic = classify(query);
        if deterministic == Intent::Opinionated {
            return deterministic;
        }

        if let Some(enhancer) = self.enhancer.as_deref() {
            if let Some(proposed) =
                propose_intent(enhancer, self.config.enhancer_timeout, query).await
            {
                return proposed;
            }
        }

        deterministic
    }

    /// Resolve a scheme reference: adapter proposal first when
    /// configured, then the deterministic scan, then the session's last
    /// scheme as a fallback for name-less follow-ups.
    async fn resolve_scheme(
        &self,
        query: &str,
        session_id: Option<&str>,
    ) -> Result<ResolutionOutcome> {
        let names = self.store.display_names().await?;

        let candidate = match self.enhancer.as_deref() {
            Some(enhancer) => {
                match propose_scheme_name(enhancer, self.config.enhancer_timeout, query, &names)
                    .await
                {
                    Some(name) => Some(Candidate::Unverified(name)),
                    None => resolve(query, &names),
                }
            }
            None => resolve(query, &names),
        };

        match candidate {
            Some(candidate) => {
                let name = candidate.name();
                match self.store.find(name).await? {
                    Some(scheme) => Ok(ResolutionOutcome::Resolved(scheme)),
                    None => Ok(ResolutionOutcome::NotFound {
                        candidate: name.to_string(),
                    }),
                }
            }
            None => {
                if let Some(session) = session_id {
                    if let Some(last_id) = self.sessions.last_scheme(session) {
                        if let Some(scheme) = self.store.get(&last_id).await? {
                            tracing::debug!(
                                session,
                                scheme = %scheme.display_name,
                                "using last resolved scheme for follow-up"
                            );
                            return Ok(ResolutionOutcome::Resolved(scheme));
                        }
                    }
                }
                Ok(ResolutionOutcome::NoCandidate)
            }
        }
    }
}
