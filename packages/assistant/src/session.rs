//! Session context - remembering the last resolved scheme per session.
//!
//! A process-wide map from caller-supplied session identifiers to the
//! most recently resolved scheme id, so follow-up questions ("what about
//! its exit load?") can omit the scheme name. Entries are created
//! lazily, updated on every successful resolution, and evicted oldest
//! first once the configured bound is reached.
//!
//! Two concurrent queries under the same session id race on the
//! read-then-write of the slot; last writer wins. Sessions are assumed
//! single-client, so no stronger coordination is provided.

use std::sync::RwLock;

use fund_extraction::SchemeId;
use indexmap::IndexMap;

/// Default ceiling on tracked sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Bounded session-to-last-scheme map.
pub struct SessionStore {
    sessions: RwLock<IndexMap<String, SchemeId>>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(IndexMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Last resolved scheme for a session, if any.
    pub fn last_scheme(&self, session_id: &str) -> Option<SchemeId> {
        self.sessions.read().unwrap().get(session_id).cloned()
    }

    /// Record the latest resolved scheme for a session, evicting the
    /// oldest session if the bound is hit.
    pub fn remember(&self, session_id: &str, scheme_id: SchemeId) {
        let mut sessions = self.sessions.write().unwrap();

        if !sessions.contains_key(session_id) && sessions.len() >= self.max_sessions {
            if let Some((evicted, _)) = sessions.shift_remove_index(0) {
                tracing::debug!(session = %evicted, "session evicted at capacity");
            }
        }

        sessions.insert(session_id.to_string(), scheme_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SchemeId {
        SchemeId::from_display_name(name)
    }

    #[test]
    fn remembers_last_resolution_per_session() {
        let store = SessionStore::default();

        store.remember("s1", id("Axis Bluechip Fund"));
        store.remember("s2", id("SBI Small Cap Fund"));
        store.remember("s1", id("HDFC Large Cap Fund"));

        assert_eq!(store.last_scheme("s1"), Some(id("HDFC Large Cap Fund")));
        assert_eq!(store.last_scheme("s2"), Some(id("SBI Small Cap Fund")));
        assert_eq!(store.last_scheme("unknown"), None);
    }

    #[test]
    fn evicts_oldest_session_at_capacity() {
        let store = SessionStore::new(2);

        store.remember("s1", id("Fund One"));
        store.remember("s2", id("Fund Two"));
        store.remember("s3", id("Fund Three"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.last_scheme("s1"), None);
        assert_eq!(store.last_scheme("s3"), Some(id("Fund Three")));
    }

    #[test]
    fn updating_an_existing_session_does_not_evict() {
        let store = SessionStore::new(2);

        store.remember("s1", id("Fund One"));
        store.remember("s2", id("Fund Two"));
        store.remember("s1", id("Fund Updated"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.last_scheme("s1"), Some(id("Fund Updated")));
        assert_eq!(store.last_scheme("s2"), Some(id("Fund Two")));
    }
}
