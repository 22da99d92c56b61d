//! In-memory scheme store for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Scheme, SchemeId};

use super::{find_by_name, upsert_by_locator, SchemeStore, StoreStats, UpsertOutcome};

/// In-memory store. Data is lost on drop; use [`super::JsonFileStore`]
/// for anything that must survive the process.
pub struct MemoryStore {
    schemes: RwLock<Vec<Scheme>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            schemes: RwLock::new(Vec::new()),
        }
    }

    /// Seed with records, preserving order.
    pub fn with_schemes(schemes: Vec<Scheme>) -> Self {
        Self {
            schemes: RwLock::new(schemes),
        }
    }
}

#[async_trait]
impl SchemeStore for MemoryStore {
    async fn store(&self, schemes: Vec<Scheme>) -> Result<()> {
        let mut guard = self.schemes.write().unwrap();
        for scheme in schemes {
            upsert_by_locator(&mut guard, scheme);
        }
        Ok(())
    }

    async fn upsert(&self, scheme: Scheme) -> Result<UpsertOutcome> {
        let mut guard = self.schemes.write().unwrap();
        Ok(upsert_by_locator(&mut guard, scheme))
    }

    async fn get(&self, id: &SchemeId) -> Result<Option<Scheme>> {
        Ok(self
            .schemes
            .read()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find(&self, name: &str) -> Result<Option<Scheme>> {
        Ok(find_by_name(&self.schemes.read().unwrap(), name).cloned())
    }

    async fn all(&self) -> Result<Vec<Scheme>> {
        Ok(self.schemes.read().unwrap().clone())
    }

    async fn display_names(&self) -> Result<Vec<String>> {
        Ok(self
            .schemes
            .read()
            .unwrap()
            .iter()
            .map(|s| s.display_name.clone())
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.schemes.read().unwrap().len())
    }

    async fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats::compute(&self.schemes.read().unwrap()))
    }
}
