//! JSON-file-backed scheme store.
//!
//! Layout mirrors a simple data directory: `schemes.json` holds the
//! ordered record array (the interchange format consumed by other
//! tooling) and `index.json` holds the rebuilt name/category index.
//! Both files are rewritten on every store operation; I/O failures are
//! fatal and propagate, since there is no durability without them.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Scheme, SchemeId};

use super::{find_by_name, upsert_by_locator, SchemeIndex, SchemeStore, StoreStats, UpsertOutcome};

const SCHEMES_FILE: &str = "schemes.json";
const INDEX_FILE: &str = "index.json";

/// Scheme store persisted as JSON files under a data directory.
pub struct JsonFileStore {
    data_dir: PathBuf,
    schemes: RwLock<Vec<Scheme>>,
}

impl JsonFileStore {
    /// Open (or create) a store at `data_dir`, loading any existing
    /// records.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let schemes_path = data_dir.join(SCHEMES_FILE);
        let schemes: Vec<Scheme> = match tokio::fs::read(&schemes_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            data_dir = %data_dir.display(),
            schemes = schemes.len(),
            "scheme store opened"
        );

        Ok(Self {
            data_dir,
            schemes: RwLock::new(schemes),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write the record file and rebuild the index file from scratch.
    async fn persist(&self, schemes: &[Scheme]) -> Result<()> {
        let records = serde_json::to_vec_pretty(schemes)?;
        tokio::fs::write(self.data_dir.join(SCHEMES_FILE), records).await?;

        let index = SchemeIndex::build(schemes);
        let index_bytes = serde_json::to_vec_pretty(&index)?;
        tokio::fs::write(self.data_dir.join(INDEX_FILE), index_bytes).await?;

        tracing::info!(
            schemes = schemes.len(),
            unique_names = index.scheme_names.len(),
            "scheme store persisted"
        );
        Ok(())
    }
}

#[async_trait]
impl SchemeStore for JsonFileStore {
    async fn store(&self, schemes: Vec<Scheme>) -> Result<()> {
        let snapshot = {
            let mut guard = self.schemes.write().unwrap();
            for scheme in schemes {
                let outcome = upsert_by_locator(&mut guard, scheme);
                if outcome == UpsertOutcome::Replaced {
                    tracing::debug!("replaced record during batch store");
                }
            }
            guard.clone()
        };
        self.persist(&snapshot).await
    }

    async fn upsert(&self, scheme: Scheme) -> Result<UpsertOutcome> {
        let name = scheme.display_name.clone();
        let (outcome, snapshot) = {
            let mut guard = self.schemes.write().unwrap();
            let outcome = upsert_by_locator(&mut guard, scheme);
            (outcome, guard.clone())
        };
        self.persist(&snapshot).await?;

        match outcome {
            UpsertOutcome::Inserted => tracing::info!(scheme = %name, "scheme added"),
            UpsertOutcome::Replaced => tracing::info!(scheme = %name, "scheme replaced"),
        }
        Ok(outcome)
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
