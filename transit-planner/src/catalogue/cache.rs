//! Disk-backed cache for the station catalogue, so a restart doesn't
//! force an immediate re-download.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::error::CatalogueError;
use super::model::StationsListResponse;

#[derive(Debug, Serialize, Deserialize)]
struct CachedCatalogue {
    cached_at_secs: u64,
    catalogue: StationsListResponse,
}

#[derive(Debug, Clone)]
pub struct CatalogueCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl CatalogueCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

pub struct CatalogueCache {
    config: CatalogueCacheConfig,
}

impl CatalogueCache {
    pub fn new(config: CatalogueCacheConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Load the cached catalogue, returning `None` if it's missing,
    /// unparseable, or past its TTL.
    pub fn load(&self) -> Option<StationsListResponse> {
        let bytes = std::fs::read(&self.config.path).ok()?;
        let cached: CachedCatalogue = serde_json::from_slice(&bytes).ok()?;

        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        let age = now.saturating_sub(cached.cached_at_secs);
        if age > self.config.ttl.as_secs() {
            return None;
        }
        Some(cached.catalogue)
    }

    /// Persist a freshly fetched catalogue, writing to a temp file first
    /// and renaming into place so a concurrent reader never observes a
    /// partially-written cache file.
    pub fn save(&self, catalogue: &StationsListResponse) -> Result<(), CatalogueError> {
        if let Some(parent) = self.config.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogueError::Cache(e.to_string()))?;
        }

        let cached_at_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| CatalogueError::Cache(e.to_string()))?
            .as_secs();
        let record = CachedCatalogue {
            cached_at_secs,
            catalogue: catalogue.clone(),
        };
        let json = serde_json::to_vec_pretty(&record).map_err(|e| CatalogueError::Cache(e.to_string()))?;

        let tmp_path = self.config.path.with_extension("tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| CatalogueError::Cache(e.to_string()))?;
        std::fs::rename(&tmp_path, &self.config.path)
            .map_err(|e| CatalogueError::Cache(e.to_string()))?;
        Ok(())
    }
}
