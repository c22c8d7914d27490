//! Load-once dataset cache
//!
//! Provides:
//! - Single parse of the article CSV shared by every request
//! - Optional reload when the file's modification time changes
//! - Hit/miss metrics

use crate::config::DatasetConfig;
use crate::dataset::Dataset;
use crate::errors::{AppError, Result};
use crate::metrics;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct CachedDataset {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// Shared dataset cache
pub struct DatasetCache {
    path: PathBuf,
    reload_on_change: bool,
    entry: RwLock<Option<CachedDataset>>,
}

impl DatasetCache {
    /// Create an empty cache; the file is read on first use
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            path: config.path.clone(),
            reload_on_change: config.reload_on_change,
            entry: RwLock::new(None),
        }
    }

    /// Path of the cached CSV
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the dataset, loading it if it is not cached yet (or is stale)
    pub async fn get(&self) -> Result<Arc<Dataset>> {
        let modified = if self.reload_on_change {
            modified_time(&self.path).await
        } else {
            None
        };

        {
            let entry = self.entry.read().await;
            if let Some(cached) = entry.as_ref() {
                if !self.reload_on_change || cached.modified == modified {
                    debug!(path = %self.path.display(), "Dataset cache hit");
                    metrics::record_cache(true, "dataset");
                    return Ok(cached.dataset.clone());
                }
            }
        }

        let mut entry = self.entry.write().await;

        // Another request may have loaded it while we waited for the lock
        if let Some(cached) = entry.as_ref() {
            if !self.reload_on_change || cached.modified == modified {
                metrics::record_cache(true, "dataset");
                return Ok(cached.dataset.clone());
            }
        }

        metrics::record_cache(false, "dataset");
        let dataset = Arc::new(self.load().await?);
        metrics::record_dataset_load(dataset.len());

        *entry = Some(CachedDataset {
            modified,
            dataset: dataset.clone(),
        });

        Ok(dataset)
    }

    /// Drop the cached dataset so the next `get` re-reads the file
    pub async fn invalidate(&self) {
        let mut entry = self.entry.write().await;
        if entry.take().is_some() {
            info!(path = %self.path.display(), "Dataset cache invalidated");
        }
    }

    async fn load(&self) -> Result<Dataset> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Dataset::from_path(path))
            .await
            .map_err(|e| AppError::Other(anyhow::Error::new(e).context("Dataset load task failed")))?
    }
}

async fn modified_time(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .and_then(|m| m.modified())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Journal,Authors,Pages,Year,Volume,Issue\n";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn config_for(path: &Path, reload_on_change: bool) -> DatasetConfig {
        DatasetConfig {
            path: path.to_path_buf(),
            reload_on_change,
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let file = write_csv(&["J,A; B,1-5,2020,1,1"]);
        let cache = DatasetCache::new(&config_for(file.path(), false));

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_reloads() {
        let file = write_csv(&["J,A; B,1-5,2020,1,1"]);
        let cache = DatasetCache::new(&config_for(file.path(), false));

        let first = cache.get().await.unwrap();
        cache.invalidate().await;
        let second = cache.get().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let cache = DatasetCache::new(&config_for(Path::new("/no/such/bizpub.csv"), true));
        let err = cache.get().await.unwrap_err();
        assert!(matches!(err, AppError::DatasetUnavailable { .. }));
    }
}
