use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Durable key-value storage for serialized cache blobs.
///
/// Readers decide what a blob means; the store itself never inspects the
/// payload. Missing keys are `None`, not errors.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key cache storing each blob as `<key>.json` under a directory.
pub struct JsonFileCache {
    cache_dir: PathBuf,
}

impl JsonFileCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl CacheStore for JsonFileCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.cache_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", key))?;

        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.cache_path(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write cache file: {}", key))?;
        Ok(())
    }
}
