//! Process-wide dataset cache.

use crate::domain::dataset::Dataset;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct CacheEntry {
    dataset: Arc<Dataset>,
    inserted_at: Instant,
}

/// Explicit cache of loaded datasets, keyed by source identity.
///
/// Datasets are inserted as fully built `Arc<Dataset>` values under a write
/// lock, so a concurrent reader either sees the previous entry or the
/// complete new one, never a partial dataset. With no TTL configured an entry
/// lives until [`DatasetCache::invalidate`] or [`DatasetCache::clear`].
pub struct DatasetCache {
    ttl: Option<Duration>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl DatasetCache {
    /// `ttl` of `None` (or zero via [`DatasetCache::with_ttl_secs`]) means
    /// manual invalidation only.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttl_secs(ttl_secs: i64) -> Self {
        let ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs as u64));
        Self::new(ttl)
    }

    pub fn get(&self, key: &str) -> Option<Arc<Dataset>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let entry = entries.get(key)?;
        if let Some(ttl) = self.ttl {
            if entry.inserted_at.elapsed() >= ttl {
                return None;
            }
        }
        Some(Arc::clone(&entry.dataset))
    }

    pub fn put(&self, key: &str, dataset: Arc<Dataset>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                dataset,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}
