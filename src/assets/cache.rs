use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use tokio::sync::RwLock;

/// Successfully loaded icon markup, keyed by asset path.
///
/// Assets are immutable for the session, so entries are never invalidated
/// or evicted. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    entries: Arc<RwLock<HashMap<String, Arc<str>>>>,
}

impl AssetCache {
    /// Create an empty cache private to its holders.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by every engine that does not bring
    /// its own.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<AssetCache> = OnceLock::new();
        GLOBAL.get_or_init(AssetCache::new).clone()
    }

    /// Look up markup for `path`.
    pub async fn get(&self, path: &str) -> Option<Arc<str>> {
        self.entries.read().await.get(path).cloned()
    }

    /// Store markup for `path`, returning the value now cached.
    ///
    /// If another load stored the same path first, the existing value is
    /// kept.
    pub async fn insert(&self, path: &str, markup: Arc<str>) -> Arc<str> {
        let mut entries = self.entries.write().await;
        Arc::clone(entries.entry(path.to_string()).or_insert(markup))
    }

    /// Number of cached paths.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been cached yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
