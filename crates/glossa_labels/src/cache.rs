use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::label::LabelMapping;

/// A value stored in the runtime cache.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheValue {
    /// A fully resolved label string.
    Label(String),
    /// A merged label file for one active language.
    Mapping(Arc<LabelMapping>),
}

/// Request- or process-scoped key-value store shared by resolvers.
///
/// Implementations own their own synchronization and eviction policy; the
/// resolver only ever calls `get` and `set`.
#[cfg_attr(test, mockall::automock)]
pub trait RuntimeCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheValue>;
    fn set(&self, key: &str, value: CacheValue);
}

/// Cache key for a resolved reference.
pub fn label_cache_key(language: &str, reference: &str, debug: bool) -> String {
    let digest = Sha256::digest(format!("{reference}_{}", u8::from(debug)));
    format!("labels_{language}_{digest:x}")
}

/// Cache key for a merged label file.
pub fn file_cache_key(file: &str, language: &str) -> String {
    let digest = Sha256::digest(format!("{file}{language}"));
    format!("labels_file_{digest:x}")
}

/// Unbounded in-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheValue>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl RuntimeCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheValue> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: CacheValue) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }
}

/// In-memory cache that evicts the least recently used entry once full.
pub struct BoundedCache {
    entries: Mutex<LruCache<String, CacheValue>>,
}

impl BoundedCache {
    /// A zero capacity is bumped to one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RuntimeCache for BoundedCache {
    fn get(&self, key: &str) -> Option<CacheValue> {
        // LruCache::get promotes to most-recently-used, hence the lock.
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: CacheValue) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(key.to_string(), value);
        }
    }
}
