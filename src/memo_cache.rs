//! # Memoization Cache Module
//!
//! Thread-safe bounded memoization shared by the provider and translation
//! adapters. Entries are evicted least-recently-used once the capacity is
//! reached.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of entries each adapter keeps
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Bounded LRU cache behind a mutex
///
/// The lock is never held across an `.await`; callers clone values out.
///
/// # Examples
///
/// ```rust
/// use chefmatch::memo_cache::MemoCache;
///
/// let cache = MemoCache::new(2);
/// cache.insert("a".to_string(), 1);
/// cache.insert("b".to_string(), 2);
/// cache.get(&"a".to_string());
/// cache.insert("c".to_string(), 3);
///
/// assert_eq!(cache.get(&"a".to_string()), Some(1));
/// assert_eq!(cache.get(&"b".to_string()), None);
/// ```
#[derive(Debug)]
pub struct MemoCache<K: Hash + Eq, V: Clone> {
    entries: Mutex<LruCache<K, V>>,
    capacity: NonZeroUsize,
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// A capacity of zero falls back to [`DEFAULT_CACHE_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a value, marking it as recently used
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        self.lock().put(key, value);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
