//! Memoizing constructors.
//!
//! Accept headers repeat constantly, so parsing goes through a small LRU
//! cache keyed by the input string. [`ParseCache`] can be built and owned by
//! callers; the module-level functions use process-wide default instances.

use crate::error::Result;
use crate::media_range::MediaRange;
use crate::media_type::MediaType;
use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default number of parsed values kept per cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

static TYPE_CACHE: Lazy<ParseCache<MediaType>> = Lazy::new(ParseCache::default);
static RANGE_CACHE: Lazy<ParseCache<MediaRange>> = Lazy::new(ParseCache::default);

/// Configuration for a [`ParseCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries; at least 1.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration, raising a zero capacity to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }
}

/// Hit and miss counters of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A bounded, thread-safe cache of parsed values keyed by their source text.
///
/// Values are shared as `Arc<T>`. Failed parses are not cached.
///
/// # Examples
///
/// ```
/// use mime_range::cache::{CacheConfig, ParseCache};
/// use mime_range::MediaRange;
///
/// let cache: ParseCache<MediaRange> = ParseCache::new(CacheConfig::new(8));
/// let first = cache.parse("text/html, */*;q=0.1").unwrap();
/// let second = cache.parse("text/html, */*;q=0.1").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct ParseCache<T> {
    entries: Mutex<LruCache<String, Arc<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T> ParseCache<T> {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, or parses and stores it.
    pub fn get_or_parse<F>(&self, key: &str, parse: F) -> Result<Arc<T>>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        if let Some(value) = self.entries.lock().get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key, "parse cache hit");
            return Ok(Arc::clone(value));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(key, "parse cache miss");

        // Parse outside the lock; a concurrent miss on the same key just
        // stores an equal value twice.
        let value = Arc::new(parse(key)?);
        if let Some((evicted, _)) = self.entries.lock().push(key.to_string(), Arc::clone(&value)) {
            if evicted != key {
                debug!(key = %evicted, "parse cache eviction");
            }
        }
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl<T> ParseCache<T>
where
    T: FromStr<Err = crate::Error>,
{
    /// Parses `s` with `T::from_str`, memoized.
    pub fn parse(&self, s: &str) -> Result<Arc<T>> {
        self.get_or_parse(s, T::from_str)
    }
}

impl<T> Default for ParseCache<T> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// Cached [`MediaType::from_string`].
///
/// ```
/// use mime_range::type_from_string;
///
/// let mt = type_from_string("text/xml").unwrap();
/// assert_eq!(mt.subtype(), "xml");
/// ```
pub fn type_from_string(s: &str) -> Result<Arc<MediaType>> {
    TYPE_CACHE.parse(s)
}

/// Cached [`MediaType::from_bytes`]; shares the cache of [`type_from_string`].
pub fn type_from_bytes(data: &[u8]) -> Result<Arc<MediaType>> {
    type_from_string(std::str::from_utf8(data)?)
}

/// Cached [`MediaRange::from_string`].
pub fn range_from_string(s: &str) -> Result<Arc<MediaRange>> {
    RANGE_CACHE.parse(s)
}
