//! Query result cache
//!
//! Bounded LRU memoization of query results keyed by the exact
//! [`QuerySignature`]. The cache has its own mutex, separate from the
//! collection lock, because it is populated on the read path.
//!
//! # Staleness
//!
//! | Policy | Entry dropped when |
//! |--------|--------------------|
//! | Unbounded | only by LRU eviction; inserts never invalidate |
//! | Versioned | the collection version differs from the one it was computed at |
//! | Ttl | it is older than the configured duration |
//!
//! Under `Unbounded` a cached result can miss posts inserted after it was
//! computed. Callers that need the latest state use the uncached path.

use lru::LruCache;
use parking_lot::Mutex;
use postindex_core::{QueryResult, QuerySignature};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Staleness rule for cached results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Never invalidated by inserts
    #[default]
    Unbounded,
    /// Invalidated by any insert after computation
    Versioned,
    /// Invalidated after a fixed lifetime
    Ttl(Duration),
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to evaluation
    pub misses: u64,
    /// Entries dropped as stale on lookup
    pub invalidations: u64,
    /// Entries currently held
    pub entries: usize,
    /// Maximum entries
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0.0 when none were made
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct CachedResult {
    result: QueryResult,
    version: u64,
    cached_at: Instant,
}

/// LRU cache of query results
pub struct QueryCache {
    /// `None` when capacity is zero (caching disabled)
    entries: Option<Mutex<LruCache<QuerySignature, CachedResult>>>,
    policy: CachePolicy,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` results
    ///
    /// A capacity of 0 disables caching: every lookup misses and nothing is
    /// stored.
    pub fn new(capacity: usize, policy: CachePolicy) -> Self {
        QueryCache {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            policy,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Staleness policy in effect
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Look up a result
    ///
    /// `version` is the collection version at lookup time; it only matters
    /// under [`CachePolicy::Versioned`]. Stale entries are removed and count
    /// as a miss.
    pub fn get(&self, signature: &QuerySignature, version: u64) -> Option<QueryResult> {
        let Some(entries) = &self.entries else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        let mut entries = entries.lock();

        let fresh = entries.get(signature).map(|cached| self.is_fresh(cached, version));
        match fresh {
            Some(true) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(?signature, "query cache hit");
                entries.get(signature).map(|cached| cached.result.clone())
            }
            Some(false) => {
                entries.pop(signature);
                self.invalidations.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?signature, policy = ?self.policy, "query cache entry stale");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(?signature, "query cache miss");
                None
            }
        }
    }

    /// Store a result computed at collection `version`
    ///
    /// Evicts the least recently used entry when full.
    pub fn put(&self, signature: QuerySignature, result: QueryResult, version: u64) {
        let Some(entries) = &self.entries else {
            return;
        };
        let cached = CachedResult {
            result,
            version,
            cached_at: Instant::now(),
        };
        if let Some((evicted, _)) = entries.lock().push(signature, cached) {
            debug!(signature = ?evicted, "query cache entry displaced");
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.lock().clear();
        }
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.lock().len())
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached results
    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.lock().cap().get())
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.capacity(),
        }
    }

    fn is_fresh(&self, cached: &CachedResult, version: u64) -> bool {
        match self.policy {
            CachePolicy::Unbounded => true,
            CachePolicy::Versioned => cached.version == version,
            CachePolicy::Ttl(ttl) => cached.cached_at.elapsed() < ttl,
        }
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("policy", &self.policy)
            .field("stats", &self.stats())
            .finish()
    }
}
