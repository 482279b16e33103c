//! Database: the shared, thread-safe post index
//!
//! `Database` owns the [`PostCollection`] behind a single `RwLock` and the
//! [`QueryCache`] behind its own mutex.
//!
//! # Concurrency
//!
//! Single writer, many readers:
//! - `insert_post` holds the write lock across the store append and both
//!   index updates, so no reader sees a post without its index entries
//! - queries hold the read lock only while evaluating
//! - the cache is checked and filled outside the collection lock
//!
//! # Example
//!
//! ```
//! use postindex_core::PostQuery;
//! use postindex_engine::Database;
//!
//! let db = Database::new();
//! db.insert_post(100, vec!["sports".into()], "A").unwrap();
//! db.insert_post(200, vec!["tech".into()], "B").unwrap();
//!
//! let result = db.get_posts(&PostQuery::new().tags(["sports"])).unwrap();
//! assert_eq!(result.total_count, 1);
//! ```

use crate::cache::{CachePolicy, CacheStats, QueryCache};
use crate::config::{CachePolicyKind, ConfigError, EngineConfig};
use crate::query::evaluate;
use parking_lot::RwLock;
use postindex_core::request::InsertPostRequest;
use postindex_core::{Post, PostId, PostQuery, QueryResult, Result, Timestamp};
use postindex_storage::PostCollection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// In-memory post index with a memoizing query path
pub struct Database {
    collection: RwLock<PostCollection>,
    cache: QueryCache,
    config: EngineConfig,
}

impl Database {
    /// Open a database with default settings
    pub fn new() -> Self {
        Self::open(EngineConfig::default(), CachePolicy::default())
    }

    /// Open a database with `config`
    pub fn with_config(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        let policy = config.cache_policy()?;
        Ok(Self::open(config, policy))
    }

    fn open(config: EngineConfig, policy: CachePolicy) -> Self {
        info!(
            cache_capacity = config.cache_capacity,
            cache_policy = ?policy,
            default_k = config.default_k,
            canonicalize_tags = config.canonicalize_tags,
            "opening post index"
        );
        Database {
            collection: RwLock::new(PostCollection::with_capacity(config.initial_capacity)),
            cache: QueryCache::new(config.cache_capacity, policy),
            config,
        }
    }

    /// Create a builder for database configuration
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Insert a post and return its id
    ///
    /// The post and its index entries become visible to queries atomically.
    /// Cached query results are left alone unless the cache policy says
    /// otherwise.
    pub fn insert_post(
        &self,
        timestamp: Timestamp,
        tags: Vec<String>,
        content: impl Into<String>,
    ) -> Result<PostId> {
        let id = self.collection.write().insert(timestamp, tags, content.into())?;
        debug!(post_id = %id, timestamp, "inserted post");
        Ok(id)
    }

    /// Insert a decoded boundary request
    pub fn insert_request(&self, request: InsertPostRequest) -> Result<PostId> {
        self.insert_post(request.timestamp, request.tags, request.content)
    }

    /// Most recent posts matching `query`, served from the cache when possible
    ///
    /// Invalid queries fail before the cache is consulted and are never
    /// cached.
    pub fn get_posts(&self, query: &PostQuery) -> Result<QueryResult> {
        query.validate()?;
        let signature = query.signature(self.config.default_k, self.config.canonicalize_tags);

        if let Some(hit) = self.cache.get(&signature, self.version()) {
            return Ok(hit);
        }

        let (result, version) = {
            let collection = self.collection.read();
            (
                evaluate(&collection, query, self.config.default_k)?,
                collection.version(),
            )
        };
        self.cache.put(signature, result.clone(), version);
        Ok(result)
    }

    /// Most recent posts matching `query`, always evaluated fresh
    ///
    /// Neither reads nor fills the cache.
    pub fn get_posts_uncached(&self, query: &PostQuery) -> Result<QueryResult> {
        evaluate(&self.collection.read(), query, self.config.default_k)
    }

    /// Look up a post by id
    pub fn post(&self, id: &PostId) -> Option<Arc<Post>> {
        self.collection.read().store().get(id)
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.collection.read().len()
    }

    /// Check if no post has been inserted
    pub fn is_empty(&self) -> bool {
        self.collection.read().is_empty()
    }

    /// Oldest and newest post timestamps, `None` when empty
    pub fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        self.collection.read().timestamps().span()
    }

    /// Collection version; grows by one per insert
    pub fn version(&self) -> u64 {
        self.collection.read().version()
    }

    /// Query cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached result
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("posts", &self.len())
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`Database`]
///
/// ```
/// use postindex_engine::Database;
/// use std::time::Duration;
///
/// let db = Database::builder()
///     .cache_capacity(512)
///     .cache_ttl(Duration::from_secs(5))
///     .default_k(20)
///     .open()
///     .unwrap();
/// assert_eq!(db.config().default_k, 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    config: EngineConfig,
}

impl DatabaseBuilder {
    /// Builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting with `config`
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum number of memoized queries
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Disable the query cache
    pub fn no_cache(self) -> Self {
        self.cache_capacity(0)
    }

    /// Never invalidate cached results on insert (default)
    pub fn unbounded_cache(mut self) -> Self {
        self.config.cache_policy = CachePolicyKind::Unbounded;
        self.config.cache_ttl_ms = None;
        self
    }

    /// Invalidate cached results once anything has been inserted
    pub fn versioned_cache(mut self) -> Self {
        self.config.cache_policy = CachePolicyKind::Versioned;
        self.config.cache_ttl_ms = None;
        self
    }

    /// Expire cached results after `ttl` (whole milliseconds, at least 1)
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        let ms = ttl.as_millis().max(1);
        self.config.cache_policy = CachePolicyKind::Ttl;
        self.config.cache_ttl_ms = Some(u64::try_from(ms).unwrap_or(u64::MAX));
        self
    }

    /// Sort and dedup tags before keying the cache
    pub fn canonicalize_tags(mut self, enabled: bool) -> Self {
        self.config.canonicalize_tags = enabled;
        self
    }

    /// Limit used when a query does not set `k`
    pub fn default_k(mut self, k: usize) -> Self {
        self.config.default_k = k;
        self
    }

    /// Pre-allocate room for `capacity` posts
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Open the database
    pub fn open(self) -> std::result::Result<Database, ConfigError> {
        Database::with_config(self.config)
    }
}
