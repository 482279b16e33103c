//! Main entry point for PostIndex.
//!
//! This module provides the `PostIndex` struct, a cheap-to-clone handle to
//! a shared in-memory index.

use crate::error::Result;
use crate::types::{CacheStats, EngineConfig, InsertPostRequest, InsertReceipt};
use postindex_core::{Post, PostId, PostQuery, QueryResult, Timestamp};
use postindex_engine::fixtures::{self, PostGenerator};
use postindex_engine::Database;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// The post index.
///
/// Clones share the same underlying collection and cache, so a `PostIndex`
/// can be handed to as many threads as needed.
///
/// # Example
///
/// ```
/// use postindex::prelude::*;
///
/// let index = PostIndex::new();
/// index.insert_post(100, ["sports"], "A")?;
/// index.insert_post(200, ["tech"], "B")?;
/// index.insert_post(150, ["sports", "tech"], "C")?;
///
/// let page = index.get_posts(&PostQuery::new().between(120, 300))?;
/// let contents: Vec<_> = page.posts.iter().map(|p| p.content.as_str()).collect();
/// assert_eq!(contents, vec!["B", "C"]);
/// # Ok::<(), postindex::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct PostIndex {
    inner: Arc<Database>,
}

impl PostIndex {
    /// Create an empty index with default settings.
    ///
    /// The query cache holds 128 results and never invalidates on insert.
    pub fn new() -> Self {
        Self::from_engine(Arc::new(Database::new()))
    }

    /// Create a builder for index configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use postindex::PostIndex;
    ///
    /// let index = PostIndex::builder()
    ///     .cache_capacity(16)
    ///     .versioned_cache()
    ///     .open()?;
    /// assert_eq!(index.cache_stats().capacity, 16);
    /// # Ok::<(), postindex::Error>(())
    /// ```
    pub fn builder() -> PostIndexBuilder {
        PostIndexBuilder::new()
    }

    pub(crate) fn from_engine(inner: Arc<Database>) -> Self {
        Self { inner }
    }

    /// Insert a post.
    ///
    /// Returns the freshly generated id. The post is visible to
    /// [`get_posts_uncached`](Self::get_posts_uncached) immediately.
    pub fn insert_post<I, S>(
        &self,
        timestamp: Timestamp,
        tags: I,
        content: impl Into<String>,
    ) -> Result<PostId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        Ok(self.inner.insert_post(timestamp, tags, content)?)
    }

    /// Insert a post from a JSON body `{timestamp, tags, content}`.
    ///
    /// Missing or wrongly typed fields fail with `InvalidInput` before
    /// anything is stored.
    pub fn insert_json(&self, body: &Value) -> Result<InsertReceipt> {
        let request = InsertPostRequest::from_json(body)?;
        let post_id = self.inner.insert_request(request)?;
        Ok(InsertReceipt::new(post_id))
    }

    /// Most recent posts matching `query`.
    ///
    /// Results are memoized; under the default cache policy a repeated query
    /// can miss posts inserted after it was first answered.
    pub fn get_posts(&self, query: &PostQuery) -> Result<QueryResult> {
        Ok(self.inner.get_posts(query)?)
    }

    /// Most recent posts matching `query`, bypassing the cache.
    pub fn get_posts_uncached(&self, query: &PostQuery) -> Result<QueryResult> {
        Ok(self.inner.get_posts_uncached(query)?)
    }

    /// Decode `{tags?, start_time?, end_time?, k?}` and run it through the
    /// cached path.
    pub fn get_posts_json(&self, params: &Value) -> Result<QueryResult> {
        let query = PostQuery::from_json(params)?;
        self.get_posts(&query)
    }

    /// Look up a post by id.
    pub fn post(&self, id: &PostId) -> Option<Arc<Post>> {
        self.inner.post(id)
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Oldest and newest post timestamps, or `None` when empty.
    pub fn time_span(&self) -> Option<(Timestamp, Timestamp)> {
        self.inner.time_span()
    }

    /// Query cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache_stats()
    }

    /// Drop every cached query result.
    pub fn clear_cache(&self) {
        self.inner.clear_cache()
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        self.inner.config()
    }

    /// Insert `count` random posts dated within the last year.
    pub fn seed(&self, count: usize) -> Result<Vec<PostId>> {
        self.seed_with(&mut PostGenerator::new(), count)
    }

    /// Insert `count` posts drawn from `generator`.
    pub fn seed_with(&self, generator: &mut PostGenerator, count: usize) -> Result<Vec<PostId>> {
        Ok(fixtures::seed(&self.inner, generator, count)?)
    }
}

impl Default for PostIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for index configuration.
///
/// # Example
///
/// ```
/// use postindex::PostIndex;
/// use std::time::Duration;
///
/// let index = PostIndex::builder()
///     .cache_ttl(Duration::from_secs(30))
///     .canonicalize_tags(true)
///     .open()?;
/// assert!(index.config().canonicalize_tags);
/// # Ok::<(), postindex::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostIndexBuilder {
    inner: postindex_engine::DatabaseBuilder,
}

impl PostIndexBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded [`EngineConfig`].
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    /// Maximum number of memoized queries.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.inner = self.inner.cache_capacity(capacity);
        self
    }

    /// Disable the query cache entirely.
    pub fn no_cache(mut self) -> Self {
        self.inner = self.inner.no_cache();
        self
    }

    /// Invalidate cached results whenever a post is inserted.
    pub fn versioned_cache(mut self) -> Self {
        self.inner = self.inner.versioned_cache();
        self
    }

    /// Expire cached results after `ttl`.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.inner = self.inner.cache_ttl(ttl);
        self
    }

    /// Treat tag lists that differ only in order or duplicates as the same
    /// cached query.
    pub fn canonicalize_tags(mut self, enabled: bool) -> Self {
        self.inner = self.inner.canonicalize_tags(enabled);
        self
    }

    /// Limit used when a query leaves `k` unset.
    pub fn default_k(mut self, k: usize) -> Self {
        self.inner = self.inner.default_k(k);
        self
    }

    /// Pre-allocate room for `capacity` posts.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.inner = self.inner.initial_capacity(capacity);
        self
    }

    /// Open the index.
    pub fn open(self) -> Result<PostIndex> {
        let db = self.inner.open()?;
        Ok(PostIndex::from_engine(Arc::new(db)))
    }
}
