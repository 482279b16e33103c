//! Post collection
//!
//! Owns the post store and both indexes and keeps them consistent: a single
//! [`PostCollection::insert`] appends the post and writes every index entry
//! for it before returning. Callers that share a collection across threads
//! wrap the whole collection in one lock so this unit stays atomic.
//!
//! ## Invariants
//!
//! - The timestamp index holds exactly one entry per stored post
//! - Every doc id in either index resolves in the store
//! - `version()` equals the number of posts and only ever grows

use crate::post_store::PostStore;
use crate::tag_index::TagIndex;
use crate::timestamp_index::TimestampIndex;
use postindex_core::{DocId, PostId, Result, Timestamp};
use tracing::trace;

/// Post store plus timestamp and tag indexes
#[derive(Debug, Default)]
pub struct PostCollection {
    store: PostStore,
    timestamps: TimestampIndex,
    tags: TagIndex,
}

impl PostCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection with room for `capacity` posts
    pub fn with_capacity(capacity: usize) -> Self {
        PostCollection {
            store: PostStore::with_capacity(capacity),
            timestamps: TimestampIndex::new(),
            tags: TagIndex::new(),
        }
    }

    /// Insert a post and index it
    ///
    /// The tag index gets one posting per tag occurrence.
    pub fn insert(
        &mut self,
        timestamp: Timestamp,
        tags: Vec<String>,
        content: String,
    ) -> Result<PostId> {
        let (id, doc) = self.store.insert(timestamp, tags, content)?;
        self.timestamps.insert(timestamp, doc);
        let post = self.store.resolve(doc)?;
        for tag in &post.tags {
            self.tags.insert(tag, doc);
        }
        trace!(post_id = %id, %doc, timestamp, tags = post.tags.len(), "indexed post");
        Ok(id)
    }

    /// Post store
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Timestamp index
    pub fn timestamps(&self) -> &TimestampIndex {
        &self.timestamps
    }

    /// Tag index
    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Monotonic version, bumped by every insert
    pub fn version(&self) -> u64 {
        self.store.len() as u64
    }

    /// Doc id of a post, by external id
    pub fn doc_id(&self, id: &PostId) -> Option<DocId> {
        self.store.doc_id(id)
    }
}
