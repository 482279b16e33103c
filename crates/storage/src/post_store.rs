//! Append-only post store
//!
//! The store is the single source of truth for post content. Each insert
//! appends one immutable [`Post`] and hands back both identifiers:
//! - [`PostId`]: the external UUID returned to callers
//! - [`DocId`]: the post's position, used by the indexes
//!
//! Nothing is ever removed, so a `DocId` issued by this store stays valid for
//! the lifetime of the store.

use postindex_core::{DocId, Error, Post, PostId, Result, Timestamp};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Authoritative, append-only collection of posts
#[derive(Debug, Default)]
pub struct PostStore {
    /// Posts in insertion order; index is the DocId
    posts: Vec<Arc<Post>>,
    /// External id → position
    by_id: FxHashMap<PostId, DocId>,
}

impl PostStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with room for `capacity` posts
    pub fn with_capacity(capacity: usize) -> Self {
        PostStore {
            posts: Vec::with_capacity(capacity),
            by_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Append a new post
    ///
    /// Generates a fresh [`PostId`] and returns it with the post's [`DocId`].
    pub fn insert(
        &mut self,
        timestamp: Timestamp,
        tags: Vec<String>,
        content: String,
    ) -> Result<(PostId, DocId)> {
        let doc = DocId::from_position(self.posts.len())
            .ok_or_else(|| Error::internal("post store is full"))?;
        let post = Post::new(timestamp, tags, content);
        let id = post.id;
        self.posts.push(Arc::new(post));
        self.by_id.insert(id, doc);
        Ok((id, doc))
    }

    /// Resolve a doc id issued by this store
    ///
    /// A miss means the id came from somewhere else and is reported as an
    /// internal error.
    #[inline]
    pub fn resolve(&self, doc: DocId) -> Result<&Arc<Post>> {
        self.posts
            .get(doc.as_usize())
            .ok_or_else(|| Error::internal(format!("unknown doc id {}", doc)))
    }

    /// Look up a post by its external id
    pub fn get(&self, id: &PostId) -> Option<Arc<Post>> {
        self.by_id
            .get(id)
            .and_then(|doc| self.posts.get(doc.as_usize()))
            .cloned()
    }

    /// Doc id of a post, by external id
    pub fn doc_id(&self, id: &PostId) -> Option<DocId> {
        self.by_id.get(id).copied()
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Iterate posts in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<Post>> + '_ {
        self.posts.iter()
    }
}
