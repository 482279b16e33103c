//! Post record
//!
//! Posts are immutable records in an append-only store. Each post carries:
//! - A unique [`PostId`] assigned at creation
//! - A caller-supplied timestamp (not unique, any value)
//! - An ordered tag list, duplicates preserved as given
//! - Free-form content

use crate::types::{PostId, Timestamp};
use serde::{Deserialize, Serialize};

/// A timestamped, tagged text post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (assigned by the store)
    pub id: PostId,
    /// Post time in seconds
    pub timestamp: Timestamp,
    /// Tags in caller order, may be empty or contain repeats
    pub tags: Vec<String>,
    /// Content, unvalidated
    pub content: String,
}

impl Post {
    /// Create a post with a fresh identifier
    pub fn new(timestamp: Timestamp, tags: Vec<String>, content: impl Into<String>) -> Self {
        Self::with_id(PostId::new(), timestamp, tags, content)
    }

    /// Create a post with a known identifier
    pub fn with_id(
        id: PostId,
        timestamp: Timestamp,
        tags: Vec<String>,
        content: impl Into<String>,
    ) -> Self {
        Post {
            id,
            timestamp,
            tags,
            content: content.into(),
        }
    }

    /// Check whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether the post carries at least one of `tags`
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.has_tag(t.as_ref()))
    }
}
