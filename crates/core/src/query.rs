//! Query types
//!
//! [`PostQuery`] is the caller-facing filter description with named optional
//! fields. [`QuerySignature`] is the fully-defaulted form used as a cache key,
//! and [`QueryResult`] is what an evaluation returns.
//!
//! ## Tag filter states
//!
//! | `tags` | Meaning |
//! |--------|---------|
//! | `None` | no tag filter |
//! | `Some([])` | no tag filter, but a distinct cache signature |
//! | `Some([a, b, ..])` | posts carrying ANY of the tags (logical OR) |

use crate::error::{Error, Result};
use crate::post::Post;
use crate::types::Timestamp;
use std::sync::Arc;

/// Number of posts returned when a query does not set `k`
pub const DEFAULT_K: usize = 10;

/// Filter and limit for a post query
///
/// ```
/// use postindex_core::PostQuery;
///
/// let query = PostQuery::new()
///     .tags(["sports", "tech"])
///     .start(100)
///     .end(300)
///     .k(5);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostQuery {
    /// Tags to match (any of), or `None` for no tag filter
    pub tags: Option<Vec<String>>,
    /// Inclusive lower bound on timestamp, `None` for unbounded
    pub start: Option<Timestamp>,
    /// Inclusive upper bound on timestamp, `None` for unbounded
    pub end: Option<Timestamp>,
    /// Maximum number of posts to return, `None` for the default
    pub k: Option<usize>,
}

impl PostQuery {
    /// Query with no filters and the default limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Match posts carrying any of `tags`
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set the inclusive lower timestamp bound
    pub fn start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the inclusive upper timestamp bound
    pub fn end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the inclusive timestamp range
    pub fn between(self, start: Timestamp, end: Timestamp) -> Self {
        self.start(start).end(end)
    }

    /// Set the result limit
    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Reject a range whose start lies after its end
    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(Error::InvalidRange { start, end }),
            _ => Ok(()),
        }
    }

    /// Tags that actually filter, or `None` when no tag filter applies
    ///
    /// Both `None` and an empty list mean "do not filter by tag".
    pub fn tag_filter(&self) -> Option<&[String]> {
        self.tags.as_deref().filter(|tags| !tags.is_empty())
    }

    /// Limit after applying `default_k`
    pub fn effective_k(&self, default_k: usize) -> usize {
        self.k.unwrap_or(default_k)
    }

    /// Cache key for this query
    ///
    /// Tag order is kept as given unless `canonicalize_tags` is set, in which
    /// case the key's tags are sorted and deduplicated.
    pub fn signature(&self, default_k: usize, canonicalize_tags: bool) -> QuerySignature {
        let tags = self.tags.clone().map(|mut tags| {
            if canonicalize_tags {
                tags.sort_unstable();
                tags.dedup();
            }
            tags
        });
        QuerySignature {
            tags,
            start: self.start,
            end: self.end,
            k: self.effective_k(default_k),
        }
    }
}

/// Exact identity of a cacheable query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySignature {
    /// Tag filter as keyed
    pub tags: Option<Vec<String>>,
    /// Lower bound
    pub start: Option<Timestamp>,
    /// Upper bound
    pub end: Option<Timestamp>,
    /// Effective limit
    pub k: usize,
}

/// Posts matching a query, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// At most `k` posts, timestamp descending
    pub posts: Vec<Arc<Post>>,
    /// Number of matches before truncation to `k`
    pub total_count: usize,
}

impl QueryResult {
    /// Empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether more posts matched than were returned
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.posts.len()
    }

    /// Number of returned posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether no post was returned
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
