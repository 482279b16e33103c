//! Core identifier types
//!
//! - [`PostId`]: external, globally unique identifier handed to callers
//! - [`DocId`]: internal dense position of a post in the post store
//! - [`Timestamp`]: seconds-resolution post time

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post time in seconds. Any value is allowed, including negative ones.
pub type Timestamp = i64;

/// Unique identifier for a post
///
/// Assigned once at insert time and never reused for the lifetime of the
/// process. Serializes as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Create a new random PostId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use postindex_core::PostId;
    ///
    /// let id1 = PostId::new();
    /// let id2 = PostId::new();
    /// assert_ne!(id1, id2);
    /// ```
    pub fn new() -> Self {
        PostId(Uuid::new_v4())
    }

    /// Create PostId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        PostId(Uuid::from_bytes(bytes))
    }

    /// Get raw bytes representation
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Parse a PostId from its string form
    ///
    /// Returns `None` if the string is not a valid UUID.
    ///
    /// ```
    /// use postindex_core::PostId;
    ///
    /// let id = PostId::new();
    /// assert_eq!(PostId::parse(&id.to_string()), Some(id));
    /// assert_eq!(PostId::parse("not-a-uuid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(PostId)
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense internal identifier of a post
///
/// A `DocId` is the post's position in the post store. Both indexes hold
/// `DocId`s rather than `PostId`s so postings stay 4 bytes and resolution is
/// a slice index. `DocId`s are only meaningful for the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(u32);

impl DocId {
    /// Smallest doc id, used as the lower sentinel in timestamp range bounds
    pub const MIN: DocId = DocId(0);
    /// Largest doc id, used as the upper sentinel in timestamp range bounds
    pub const MAX: DocId = DocId(u32::MAX);

    /// Wrap a raw position
    pub const fn new(raw: u32) -> Self {
        DocId(raw)
    }

    /// Convert a store position into a DocId
    ///
    /// Returns `None` once the position no longer fits, which caps a store at
    /// `u32::MAX` posts (the top value is reserved for [`DocId::MAX`]).
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position)
            .ok()
            .filter(|raw| *raw < u32::MAX)
            .map(DocId)
    }

    /// Position of the post in the store
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Raw value
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
