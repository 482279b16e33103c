//! Convenient imports for PostIndex.
//!
//! ```
//! use postindex::prelude::*;
//!
//! let index = PostIndex::new();
//! index.insert_post(100, ["sports"], "A")?;
//! let page = index.get_posts(&PostQuery::new().tags(["sports"]))?;
//! assert_eq!(page.total_count, 1);
//! # Ok::<(), postindex::Error>(())
//! ```

// Main entry point
pub use crate::database::{PostIndex, PostIndexBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{Post, PostId, PostQuery, QueryResult, Timestamp};

// Cache types
pub use crate::types::{CachePolicy, CacheStats};

// Re-export serde_json for convenience
pub use serde_json::json;
