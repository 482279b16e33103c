//! # PostIndex
//!
//! In-memory index of short, timestamped, tagged text posts.
//!
//! PostIndex answers two questions fast: "store this post" and "what are the
//! K most recent posts carrying any of these tags within this time range".
//!
//! ## Quick Start
//!
//! ```
//! use postindex::prelude::*;
//!
//! let index = PostIndex::new();
//! index.insert_post(100, ["sports"], "A")?;
//! index.insert_post(200, ["tech"], "B")?;
//! index.insert_post(150, ["sports", "tech"], "C")?;
//!
//! let page = index.get_posts(&PostQuery::new().tags(["sports"]))?;
//! let times: Vec<_> = page.posts.iter().map(|p| p.timestamp).collect();
//! assert_eq!(times, vec![150, 100]);
//! assert_eq!(page.total_count, 2);
//! # Ok::<(), postindex::Error>(())
//! ```
//!
//! ## Semantics
//!
//! - Multiple tags combine with OR
//! - Time ranges are inclusive; either bound may be omitted
//! - Results are ordered by timestamp descending, later inserts first on ties
//! - `total_count` counts every match, not just the returned `k`
//!
//! ## Caching
//!
//! Query results are memoized in an LRU cache (128 entries by default). By
//! default cached results are NOT invalidated by later inserts; use
//! [`PostIndex::get_posts_uncached`] for a fresh read, or open the index with
//! [`PostIndexBuilder::versioned_cache`] or [`PostIndexBuilder::cache_ttl`].

#![warn(missing_docs)]

mod database;
mod error;
mod types;

pub mod prelude;

// Re-export main entry points
pub use database::{PostIndex, PostIndexBuilder};
pub use error::{Error, Result};

// Re-export types
pub use types::*;

// Synthetic data
pub use postindex_engine::fixtures;
