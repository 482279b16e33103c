//! Storage layer for PostIndex
//!
//! This crate implements the in-memory structures behind the query engine:
//! - PostStore: append-only authoritative post collection
//! - TimestampIndex: ordered (timestamp, doc id) set with range scans
//! - TagIndex: tag → posting list of doc ids
//! - PostCollection: the three above, updated together as one unit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod post_store;
pub mod tag_index;
pub mod timestamp_index;

pub use collection::PostCollection;
pub use post_store::PostStore;
pub use tag_index::TagIndex;
pub use timestamp_index::TimestampIndex;
