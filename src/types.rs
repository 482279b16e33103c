//! Public types for the PostIndex API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Data model
pub use postindex_core::{Post, PostId, Timestamp};

// Queries
pub use postindex_core::{PostQuery, QueryResult, QuerySignature, DEFAULT_K};

// Boundary encoding
pub use postindex_core::request::{InsertPostRequest, InsertReceipt, PostsPage, WireError};

// Engine configuration and cache
pub use postindex_engine::{
    CachePolicy, CachePolicyKind, CacheStats, EngineConfig, DEFAULT_CACHE_CAPACITY,
};
