//! Engine Integration Tests
//!
//! End-to-end behaviour of the index through the public facade: ordering,
//! filtering, caching, boundary decoding and concurrent access.

#[path = "../common/mod.rs"]
mod common;

mod boundary;
mod cache;
mod concurrency;
mod properties;
mod scenario;
