//! Query engine for PostIndex
//!
//! This crate turns the storage structures into a queryable, shareable index:
//! - [`query`]: plan selection and top-K evaluation
//! - [`QueryCache`]: LRU memoization with a configurable staleness policy
//! - [`Database`]: the collection behind a read-write lock, plus the cache
//! - [`EngineConfig`]: TOML-loadable settings
//! - [`fixtures`]: synthetic post generation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod database;
pub mod fixtures;
pub mod query;

pub use cache::{CachePolicy, CacheStats, QueryCache};
pub use config::{CachePolicyKind, ConfigError, EngineConfig, DEFAULT_CACHE_CAPACITY};
pub use database::{Database, DatabaseBuilder};
pub use query::{evaluate, evaluate_with, Plan};
