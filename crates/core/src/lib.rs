//! Core types for PostIndex
//!
//! This crate defines the types shared by every layer:
//! - [`Post`], [`PostId`], [`DocId`], [`Timestamp`]: the data model
//! - [`PostQuery`], [`QuerySignature`], [`QueryResult`]: query description and results
//! - [`Error`]: the error taxonomy (`InvalidInput`, `InvalidRange`, `Internal`)
//! - [`request`]: JSON request decoding and response encoding for the boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod post;
pub mod query;
pub mod request;
pub mod types;

pub use error::{Error, Result};
pub use post::Post;
pub use query::{PostQuery, QueryResult, QuerySignature, DEFAULT_K};
pub use types::{DocId, PostId, Timestamp};
