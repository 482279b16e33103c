//! Request decoding and response encoding for the boundary layer
//!
//! The engine's typed API cannot receive a missing or wrongly typed field, so
//! `InvalidInput` only arises here, where loosely typed JSON is translated
//! into [`InsertPostRequest`] and [`PostQuery`](crate::PostQuery).
//!
//! ## Wire Format
//!
//! ```json
//! {"post_id": "…", "message": "Post added successfully."}
//! {"posts": [{"id": "…", "timestamp": 1, "tags": ["a"], "content": "…"}], "total_count": 1}
//! {"code": "InvalidRange", "error": "start_time cannot be greater than end_time (10 > 5)"}
//! ```

use crate::error::{Error, Result};
use crate::post::Post;
use crate::query::{PostQuery, QueryResult};
use crate::types::{PostId, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded insert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertPostRequest {
    /// Post time in seconds
    pub timestamp: Timestamp,
    /// Tags in caller order
    pub tags: Vec<String>,
    /// Post body
    pub content: String,
}

impl InsertPostRequest {
    /// Decode `{timestamp, tags, content}`; every field is required
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = as_object(value)?;
        let timestamp = match object.get("timestamp") {
            Some(v) => integer_field("timestamp", v)?,
            None => return Err(missing("timestamp")),
        };
        let tags = match object.get("tags") {
            Some(v) => string_list_field("tags", v)?,
            None => return Err(missing("tags")),
        };
        let content = match object.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(wrong_type("content", "a string")),
            None => return Err(missing("content")),
        };
        Ok(InsertPostRequest {
            timestamp,
            tags,
            content,
        })
    }

    /// Decode from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json(&parse_json(text)?)
    }
}

impl PostQuery {
    /// Decode `{tags?, start_time?, end_time?, k?}`
    ///
    /// Accepts `tags` either as an array of strings or as a string holding a
    /// JSON-encoded array (the query-string form). `null` and an empty string
    /// count as absent.
    /// The range itself is checked when the query is evaluated, so an inverted
    /// range decodes fine and fails later with `InvalidRange`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = as_object(value)?;
        let mut query = PostQuery::new();

        match object.get("tags") {
            None | Some(Value::Null) => {}
            Some(Value::String(encoded)) if encoded.trim().is_empty() => {}
            Some(Value::String(encoded)) => {
                let decoded = serde_json::from_str::<Value>(encoded)
                    .map_err(|e| Error::invalid_input(format!("tags: {}", e)))?;
                query.tags = Some(string_list_field("tags", &decoded)?);
            }
            Some(v) => query.tags = Some(string_list_field("tags", v)?),
        }
        if let Some(v) = present(object, "start_time") {
            query.start = Some(integer_field("start_time", v)?);
        }
        if let Some(v) = present(object, "end_time") {
            query.end = Some(integer_field("end_time", v)?);
        }
        if let Some(v) = present(object, "k") {
            let k = v
                .as_u64()
                .and_then(|k| usize::try_from(k).ok())
                .ok_or_else(|| wrong_type("k", "a non-negative integer"))?;
            query.k = Some(k);
        }
        Ok(query)
    }

    /// Decode from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json(&parse_json(text)?)
    }
}

/// Response to a successful insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertReceipt {
    /// Fixed confirmation text
    pub message: &'static str,
    /// Identifier of the new post
    pub post_id: PostId,
}

impl InsertReceipt {
    /// Receipt for `post_id`
    pub fn new(post_id: PostId) -> Self {
        InsertReceipt {
            message: "Post added successfully.",
            post_id,
        }
    }
}

/// Response to a query
#[derive(Debug, Clone, Serialize)]
pub struct PostsPage<'a> {
    /// Returned posts, most recent first
    pub posts: Vec<&'a Post>,
    /// Matches before truncation
    pub total_count: usize,
}

impl<'a> From<&'a QueryResult> for PostsPage<'a> {
    fn from(result: &'a QueryResult) -> Self {
        PostsPage {
            posts: result.posts.iter().map(|p| p.as_ref()).collect(),
            total_count: result.total_count,
        }
    }
}

/// Error as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireError {
    /// Canonical code (`InvalidInput`, `InvalidRange`, `Internal`)
    pub code: &'static str,
    /// Human-readable message
    pub error: String,
}

impl From<&Error> for WireError {
    fn from(e: &Error) -> Self {
        WireError {
            code: e.code(),
            error: e.to_string(),
        }
    }
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::invalid_input(format!("malformed JSON: {}", e)))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_input("request body must be a JSON object"))
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn integer_field(field: &str, value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| wrong_type(field, "an integer"))
}

fn string_list_field(field: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| wrong_type(field, "an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_type(field, "an array of strings"))
        })
        .collect()
}

fn missing(field: &str) -> Error {
    Error::invalid_input(format!("missing field '{}'", field))
}

fn wrong_type(field: &str, expected: &str) -> Error {
    Error::invalid_input(format!("field '{}' must be {}", field, expected))
}
