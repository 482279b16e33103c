//! JSON Boundary
//!
//! Decoding of loosely typed request bodies and the wire encoding of
//! responses and errors.

use crate::common::*;
use postindex::{InsertPostRequest, WireError};

#[test]
fn insert_body_round_trips_through_index() {
    let db = TestDb::new();
    let receipt = db
        .insert_json(&json!({"timestamp": 100, "tags": ["sports"], "content": "A"}))
        .unwrap();
    let encoded = serde_json::to_value(&receipt).unwrap();
    assert_eq!(encoded["message"], "Post added successfully.");
    assert_eq!(encoded["post_id"], receipt.post_id.to_string());
    assert_eq!(db.post(&receipt.post_id).unwrap().content, "A");
}

#[test]
fn insert_body_missing_fields() {
    let db = TestDb::new();
    for (body, field) in [
        (json!({"tags": [], "content": "x"}), "timestamp"),
        (json!({"timestamp": 1, "content": "x"}), "tags"),
        (json!({"timestamp": 1, "tags": []}), "content"),
    ] {
        let err = db.insert_json(&body).unwrap_err();
        assert!(err.is_invalid_input(), "{}", err);
        assert!(err.to_string().contains(field), "{}", err);
    }
    assert!(db.is_empty());
}

#[test]
fn insert_body_wrong_types() {
    for body in [
        json!({"timestamp": "soon", "tags": [], "content": "x"}),
        json!({"timestamp": 1.5, "tags": [], "content": "x"}),
        json!({"timestamp": 1, "tags": "sports", "content": "x"}),
        json!({"timestamp": 1, "tags": [1], "content": "x"}),
        json!({"timestamp": 1, "tags": [], "content": 7}),
        json!(["not", "an", "object"]),
    ] {
        assert!(InsertPostRequest::from_json(&body).is_err(), "{}", body);
    }
}

#[test]
fn query_params_accept_encoded_tags() {
    let db = TestDb::scenario();
    let result = db
        .get_posts_json(&json!({"tags": "[\"sports\"]", "k": 10}))
        .unwrap();
    assert_eq!(contents(&result), vec!["C", "A"]);

    let same = db.get_posts_json(&json!({"tags": ["sports"]})).unwrap();
    assert_eq!(contents(&same), vec!["C", "A"]);
}

#[test]
fn query_params_null_is_absent() {
    let db = TestDb::scenario();
    let result = db
        .get_posts_json(&json!({"tags": null, "start_time": null, "end_time": null, "k": null}))
        .unwrap();
    assert_eq!(result.total_count, 3);
}

#[test]
fn query_params_empty_tag_string_means_no_filter() {
    let db = TestDb::scenario();
    let result = db.get_posts_json(&json!({"tags": ""})).unwrap();
    assert_eq!(contents(&result), vec!["B", "C", "A"]);
    assert_eq!(result.total_count, 3);
}

#[test]
fn query_params_range() {
    let db = TestDb::scenario();
    let result = db
        .get_posts_json(&json!({"start_time": 120, "end_time": 300}))
        .unwrap();
    assert_eq!(contents(&result), vec!["B", "C"]);

    let err = db
        .get_posts_json(&json!({"start_time": 10, "end_time": 5}))
        .unwrap_err();
    assert!(err.is_invalid_range());
}

#[test]
fn query_params_reject_bad_k() {
    let db = TestDb::scenario();
    for k in [json!(-1), json!("ten"), json!(2.5)] {
        let err = db.get_posts_json(&json!({ "k": k })).unwrap_err();
        assert!(err.is_invalid_input(), "{}", err);
    }
}

#[test]
fn page_encoding() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().k(1)).unwrap();
    let encoded = serde_json::to_value(PostsPage::from(&result)).unwrap();
    assert_eq!(encoded["total_count"], 3);
    let post = &encoded["posts"][0];
    assert_eq!(post["content"], "B");
    assert_eq!(post["timestamp"], 200);
    assert_eq!(post["tags"], json!(["tech"]));
    assert!(post["id"].is_string());
}

#[test]
fn error_encoding() {
    let err = postindex::Error::InvalidRange { start: 10, end: 5 };
    let encoded = serde_json::to_value(WireError::from(&err)).unwrap();
    assert_eq!(encoded["code"], "InvalidRange");
    assert_eq!(
        encoded["error"],
        "start_time cannot be greater than end_time (10 > 5)"
    );
}
