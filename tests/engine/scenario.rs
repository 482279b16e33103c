//! Query Semantics
//!
//! The three-post scenario plus ordering, filtering and truncation rules.

use crate::common::*;

// ============================================================================
// Scenario A(100, [sports]), B(200, [tech]), C(150, [sports, tech])
// ============================================================================

#[test]
fn tag_query_returns_most_recent_first() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().tags(["sports"]).k(10)).unwrap();
    assert_eq!(contents(&result), vec!["C", "A"]);
    assert_eq!(timestamps(&result), vec![150, 100]);
    assert_eq!(result.total_count, 2);
}

#[test]
fn range_query_is_inclusive() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().between(120, 300)).unwrap();
    assert_eq!(contents(&result), vec!["B", "C"]);
    assert_eq!(result.total_count, 2);

    let exact = db.get_posts(&PostQuery::new().between(150, 150)).unwrap();
    assert_eq!(contents(&exact), vec!["C"]);
}

#[test]
fn k_truncates_but_total_counts_everything() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().k(1)).unwrap();
    assert_eq!(contents(&result), vec!["B"]);
    assert_eq!(result.total_count, 3);
    assert!(result.is_truncated());
}

#[test]
fn k_zero_reports_count_only() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().tags(["tech"]).k(0)).unwrap();
    assert!(result.posts.is_empty());
    assert_eq!(result.total_count, 2);
}

#[test]
fn multiple_tags_are_or() {
    let db = TestDb::scenario();
    db.add(300, &["news"], "D");
    let result = db.get_posts(&PostQuery::new().tags(["sports", "news"])).unwrap();
    assert_eq!(contents(&result), vec!["D", "C", "A"]);
    assert_eq!(result.total_count, 3);
}

#[test]
fn tags_and_range_combine() {
    let db = TestDb::scenario();
    let result = db
        .get_posts(&PostQuery::new().tags(["sports"]).between(120, 300))
        .unwrap();
    assert_eq!(contents(&result), vec!["C"]);
    assert_eq!(result.total_count, 1);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn empty_index_returns_empty_page() {
    let db = TestDb::new();
    let result = db.get_posts(&PostQuery::new()).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.total_count, 0);
}

#[test]
fn unknown_tag_matches_nothing() {
    let db = TestDb::scenario();
    let result = db.get_posts(&PostQuery::new().tags(["gardening"])).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.total_count, 0);
}

#[test]
fn empty_tag_list_means_no_filter() {
    let db = TestDb::scenario();
    let empty: [&str; 0] = [];
    let result = db.get_posts(&PostQuery::new().tags(empty)).unwrap();
    assert_eq!(result.total_count, 3);
}

#[test]
fn inverted_range_is_rejected() {
    let db = TestDb::scenario();
    let err = db.get_posts(&PostQuery::new().between(10, 5)).unwrap_err();
    assert!(err.is_invalid_range());
    assert_eq!(err.code(), "InvalidRange");
}

#[test]
fn open_ended_ranges() {
    let db = TestDb::scenario();
    db.add(-50, &["sports"], "old");

    let from = db.get_posts(&PostQuery::new().start(150)).unwrap();
    assert_eq!(contents(&from), vec!["B", "C"]);

    let until = db.get_posts(&PostQuery::new().end(100)).unwrap();
    assert_eq!(contents(&until), vec!["A", "old"]);
}

#[test]
fn equal_timestamps_latest_insert_first() {
    let db = TestDb::new();
    db.add(10, &["x"], "first");
    db.add(10, &["x"], "second");
    db.add(10, &["x"], "third");
    assert_eq!(
        db.contents(&PostQuery::new().tags(["x"])),
        vec!["third", "second", "first"]
    );
}

#[test]
fn duplicate_tags_on_a_post_count_once() {
    let db = TestDb::new();
    db.add(1, &["a", "a", "a"], "dup");
    let result = db.get_posts(&PostQuery::new().tags(["a", "a"])).unwrap();
    assert_eq!(contents(&result), vec!["dup"]);
    assert_eq!(result.total_count, 1);
}

#[test]
fn default_k_is_ten() {
    let db = TestDb::uncached();
    for ts in 0..25 {
        db.add(ts, &[], "p");
    }
    let result = db.get_posts(&PostQuery::new()).unwrap();
    assert_eq!(result.len(), 10);
    assert_eq!(result.total_count, 25);
    assert_eq!(timestamps(&result), (15..25i64).rev().collect::<Vec<_>>());
}

#[test]
fn lookup_by_id() {
    let db = TestDb::new();
    let id = db.add(42, &["a", "b"], "hello");
    let post = db.post(&id).unwrap();
    assert_eq!(post.id, id);
    assert_eq!(post.timestamp, 42);
    assert_eq!(post.tags, vec!["a", "b"]);
    assert!(db.post(&PostId::new()).is_none());
}
