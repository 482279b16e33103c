//! Query Cache Behaviour
//!
//! Default memoization is never invalidated by inserts; the uncached path
//! and the opt-in policies always reflect them.

use crate::common::*;
use std::time::Duration;

#[test]
fn cached_result_can_be_stale() {
    let db = TestDb::scenario();
    let query = PostQuery::new().tags(["sports"]);
    assert_eq!(db.contents(&query), vec!["C", "A"]);

    db.add(500, &["sports"], "D");

    // memoized answer is returned unchanged
    assert_eq!(db.contents(&query), vec!["C", "A"]);

    let fresh = db.get_posts_uncached(&query).unwrap();
    assert_eq!(contents(&fresh), vec!["D", "C", "A"]);
    assert_eq!(fresh.total_count, 3);
}

#[test]
fn repeated_queries_are_identical() {
    let db = TestDb::seeded(500, 11);
    let query = PostQuery::new().tags(["news", "health"]).k(20);
    let first = db.get_posts(&query).unwrap();
    let second = db.get_posts(&query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn hits_and_misses_are_counted() {
    let db = TestDb::scenario();
    let query = PostQuery::new().tags(["tech"]);
    db.get_posts(&query).unwrap();
    db.get_posts(&query).unwrap();
    db.get_posts(&query).unwrap();

    let stats = db.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.entries, 1);
}

#[test]
fn uncached_path_leaves_cache_alone() {
    let db = TestDb::scenario();
    db.get_posts_uncached(&PostQuery::new()).unwrap();
    let stats = db.cache_stats();
    assert_eq!(stats.hits + stats.misses, 0);
    assert_eq!(stats.entries, 0);
}

#[test]
fn none_and_empty_tags_are_cached_separately() {
    let db = TestDb::scenario();
    let empty: [&str; 0] = [];
    db.get_posts(&PostQuery::new()).unwrap();
    db.get_posts(&PostQuery::new().tags(empty)).unwrap();
    assert_eq!(db.cache_stats().entries, 2);
}

#[test]
fn versioned_policy_reflects_inserts() {
    let db = TestDb::versioned();
    db.add(100, &["sports"], "A");
    let query = PostQuery::new().tags(["sports"]);
    assert_eq!(db.contents(&query), vec!["A"]);

    db.add(200, &["sports"], "B");
    assert_eq!(db.contents(&query), vec!["B", "A"]);
    assert_eq!(db.cache_stats().invalidations, 1);
}

#[test]
fn ttl_policy_expires_entries() {
    let db = TestDb::with(PostIndex::builder().cache_ttl(Duration::from_millis(30)));
    db.add(1, &["a"], "first");
    let query = PostQuery::new();
    assert_eq!(db.contents(&query), vec!["first"]);

    db.add(2, &["a"], "second");
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(db.contents(&query), vec!["second", "first"]);
}

#[test]
fn lru_capacity_is_respected() {
    let db = TestDb::with(PostIndex::builder().cache_capacity(2));
    db.add(1, &["a"], "x");
    for k in 1..=5 {
        db.get_posts(&PostQuery::new().k(k)).unwrap();
    }
    assert_eq!(db.cache_stats().entries, 2);
    assert_eq!(db.cache_stats().capacity, 2);
}

#[test]
fn clear_cache_forces_recompute() {
    let db = TestDb::scenario();
    let query = PostQuery::new().k(0);
    assert_eq!(db.get_posts(&query).unwrap().total_count, 3);
    db.add(1, &[], "late");
    db.clear_cache();
    assert_eq!(db.get_posts(&query).unwrap().total_count, 4);
}

#[test]
fn canonical_tags_share_cache_entry() {
    let db = TestDb::with(PostIndex::builder().canonicalize_tags(true));
    db.add(1, &["a", "b"], "x");
    db.get_posts(&PostQuery::new().tags(["a", "b"])).unwrap();
    db.get_posts(&PostQuery::new().tags(["b", "a", "a"])).unwrap();
    assert_eq!(db.cache_stats().hits, 1);
    assert_eq!(db.cache_stats().entries, 1);
}

#[test]
fn config_from_toml() {
    let config = EngineConfig::from_toml_str("cache_capacity = 0\ndefault_k = 2\n").unwrap();
    let db = TestDb::with(PostIndex::builder().config(config));
    db.add(1, &[], "a");
    db.add(2, &[], "b");
    db.add(3, &[], "c");
    assert_eq!(db.contents(&PostQuery::new()), vec!["c", "b"]);
    assert_eq!(db.cache_stats().capacity, 0);
}
