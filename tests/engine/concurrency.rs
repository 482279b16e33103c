//! Concurrent Access
//!
//! Inserts are atomic with respect to queries: no reader sees a post
//! without its index entries.

use crate::common::*;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_queries_see_consistent_snapshots() {
    let db = Arc::new(TestDb::uncached());
    let writers: Vec<_> = (0..4)
        .map(|w| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for i in 0..200 {
                    db.add(i, &["shared", "other"], &format!("{}-{}", w, i));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for _ in 0..100 {
                    let tagged = db
                        .get_posts_uncached(&PostQuery::new().tags(["other"]).k(usize::MAX))
                        .unwrap();
                    assert_eq!(tagged.posts.len(), tagged.total_count);
                    assert!(is_sorted_desc(&tagged));
                    for post in &tagged.posts {
                        assert!(post.has_tag("shared"));
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(db.len(), 800);
    for tag in ["shared", "other"] {
        let tagged = db.get_posts_uncached(&PostQuery::new().tags([tag]).k(0)).unwrap();
        assert_eq!(tagged.total_count, 800);
    }
}

#[test]
fn clones_share_one_index_across_threads() {
    let index = PostIndex::new();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let index = index.clone();
            thread::spawn(move || index.insert_post(t, ["t"], "x").unwrap())
        })
        .collect();
    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(index.len(), 8);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 8);
}
