//! Property Tests
//!
//! Random workloads checked against a brute-force scan of the inserted posts.

use crate::common::*;
use proptest::prelude::*;

const VOCAB: [&str; 5] = ["a", "b", "c", "d", "e"];

#[derive(Debug, Clone)]
struct Row {
    timestamp: i64,
    tags: Vec<&'static str>,
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (-50i64..50, prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..4))
            .prop_map(|(timestamp, tags)| Row { timestamp, tags }),
        0..60,
    )
}

fn load(rows: &[Row]) -> TestDb {
    let db = TestDb::uncached();
    for (i, row) in rows.iter().enumerate() {
        db.add(row.timestamp, &row.tags, &i.to_string());
    }
    db
}

proptest! {
    #[test]
    fn unfiltered_query_returns_everything_sorted(rows in rows()) {
        let db = load(&rows);
        let result = db.get_posts(&PostQuery::new().k(rows.len())).unwrap();
        prop_assert_eq!(result.total_count, rows.len());
        prop_assert_eq!(result.len(), rows.len());
        prop_assert!(is_sorted_desc(&result));

        let mut seen: Vec<_> = result.posts.iter().map(|p| p.id).collect();
        seen.sort_by_key(|id| id.to_string());
        seen.dedup();
        prop_assert_eq!(seen.len(), rows.len());
    }

    #[test]
    fn tag_filter_matches_brute_force(
        rows in rows(),
        wanted in prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 1..3),
        k in 0usize..20,
    ) {
        let db = load(&rows);
        let result = db.get_posts(&PostQuery::new().tags(wanted.clone()).k(k)).unwrap();

        let expected = rows
            .iter()
            .filter(|r| r.tags.iter().any(|t| wanted.contains(t)))
            .count();
        prop_assert_eq!(result.total_count, expected);
        prop_assert_eq!(result.len(), expected.min(k));
        for post in &result.posts {
            prop_assert!(post.has_any_tag(&wanted));
        }
    }

    #[test]
    fn range_filter_matches_brute_force(
        rows in rows(),
        start in -60i64..60,
        span in 0i64..60,
    ) {
        let db = load(&rows);
        let end = start + span;
        let result = db.get_posts(&PostQuery::new().between(start, end).k(rows.len())).unwrap();

        let expected = rows
            .iter()
            .filter(|r| (start..=end).contains(&r.timestamp))
            .count();
        prop_assert_eq!(result.total_count, expected);
        for post in &result.posts {
            prop_assert!((start..=end).contains(&post.timestamp));
        }
        prop_assert!(is_sorted_desc(&result));
    }

    #[test]
    fn inverted_range_always_rejected(start in any::<i64>(), end in any::<i64>()) {
        prop_assume!(start > end);
        let db = TestDb::scenario();
        let err = db.get_posts(&PostQuery::new().between(start, end)).unwrap_err();
        prop_assert!(err.is_invalid_range());
    }
}
