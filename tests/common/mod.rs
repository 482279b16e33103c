//! Shared helpers for integration tests.

#![allow(dead_code)]

pub use postindex::prelude::*;
pub use postindex::{EngineConfig, PostsPage};

use postindex::fixtures::PostGenerator;
use std::ops::Deref;

/// Fresh index with helpers for inserting and inspecting posts.
pub struct TestDb {
    pub index: PostIndex,
}

impl TestDb {
    /// Default settings (cache on, never invalidated by inserts).
    pub fn new() -> Self {
        Self {
            index: PostIndex::new(),
        }
    }

    /// Cache disabled, so every query sees the latest state.
    pub fn uncached() -> Self {
        Self::with(PostIndex::builder().no_cache())
    }

    /// Cache invalidated on every insert.
    pub fn versioned() -> Self {
        Self::with(PostIndex::builder().versioned_cache())
    }

    pub fn with(builder: PostIndexBuilder) -> Self {
        Self {
            index: builder.open().expect("open index"),
        }
    }

    /// The three-post fixture used throughout:
    /// A(100, [sports]), B(200, [tech]), C(150, [sports, tech]).
    pub fn scenario() -> Self {
        let db = Self::new();
        db.add(100, &["sports"], "A");
        db.add(200, &["tech"], "B");
        db.add(150, &["sports", "tech"], "C");
        db
    }

    /// `count` generated posts from a fixed seed and clock.
    pub fn seeded(count: usize, seed: u64) -> Self {
        let db = Self::uncached();
        let mut generator = PostGenerator::seeded(seed).with_now(1_700_000_000);
        db.index
            .seed_with(&mut generator, count)
            .expect("seed index");
        db
    }

    pub fn add(&self, timestamp: i64, tags: &[&str], content: &str) -> PostId {
        self.index
            .insert_post(timestamp, tags.iter().copied(), content)
            .expect("insert post")
    }

    /// Contents of a cached query, in result order.
    pub fn contents(&self, query: &PostQuery) -> Vec<String> {
        contents(&self.index.get_posts(query).expect("query"))
    }
}

impl Deref for TestDb {
    type Target = PostIndex;

    fn deref(&self) -> &PostIndex {
        &self.index
    }
}

pub fn contents(result: &QueryResult) -> Vec<String> {
    result.posts.iter().map(|p| p.content.clone()).collect()
}

pub fn timestamps(result: &QueryResult) -> Vec<i64> {
    result.posts.iter().map(|p| p.timestamp).collect()
}

/// Descending by timestamp.
pub fn is_sorted_desc(result: &QueryResult) -> bool {
    result
        .posts
        .windows(2)
        .all(|w| w[0].timestamp >= w[1].timestamp)
}
