//! Synthetic posts for seeding and load testing
//!
//! Each generated post has:
//! - 1 to 3 distinct tags drawn from [`TAGS`]
//! - one line of content drawn from [`CONTENT`]
//! - a timestamp uniformly within the year before `now`

use crate::database::Database;
use chrono::Utc;
use postindex_core::request::InsertPostRequest;
use postindex_core::{PostId, Result, Timestamp};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Tag vocabulary
pub const TAGS: [&str; 7] = [
    "sports",
    "technology",
    "news",
    "entertainment",
    "science",
    "health",
    "education",
];

/// Content vocabulary
pub const CONTENT: [&str; 7] = [
    "This is an amazing post about sports.",
    "Learn about the latest in technology.",
    "Breaking news happening right now.",
    "Check out this new movie review.",
    "Discover the mysteries of science.",
    "Health tips to improve your lifestyle.",
    "Education trends to watch for in 2024.",
];

const ONE_YEAR_SECS: Timestamp = 60 * 60 * 24 * 365;

/// Random post generator
///
/// ```
/// use postindex_engine::fixtures::PostGenerator;
///
/// let mut a = PostGenerator::seeded(7).with_now(1_000_000);
/// let mut b = PostGenerator::seeded(7).with_now(1_000_000);
/// assert_eq!(a.next_post(), b.next_post());
/// ```
#[derive(Debug)]
pub struct PostGenerator {
    rng: StdRng,
    now: Timestamp,
}

impl PostGenerator {
    /// Generator seeded from OS entropy, anchored at the current time
    pub fn new() -> Self {
        PostGenerator {
            rng: StdRng::from_entropy(),
            now: Utc::now().timestamp(),
        }
    }

    /// Deterministic generator, anchored at the current time
    pub fn seeded(seed: u64) -> Self {
        PostGenerator {
            rng: StdRng::seed_from_u64(seed),
            now: Utc::now().timestamp(),
        }
    }

    /// Anchor generated timestamps at `now` instead of the wall clock
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    /// Generate one post
    pub fn next_post(&mut self) -> InsertPostRequest {
        let timestamp = self.now - self.rng.gen_range(0..=ONE_YEAR_SECS);
        let tag_count = self.rng.gen_range(1..=3);
        let tags = TAGS
            .choose_multiple(&mut self.rng, tag_count)
            .map(|t| t.to_string())
            .collect();
        let content = CONTENT
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string();
        InsertPostRequest {
            timestamp,
            tags,
            content,
        }
    }
}

impl Default for PostGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PostGenerator {
    type Item = InsertPostRequest;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_post())
    }
}

/// Insert `count` generated posts into `db`
pub fn seed(db: &Database, generator: &mut PostGenerator, count: usize) -> Result<Vec<PostId>> {
    let ids = generator
        .take(count)
        .map(|request| db.insert_request(request))
        .collect::<Result<Vec<_>>>()?;
    info!(count, total = db.len(), "seeded synthetic posts");
    Ok(ids)
}
