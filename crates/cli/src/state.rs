//! Session state: the open index and command execution.

use postindex::{CacheStats, InsertReceipt, PostIndex, QueryResult, Result};

use crate::parse::CliCommand;

/// Result of a successfully executed command.
#[derive(Debug)]
pub enum Output {
    Added(InsertReceipt),
    Page(QueryResult),
    Seeded { inserted: usize, total: usize },
    Stats {
        posts: usize,
        span: Option<(i64, i64)>,
        cache: CacheStats,
    },
}

/// State carried across the commands of one session.
pub struct SessionState {
    index: PostIndex,
}

impl SessionState {
    pub fn new(index: PostIndex) -> Self {
        Self { index }
    }

    /// Run one command.
    pub fn execute(&mut self, cmd: CliCommand) -> Result<Output> {
        match cmd {
            CliCommand::Add {
                timestamp,
                tags,
                content,
            } => {
                let post_id = self.index.insert_post(timestamp, tags, content)?;
                Ok(Output::Added(InsertReceipt::new(post_id)))
            }
            CliCommand::Get { query, no_cache } => {
                let page = if no_cache {
                    self.index.get_posts_uncached(&query)?
                } else {
                    self.index.get_posts(&query)?
                };
                Ok(Output::Page(page))
            }
            CliCommand::Seed { count } => {
                let ids = self.index.seed(count)?;
                Ok(Output::Seeded {
                    inserted: ids.len(),
                    total: self.index.len(),
                })
            }
            CliCommand::Stats => Ok(Output::Stats {
                posts: self.index.len(),
                span: self.index.time_span(),
                cache: self.index.cache_stats(),
            }),
        }
    }
}
