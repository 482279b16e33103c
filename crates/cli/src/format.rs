//! Output formatting for the three output modes.
//!
//! - Human: numbered lists and `(error)` prefixes
//! - Json: the wire encoding (`InsertReceipt`, `PostsPage`, `WireError`)
//! - Raw: bare values, one per line

use postindex::{Error, Post, PostsPage, WireError};
use serde_json::json;

use crate::state::Output;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Render a command result.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format_human(output),
        OutputMode::Json => format_json(output),
        OutputMode::Raw => format_raw(output),
    }
}

/// Render an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}", err),
        OutputMode::Json => {
            serde_json::to_string(&WireError::from(err)).unwrap_or_else(|_| err.to_string())
        }
        OutputMode::Raw => err.to_string(),
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Added(receipt) => format!("{} (id {})", receipt.message, receipt.post_id),
        Output::Page(page) => {
            if page.posts.is_empty() {
                return format!("(empty list, {} matched)", page.total_count);
            }
            let mut lines: Vec<String> = page
                .posts
                .iter()
                .enumerate()
                .map(|(i, post)| format!("{}) {}", i + 1, describe(post)))
                .collect();
            lines.push(format!(
                "({} of {} matched)",
                page.posts.len(),
                page.total_count
            ));
            lines.join("\n")
        }
        Output::Seeded { inserted, total } => {
            format!("(seeded {} posts, {} total)", inserted, total)
        }
        Output::Stats { posts, span, cache } => [
            format!("posts: {}", posts),
            match span {
                Some((oldest, newest)) => format!("timestamps: {}..={}", oldest, newest),
                None => "timestamps: (none)".to_string(),
            },
            format!("cache_entries: {}/{}", cache.entries, cache.capacity),
            format!("cache_hits: {}", cache.hits),
            format!("cache_misses: {}", cache.misses),
            format!("cache_invalidations: {}", cache.invalidations),
            format!("cache_hit_rate: {:.2}", cache.hit_rate()),
        ]
        .join("\n"),
    }
}

fn describe(post: &Post) -> String {
    format!(
        "[{}] {} {:?} ({})",
        post.timestamp,
        post.tags.join(","),
        post.content,
        post.id
    )
}

fn format_json(output: &Output) -> String {
    let value = match output {
        Output::Added(receipt) => serde_json::to_value(receipt),
        Output::Page(page) => serde_json::to_value(PostsPage::from(page)),
        Output::Seeded { inserted, total } => Ok(json!({
            "inserted": inserted,
            "total": total,
        })),
        Output::Stats { posts, span, cache } => Ok(json!({
            "posts": posts,
            "oldest": span.map(|(oldest, _)| oldest),
            "newest": span.map(|(_, newest)| newest),
            "cache": {
                "entries": cache.entries,
                "capacity": cache.capacity,
                "hits": cache.hits,
                "misses": cache.misses,
                "invalidations": cache.invalidations,
            },
        })),
    };
    match value {
        Ok(v) => v.to_string(),
        Err(e) => json!({ "code": "Internal", "error": e.to_string() }).to_string(),
    }
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Added(receipt) => receipt.post_id.to_string(),
        Output::Page(page) => page
            .posts
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Seeded { inserted, .. } => inserted.to_string(),
        Output::Stats { posts, cache, .. } => format!(
            "{} {} {} {}",
            posts, cache.entries, cache.hits, cache.misses
        ),
    }
}
