//! Query evaluation
//!
//! A query selects `time range ∩ (tag₁ ∪ tag₂ ∪ …)`, orders the matches by
//! timestamp descending, and returns the first `k` together with the total
//! number of matches.
//!
//! ## Plans
//!
//! Both plans produce the same result; they differ in which side of the
//! intersection drives the walk.
//!
//! - **RangeScan**: walk the timestamp index newest-first over `[start, end]`,
//!   keeping docs that pass the tag filter. Output is already in order, so the
//!   first `k` matches are the answer and the rest are only counted.
//! - **PostingScan**: start from the tag union, keep docs whose timestamp is
//!   in range, then select the top `k`. Used when the tag union is a small
//!   fraction of the collection.
//!
//! Ties on timestamp are broken by doc id descending: among posts with the
//! same timestamp the later insert comes first.

use postindex_core::{DocId, Post, PostQuery, QueryResult, Result, Timestamp};
use postindex_storage::PostCollection;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, error};

/// Tag unions at most `1 / POSTING_SCAN_RATIO` of the collection use PostingScan
const POSTING_SCAN_RATIO: usize = 8;

/// Evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Walk the timestamp range, filter by tag membership
    RangeScan,
    /// Walk the tag postings, filter by timestamp
    PostingScan,
}

/// Evaluate `query` against `collection`, choosing a plan automatically
///
/// Fails with `InvalidRange` before touching any index when `start > end`.
pub fn evaluate(
    collection: &PostCollection,
    query: &PostQuery,
    default_k: usize,
) -> Result<QueryResult> {
    query.validate()?;
    let tag_docs = query
        .tag_filter()
        .map(|tags| collection.tags().union(tags));
    let plan = choose_plan(collection, tag_docs.as_ref());
    run(collection, query, default_k, tag_docs, plan)
}

/// Evaluate `query` with a fixed plan
pub fn evaluate_with(
    collection: &PostCollection,
    query: &PostQuery,
    default_k: usize,
    plan: Plan,
) -> Result<QueryResult> {
    query.validate()?;
    let tag_docs = query
        .tag_filter()
        .map(|tags| collection.tags().union(tags));
    run(collection, query, default_k, tag_docs, plan)
}

fn choose_plan(collection: &PostCollection, tag_docs: Option<&FxHashSet<DocId>>) -> Plan {
    match tag_docs {
        Some(docs) if docs.len().saturating_mul(POSTING_SCAN_RATIO) <= collection.len() => {
            Plan::PostingScan
        }
        _ => Plan::RangeScan,
    }
}

fn run(
    collection: &PostCollection,
    query: &PostQuery,
    default_k: usize,
    tag_docs: Option<FxHashSet<DocId>>,
    plan: Plan,
) -> Result<QueryResult> {
    let k = query.effective_k(default_k);
    let result = match (plan, tag_docs) {
        (Plan::PostingScan, Some(docs)) => posting_scan(collection, query, k, &docs)?,
        (_, docs) => range_scan(collection, query, k, docs.as_ref())?,
    };
    debug!(
        ?plan,
        tags = ?query.tags,
        start = ?query.start,
        end = ?query.end,
        k,
        returned = result.posts.len(),
        total_count = result.total_count,
        "evaluated query"
    );
    Ok(result)
}

fn range_scan(
    collection: &PostCollection,
    query: &PostQuery,
    k: usize,
    tag_docs: Option<&FxHashSet<DocId>>,
) -> Result<QueryResult> {
    let mut posts = Vec::with_capacity(k.min(collection.len()));
    let mut total_count = 0;

    for (_, doc) in collection.timestamps().range(query.start, query.end).rev() {
        if tag_docs.map_or(false, |docs| !docs.contains(&doc)) {
            continue;
        }
        total_count += 1;
        if posts.len() < k {
            posts.push(resolve(collection, doc)?);
        }
    }

    Ok(QueryResult { posts, total_count })
}

fn posting_scan(
    collection: &PostCollection,
    query: &PostQuery,
    k: usize,
    tag_docs: &FxHashSet<DocId>,
) -> Result<QueryResult> {
    let start = query.start.unwrap_or(Timestamp::MIN);
    let end = query.end.unwrap_or(Timestamp::MAX);

    let mut matches: Vec<(Reverse<(Timestamp, DocId)>, &Arc<Post>)> =
        Vec::with_capacity(tag_docs.len());
    for &doc in tag_docs {
        let post = resolve_ref(collection, doc)?;
        if (start..=end).contains(&post.timestamp) {
            matches.push((Reverse((post.timestamp, doc)), post));
        }
    }

    let total_count = matches.len();
    if k < matches.len() {
        if k > 0 {
            matches.select_nth_unstable_by_key(k - 1, |(key, _)| *key);
        }
        matches.truncate(k);
    }
    matches.sort_unstable_by_key(|(key, _)| *key);

    let posts = matches.into_iter().map(|(_, post)| Arc::clone(post)).collect();
    Ok(QueryResult { posts, total_count })
}

fn resolve(collection: &PostCollection, doc: DocId) -> Result<Arc<Post>> {
    resolve_ref(collection, doc).map(Arc::clone)
}

fn resolve_ref(collection: &PostCollection, doc: DocId) -> Result<&Arc<Post>> {
    collection.store().resolve(doc).map_err(|e| {
        error!(%doc, "index entry does not resolve to a stored post");
        e
    })
}
