//! Timestamp index
//!
//! Ordered set of `(timestamp, doc id)` pairs. The pair order gives every
//! entry a unique, total position even when timestamps repeat.
//!
//! # Design
//!
//! - Insert: O(log n) into a `BTreeSet`, the set stays sorted at all times
//! - Range: O(log n) to locate both bounds, then a contiguous walk
//! - Bounds: searching by timestamp alone uses `DocId::MIN` / `DocId::MAX`
//!   as sentinels, so `[start, end]` is inclusive on both sides
//!
//! Absent bounds are open: no start means `i64::MIN`, no end means `i64::MAX`.

use postindex_core::{DocId, Timestamp};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::ops::Bound;

/// Ordered timestamp → doc id index
#[derive(Debug, Default, Clone)]
pub struct TimestampIndex {
    entries: BTreeSet<(Timestamp, DocId)>,
}

impl TimestampIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, keeping the set ordered
    pub fn insert(&mut self, timestamp: Timestamp, doc: DocId) {
        self.entries.insert((timestamp, doc));
    }

    /// Docs whose timestamp lies in `[start, end]`, ascending by `(timestamp, doc)`
    ///
    /// The iterator is double-ended, so `.rev()` walks most recent first.
    /// An inverted range yields nothing.
    pub fn range(
        &self,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> impl DoubleEndedIterator<Item = (Timestamp, DocId)> + '_ {
        let lower = (start.unwrap_or(Timestamp::MIN), DocId::MIN);
        let upper = (end.unwrap_or(Timestamp::MAX), DocId::MAX);
        // BTreeSet::range panics on inverted bounds
        let bounds = if lower <= upper {
            Some((Bound::Included(lower), Bound::Included(upper)))
        } else {
            None
        };
        bounds
            .into_iter()
            .flat_map(move |bounds| self.entries.range(bounds).copied())
    }

    /// Set of docs whose timestamp lies in `[start, end]`
    pub fn range_query(&self, start: Option<Timestamp>, end: Option<Timestamp>) -> FxHashSet<DocId> {
        self.range(start, end).map(|(_, doc)| doc).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest and newest timestamps, if any
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        Some((first.0, last.0))
    }
}
