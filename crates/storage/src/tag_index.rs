//! Tag index
//!
//! Maps each tag to an append-ordered posting list of doc ids. A post gets
//! one posting per occurrence of a tag, so a tag repeated on the same post
//! shows up repeatedly in that tag's list. Lookups collapse postings into a
//! membership set, which makes the repeats harmless.

use postindex_core::DocId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Tag → posting list index
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    postings: FxHashMap<String, Vec<DocId>>,
}

impl TagIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `doc` to `tag`'s posting list
    pub fn insert(&mut self, tag: &str, doc: DocId) {
        match self.postings.get_mut(tag) {
            Some(list) => list.push(doc),
            None => {
                self.postings.insert(tag.to_string(), vec![doc]);
            }
        }
    }

    /// Raw posting list, in insertion order with repeats intact
    ///
    /// Unknown tags yield an empty slice.
    pub fn postings(&self, tag: &str) -> &[DocId] {
        self.postings.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Set of docs ever associated with `tag`
    pub fn lookup(&self, tag: &str) -> FxHashSet<DocId> {
        self.postings(tag).iter().copied().collect()
    }

    /// Set of docs carrying ANY of `tags`
    pub fn union<S: AsRef<str>>(&self, tags: &[S]) -> FxHashSet<DocId> {
        let mut docs = FxHashSet::default();
        for tag in tags {
            docs.extend(self.postings(tag.as_ref()).iter().copied());
        }
        docs
    }

    /// Number of postings recorded for `tag`
    pub fn posting_count(&self, tag: &str) -> usize {
        self.postings(tag).len()
    }

    /// Number of distinct tags
    pub fn tag_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterate distinct tags (unordered)
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }
}
