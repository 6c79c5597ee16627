use std::collections::HashMap;

use crate::types::identifiers::ContentHash;

/// Hash-indexed pool of every instance ever committed with a given exact
/// content, across the whole article history. Instances are appended in
/// creation order, which is what makes the k-th-occurrence disambiguation
/// of duplicate content well defined.
#[derive(Debug, Default)]
pub struct ContentStore<I> {
    entries: HashMap<ContentHash, Vec<I>>,
}

impl<I: Copy> ContentStore<I> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, hash: ContentHash, instance: I) {
        self.entries.entry(hash).or_default().push(instance);
    }

    /// All historical instances under `hash`, oldest first.
    pub fn instances(&self, hash: &ContentHash) -> &[I] {
        self.entries.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn distinct_hashes(&self) -> usize {
        self.entries.len()
    }
}

/// Running per-hash occurrence counter used wherever an appearance-ordered
/// hash sequence has to be resolved back to concrete instances: the k-th
/// occurrence of a hash always maps to the k-th stored instance.
#[derive(Debug, Default)]
pub(crate) struct OccurrenceCounter {
    seen: HashMap<ContentHash, usize>,
}

impl OccurrenceCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Zero-based occurrence index of `hash`, advancing the counter.
    pub(crate) fn next(&mut self, hash: &ContentHash) -> usize {
        let slot = self.seen.entry(hash.clone()).or_insert(0);
        let occurrence = *slot;
        *slot += 1;
        occurrence
    }
}
