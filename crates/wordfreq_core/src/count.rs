use std::collections::HashMap;

use crate::WordFilter;

/// Occurrence counts of eligible words within one chunk.
///
/// Built once from the chunk's `(word, 1)` emissions and not mutated
/// afterwards; `pairs` is the number of emissions it absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialCount {
    counts: HashMap<String, u64>,
    pairs: u64,
}

impl PartialCount {
    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn pairs(&self) -> u64 {
        self.pairs
    }

    pub fn unique_words(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn into_counts(self) -> HashMap<String, u64> {
        self.counts
    }
}

/// Folds `(word, n)` emissions; every emission counts as one pair.
impl<'a> FromIterator<(&'a str, u64)> for PartialCount {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(pairs: I) -> Self {
        let mut partial = PartialCount::default();
        for (word, n) in pairs {
            *partial.counts.entry(word.to_owned()).or_insert(0) += n;
            partial.pairs += 1;
        }
        partial
    }
}

/// Map stage: turns one chunk of normalized text into a partial count.
///
/// Implementations run concurrently on the worker pool and must not share
/// mutable state between calls.
pub trait ChunkCounter: Send + Sync {
    fn count(&self, chunk: &str) -> PartialCount;
}

/// Counts words that pass a [`WordFilter`].
#[derive(Debug, Clone, Default)]
pub struct FilteredWordCounter {
    filter: WordFilter,
}

impl FilteredWordCounter {
    pub fn new(filter: WordFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &WordFilter {
        &self.filter
    }

    /// The unaggregated `(word, 1)` emissions for `chunk`, in chunk order.
    pub fn emit_pairs<'a>(&self, chunk: &'a str) -> Vec<(&'a str, u64)> {
        chunk
            .split_whitespace()
            .filter(|word| self.filter.is_eligible(word))
            .map(|word| (word, 1))
            .collect()
    }
}

impl ChunkCounter for FilteredWordCounter {
    fn count(&self, chunk: &str) -> PartialCount {
        self.emit_pairs(chunk).into_iter().collect()
    }
}
