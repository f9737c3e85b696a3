use std::collections::BTreeMap;

use crate::PartialCount;

/// Word -> total occurrences across every chunk of a run.
///
/// Ordered by word so iteration, equality and debug output are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one chunk's counts. Merging is commutative and associative.
    pub fn merge(&mut self, partial: PartialCount) {
        for (word, count) in partial.into_counts() {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the number of `(word, 1)` emissions.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn into_map(self) -> BTreeMap<String, u64> {
        self.counts
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(entries: I) -> Self {
        let mut table = FrequencyTable::new();
        for (word, count) in entries {
            *table.counts.entry(word.into()).or_insert(0) += count;
        }
        table
    }
}

/// Reduce stage: sums partial counts in whatever order they arrive.
pub fn aggregate<I>(partials: I) -> FrequencyTable
where
    I: IntoIterator<Item = PartialCount>,
{
    partials
        .into_iter()
        .fold(FrequencyTable::new(), |mut table, partial| {
            table.merge(partial);
            table
        })
}
