use std::cmp::Reverse;
use std::time::Duration;

use crate::FrequencyTable;

/// Counters observed while a run executes. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Words in the normalized text, before filtering.
    pub word_count: usize,
    pub chunk_count: usize,
    /// `(word, 1)` emissions across all chunks.
    pub pair_count: u64,
    pub unique_words: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub table: FrequencyTable,
    pub stats: RunStats,
}

impl RunReport {
    pub fn top(&self, n: usize) -> Vec<RankedWord> {
        rank_words(&self.table, n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedWord {
    /// 1-based.
    pub rank: usize,
    pub word: String,
    pub count: u64,
}

/// The `n` most frequent words, count descending, ties broken by word.
pub fn rank_words(table: &FrequencyTable, n: usize) -> Vec<RankedWord> {
    let mut entries: Vec<(&str, u64)> = table.iter().collect();
    entries.sort_by_key(|&(word, count)| (Reverse(count), word));
    entries
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(idx, (word, count))| RankedWord {
            rank: idx + 1,
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Whole-table figures shown after the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSummary {
    pub unique_words: usize,
    pub total_words: u64,
    /// Words seen exactly once.
    pub singletons: usize,
}

impl TableSummary {
    pub fn of(table: &FrequencyTable) -> Self {
        Self {
            unique_words: table.len(),
            total_words: table.total(),
            singletons: table.iter().filter(|&(_, count)| count == 1).count(),
        }
    }
}
