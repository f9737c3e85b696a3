use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "could", "can", "may", "might", "must",
    "shall", "i", "you", "he", "she", "it", "we", "they", "them", "their", "this", "that",
    "these", "those", "not", "no", "yes", "all", "any", "some", "each", "every", "most", "more",
    "less", "much", "many", "few", "little", "big", "small", "large", "great", "good", "bad",
    "new", "old", "first", "last", "next", "same", "other",
];

static ENGLISH: LazyLock<Arc<StopWords>> =
    LazyLock::new(|| Arc::new(StopWords::from_words(ENGLISH_STOP_WORDS.iter().copied())));

/// Closed set of words excluded from counting. Entries are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in English list, built once per process.
    pub fn english() -> Arc<StopWords> {
        Arc::clone(&ENGLISH)
    }

    pub(crate) fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Expects an already lowercased word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Eligibility rule applied by the map stage: at least `min_len` characters
/// and not a stop word.
#[derive(Debug, Clone)]
pub struct WordFilter {
    pub min_len: usize,
    pub stop_words: Arc<StopWords>,
}

impl WordFilter {
    pub fn new(min_len: usize, stop_words: Arc<StopWords>) -> Self {
        Self {
            min_len,
            stop_words,
        }
    }

    pub fn is_eligible(&self, word: &str) -> bool {
        word.chars().count() >= self.min_len && !self.stop_words.contains(word)
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MIN_WORD_LEN, StopWords::english())
    }
}
