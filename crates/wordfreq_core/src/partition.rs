use crate::WordFreqError;

/// Contiguous run of words assigned to one map task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Splits normalized text into exactly `n` chunks of `total / n` words each;
/// the last chunk also takes the remainder. With fewer words than chunks the
/// leading chunks are empty.
pub fn partition(normalized: &str, n: usize) -> Result<Vec<Chunk>, WordFreqError> {
    if n == 0 {
        return Err(WordFreqError::Configuration(
            "chunk count must be at least 1".into(),
        ));
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    let size = words.len() / n;

    let chunks = (0..n)
        .map(|index| {
            let start = index * size;
            let end = if index == n - 1 {
                words.len()
            } else {
                start + size
            };
            Chunk {
                index,
                text: words[start..end].join(" "),
            }
        })
        .collect();
    Ok(chunks)
}
