use crate::WordFreqError;

pub const DEFAULT_NUM_WORKERS: usize = 4;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// Settings for one run. `top_n` is only read by presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub num_workers: usize,
    pub top_n: usize,
    pub min_word_len: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
            top_n: DEFAULT_TOP_N,
            min_word_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), WordFreqError> {
        if self.num_workers == 0 {
            return Err(WordFreqError::Configuration(
                "num_workers must be at least 1".into(),
            ));
        }
        if self.top_n == 0 {
            return Err(WordFreqError::Configuration(
                "top_n must be at least 1".into(),
            ));
        }
        if self.min_word_len == 0 {
            return Err(WordFreqError::Configuration(
                "min_word_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
