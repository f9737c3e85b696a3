//! Wordfreq core: pure map-reduce stages for counting word frequencies.
//!
//! Nothing in this crate performs IO or spawns threads; the engine crate
//! drives these stages concurrently.
mod aggregate;
mod config;
mod count;
mod error;
mod normalize;
mod partition;
mod report;
mod stopwords;

pub use aggregate::{aggregate, FrequencyTable};
pub use config::{RunConfig, DEFAULT_MIN_WORD_LEN, DEFAULT_NUM_WORKERS, DEFAULT_TOP_N};
pub use count::{ChunkCounter, FilteredWordCounter, PartialCount};
pub use error::WordFreqError;
pub use normalize::{normalize_text, normalized_word_count};
pub use partition::{partition, Chunk};
pub use report::{rank_words, RankedWord, RunReport, RunStats, TableSummary};
pub use stopwords::{StopWords, WordFilter};
