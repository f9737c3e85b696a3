use thiserror::Error;

/// Failure of a word-frequency run. No partial table accompanies any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordFreqError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("worker pool unavailable: {0}")]
    Resource(String),
    #[error("map task for chunk {chunk} failed: {message}")]
    MapTask { chunk: usize, message: String },
}
