//! Wordfreq engine: concurrent execution of the map-reduce stages plus the
//! IO around them (text acquisition, persistence, export).
mod acquire;
mod decode;
mod engine;
mod export;
mod extract;
mod fetch;
mod orchestrator;
mod persist;
mod progress;
mod types;

pub use acquire::{
    sample_text, AcquireError, AcquiredText, Acquirer, FallbackPolicy, TextOrigin, TextSource,
    SAMPLE_PARAGRAPH, SAMPLE_REPEAT,
};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{export_report, format_top_words, ExportError, ExportOptions, ExportSummary};
pub use extract::{extract_text, ExtractedText};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use orchestrator::Orchestrator;
pub use persist::{OutputDir, PersistError};
pub use progress::{ChannelProgressSink, NullProgressSink, ProgressSink};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobError, JobId,
    JobOutcome, JobProgress, Stage,
};
