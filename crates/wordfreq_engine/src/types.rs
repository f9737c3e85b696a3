use std::fmt;

use wordfreq_core::{RunReport, WordFreqError};

use crate::acquire::{AcquireError, TextOrigin};
use crate::export::{ExportError, ExportSummary};

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Started,
    Acquiring,
    Normalizing,
    Partitioning,
    Mapping { completed: usize, total: usize },
    Reducing,
    Writing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub stage: Stage,
    pub bytes: Option<u64>,
    pub words: Option<usize>,
}

impl JobProgress {
    pub fn at(job_id: JobId, stage: Stage) -> Self {
        Self {
            job_id,
            stage,
            bytes: None,
            words: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(JobProgress),
    JobCompleted {
        job_id: JobId,
        result: Result<JobOutcome, JobError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub origin: TextOrigin,
    pub report: RunReport,
    pub export: Option<ExportSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Why a job failed, as reported on the event channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct JobError {
    pub kind: FailureKind,
    pub message: String,
}

impl From<AcquireError> for JobError {
    fn from(err: AcquireError) -> Self {
        let kind = match &err {
            AcquireError::Fetch(fetch) => fetch.kind.clone(),
            AcquireError::Decode(_) => FailureKind::Decode,
            AcquireError::Read { .. } => FailureKind::Io,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<WordFreqError> for JobError {
    fn from(err: WordFreqError) -> Self {
        let kind = match &err {
            WordFreqError::Configuration(_) => FailureKind::Configuration,
            WordFreqError::Resource(_) => FailureKind::Resource,
            WordFreqError::MapTask { chunk, .. } => FailureKind::MapTask { chunk: *chunk },
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for JobError {
    fn from(err: ExportError) -> Self {
        Self {
            kind: FailureKind::Export,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    Decode,
    Io,
    Configuration,
    Resource,
    MapTask { chunk: usize },
    Export,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Configuration => write!(f, "configuration error"),
            FailureKind::Resource => write!(f, "resource error"),
            FailureKind::MapTask { chunk } => write!(f, "map task failed on chunk {chunk}"),
            FailureKind::Export => write!(f, "export error"),
        }
    }
}
