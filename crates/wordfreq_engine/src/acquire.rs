use std::path::PathBuf;
use std::sync::Arc;

use wordfreq_logging::{wordfreq_info, wordfreq_warn};

use crate::decode::{decode_text, DecodeError};
use crate::extract::extract_text;
use crate::{EngineEvent, FetchError, Fetcher, JobId, JobProgress, ProgressSink, Stage};

/// Demonstration paragraph substituted when acquisition fails under
/// [`FallbackPolicy::UseSample`].
pub const SAMPLE_PARAGRAPH: &str = "
        This is a sample text for demonstration purposes. This text contains various words
        that will be analyzed for frequency. The word frequency analysis will show which
        words appear most often in this text. Some words like 'the', 'and', 'is' are
        common words that appear frequently in English text. Other words might be more
        specific to the content of the text. The MapReduce paradigm allows us to process
        large amounts of text efficiently by dividing the work among multiple processes.
        ";

pub const SAMPLE_REPEAT: usize = 50;

pub fn sample_text() -> String {
    SAMPLE_PARAGRAPH.repeat(SAMPLE_REPEAT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Url(String),
    File(PathBuf),
    Inline(String),
}

/// What to do when a source cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    Fail,
    UseSample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOrigin {
    Url { final_url: String },
    File(PathBuf),
    Inline,
    /// The source failed and the sample text was used instead.
    Sample { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredText {
    pub text: String,
    pub origin: TextOrigin,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
}

/// Turns a [`TextSource`] into text for the orchestrator.
pub struct Acquirer {
    fetcher: Arc<dyn Fetcher>,
    policy: FallbackPolicy,
}

impl Acquirer {
    pub fn new(fetcher: Arc<dyn Fetcher>, policy: FallbackPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub async fn acquire(
        &self,
        job_id: JobId,
        source: &TextSource,
        sink: &dyn ProgressSink,
    ) -> Result<AcquiredText, AcquireError> {
        sink.emit(EngineEvent::Progress(JobProgress::at(job_id, Stage::Acquiring)));
        match self.read_source(job_id, source, sink).await {
            Ok(acquired) => {
                wordfreq_info!(
                    "acquired {} characters from {:?}",
                    acquired.text.chars().count(),
                    acquired.origin
                );
                Ok(acquired)
            }
            Err(err) if self.policy == FallbackPolicy::UseSample => {
                wordfreq_warn!("acquisition failed ({}); using sample text", err);
                Ok(AcquiredText {
                    text: sample_text(),
                    origin: TextOrigin::Sample {
                        reason: err.to_string(),
                    },
                    encoding: None,
                })
            }
            Err(err) => Err(err),
        }
    }

    async fn read_source(
        &self,
        job_id: JobId,
        source: &TextSource,
        sink: &dyn ProgressSink,
    ) -> Result<AcquiredText, AcquireError> {
        match source {
            TextSource::Inline(text) => Ok(AcquiredText {
                text: text.clone(),
                origin: TextOrigin::Inline,
                encoding: None,
            }),
            TextSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|err| AcquireError::Read {
                        path: path.clone(),
                        message: err.to_string(),
                    })?;
                let decoded = decode_text(&bytes, None)?;
                Ok(AcquiredText {
                    text: decoded.text,
                    origin: TextOrigin::File(path.clone()),
                    encoding: Some(decoded.encoding_label),
                })
            }
            TextSource::Url(url) => {
                let output = self.fetcher.fetch(job_id, url, sink).await?;
                let content_type = output.metadata.content_type.as_deref();
                let decoded = decode_text(&output.bytes, content_type)?;
                let text = if content_type.is_some_and(is_html) {
                    extract_text(&decoded.text).text
                } else {
                    decoded.text
                };
                Ok(AcquiredText {
                    text,
                    origin: TextOrigin::Url {
                        final_url: output.metadata.final_url,
                    },
                    encoding: Some(decoded.encoding_label),
                })
            }
        }
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or(content_type).trim();
    mime.eq_ignore_ascii_case("text/html") || mime.eq_ignore_ascii_case("application/xhtml+xml")
}
