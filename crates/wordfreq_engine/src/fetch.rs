use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response, Url};

use crate::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobId, JobProgress,
    ProgressSink, Stage,
};

/// Limits applied to every download.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Mime types accepted, compared without parameters.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 32 * 1024 * 1024,
            allowed_content_types: [
                "text/plain",
                "text/html",
                "application/xhtml+xml",
                "text/markdown",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl FetchSettings {
    fn client(&self) -> Result<Client, FetchError> {
        Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .redirect(redirect::Policy::limited(self.redirect_limit))
            .build()
            .map_err(FetchError::from)
    }

    fn accepts(&self, content_type: &str) -> bool {
        let mime = content_type.split(';').next().unwrap_or_default().trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        job_id: JobId,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<FetchOutput, FetchError>;
}

/// Plain HTTP(S) GET with the limits from [`FetchSettings`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Rejects the response before reading its body.
    fn check(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let declared = response.content_length();
        if let Some(len) = declared.filter(|&len| len > self.settings.max_bytes) {
            return Err(self.settings.too_large(len));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        match content_type {
            Some(ct) if !self.settings.accepts(&ct) => Err(FetchError::new(
                FailureKind::UnsupportedContentType { content_type: ct },
                "unsupported content type",
            )),
            other => Ok(other),
        }
    }

    /// Streams the body, failing as soon as it grows past `max_bytes`.
    async fn read_body(
        &self,
        job_id: JobId,
        response: Response,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        sink.emit(downloaded(job_id, 0));
        let mut stream = response.bytes_stream();
        while let Some(piece) = stream.next().await {
            let piece = piece?;
            let len = (body.len() + piece.len()) as u64;
            if len > self.settings.max_bytes {
                return Err(self.settings.too_large(len));
            }
            body.extend_from_slice(&piece);
            sink.emit(downloaded(job_id, len));
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        job_id: JobId,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<FetchOutput, FetchError> {
        let target = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self.settings.client()?.get(target).send().await?;

        let content_type = self.check(&response)?;
        let final_url = response.url().to_string();
        let bytes = self.read_body(job_id, response, sink).await?;

        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn downloaded(job_id: JobId, bytes: u64) -> EngineEvent {
    EngineEvent::Progress(JobProgress {
        bytes: Some(bytes),
        ..JobProgress::at(job_id, Stage::Acquiring)
    })
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_redirect() {
            FailureKind::RedirectLimitExceeded
        } else {
            FailureKind::Network
        };
        FetchError::new(kind, err.to_string())
    }
}
