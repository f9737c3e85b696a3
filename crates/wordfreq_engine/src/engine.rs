use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use tokio::runtime::Runtime;
use wordfreq_core::{RunConfig, WordFreqError};
use wordfreq_logging::{wordfreq_error, wordfreq_info, JobScope};

use crate::acquire::{Acquirer, FallbackPolicy, TextSource};
use crate::export::{export_report, ExportError, ExportOptions};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::persist::OutputDir;
use crate::{
    ChannelProgressSink, EngineEvent, JobError, JobId, JobOutcome, JobProgress, Orchestrator,
    ProgressSink, Stage,
};

#[derive(Clone)]
pub struct EngineConfig {
    pub run: RunConfig,
    pub fetch: FetchSettings,
    pub fallback: FallbackPolicy,
    /// Reports are exported here after each job when set.
    pub export_dir: Option<PathBuf>,
    pub export: ExportOptions,
    /// Timestamp written into exports. Defaults to the current UTC time in
    /// RFC 3339.
    pub generated_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            fetch: FetchSettings::default(),
            fallback: FallbackPolicy::default(),
            export_dir: None,
            export: ExportOptions::default(),
            generated_utc: Arc::new(|| Utc::now().to_rfc3339()),
        }
    }
}

enum EngineCommand {
    Analyze { job_id: JobId, source: TextSource },
}

/// Runs analysis jobs on a background thread and reports through
/// [`EngineEvent`]s. Jobs are processed one at a time in submission order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, WordFreqError> {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    /// Fails up front on an invalid [`RunConfig`] or when the worker pool or
    /// engine thread cannot be created.
    pub fn with_fetcher(
        config: EngineConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, WordFreqError> {
        let orchestrator = Orchestrator::from_config(&config.run)?;
        let io = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| WordFreqError::Resource(err.to_string()))?;
        let worker = Worker {
            io,
            acquirer: Acquirer::new(fetcher, config.fallback),
            orchestrator,
            config,
        };

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        thread::Builder::new()
            .name("wordfreq-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    worker.handle(command, &event_tx);
                }
            })
            .map_err(|err| WordFreqError::Resource(err.to_string()))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn analyze(&self, job_id: JobId, source: TextSource) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Analyze { job_id, source });
    }

    /// Blocks for the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

struct Worker {
    io: Runtime,
    acquirer: Acquirer,
    orchestrator: Orchestrator,
    config: EngineConfig,
}

impl Worker {
    fn handle(&self, command: EngineCommand, event_tx: &mpsc::Sender<EngineEvent>) {
        match command {
            EngineCommand::Analyze { job_id, source } => {
                let _scope = JobScope::enter(job_id);
                let sink = ChannelProgressSink::new(event_tx.clone());
                sink.emit(EngineEvent::Progress(JobProgress::at(job_id, Stage::Started)));

                let result = self.run_job(job_id, &source, &sink);
                match &result {
                    Ok(outcome) => wordfreq_info!(
                        "job done: {} unique words from {:?}",
                        outcome.report.stats.unique_words,
                        outcome.origin
                    ),
                    Err(err) => wordfreq_error!("job failed: {}", err),
                }
                let _ = event_tx.send(EngineEvent::JobCompleted { job_id, result });
            }
        }
    }

    fn run_job(
        &self,
        job_id: JobId,
        source: &TextSource,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, JobError> {
        let acquired = self
            .io
            .block_on(self.acquirer.acquire(job_id, source, sink))?;
        let report = self.orchestrator.run_job(job_id, &acquired.text, sink)?;

        let export = match &self.config.export_dir {
            Some(dir) => {
                sink.emit(EngineEvent::Progress(JobProgress::at(job_id, Stage::Writing)));
                let dir = OutputDir::prepare(dir).map_err(ExportError::from)?;
                let generated_utc = (self.config.generated_utc)();
                Some(export_report(&dir, &self.config.export, &report, &generated_utc)?)
            }
            None => None,
        };

        sink.emit(EngineEvent::Progress(JobProgress {
            words: Some(report.stats.word_count),
            ..JobProgress::at(job_id, Stage::Done)
        }));
        Ok(JobOutcome {
            origin: acquired.origin,
            report,
            export,
        })
    }
}
