use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::runtime::{Builder, Runtime};
use wordfreq_core::{
    aggregate, normalize_text, normalized_word_count, partition, Chunk, ChunkCounter,
    FilteredWordCounter, PartialCount, RunConfig, RunReport, RunStats, StopWords, WordFilter,
    WordFreqError,
};
use wordfreq_logging::{wordfreq_debug, wordfreq_info};

use crate::{EngineEvent, JobId, JobProgress, NullProgressSink, ProgressSink, Stage};

/// Runs normalize -> partition -> concurrent map -> reduce on a dedicated
/// pool of `num_workers` threads. Chunk count always equals the worker count.
///
/// `run` blocks the calling thread and must not be called from inside an
/// async runtime.
pub struct Orchestrator {
    pool: Runtime,
    counter: Arc<dyn ChunkCounter>,
    num_workers: usize,
}

impl Orchestrator {
    /// Orchestrator with the default English filter.
    pub fn new(num_workers: usize) -> Result<Self, WordFreqError> {
        Self::with_counter(num_workers, Arc::new(FilteredWordCounter::default()))
    }

    pub fn from_config(config: &RunConfig) -> Result<Self, WordFreqError> {
        config.validate()?;
        let filter = WordFilter::new(config.min_word_len, StopWords::english());
        Self::with_counter(config.num_workers, Arc::new(FilteredWordCounter::new(filter)))
    }

    pub fn with_counter(
        num_workers: usize,
        counter: Arc<dyn ChunkCounter>,
    ) -> Result<Self, WordFreqError> {
        if num_workers == 0 {
            return Err(WordFreqError::Configuration(
                "num_workers must be at least 1".into(),
            ));
        }
        let pool = Builder::new_multi_thread()
            .worker_threads(num_workers)
            .thread_name("wordfreq-map")
            .build()
            .map_err(|err| WordFreqError::Resource(err.to_string()))?;
        Ok(Self {
            pool,
            counter,
            num_workers,
        })
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn run(&self, text: &str) -> Result<RunReport, WordFreqError> {
        self.run_job(0, text, &NullProgressSink)
    }

    pub fn run_job(
        &self,
        job_id: JobId,
        text: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RunReport, WordFreqError> {
        let started = Instant::now();
        let progress = |stage| sink.emit(EngineEvent::Progress(JobProgress::at(job_id, stage)));

        progress(Stage::Normalizing);
        let normalized = normalize_text(text);
        let word_count = normalized_word_count(&normalized);
        wordfreq_info!("normalized text: {} words", word_count);

        progress(Stage::Partitioning);
        let chunks = partition(&normalized, self.num_workers)?;
        let chunk_count = chunks.len();
        wordfreq_info!("split text into {} chunks", chunk_count);

        let partials = self.map_chunks(job_id, chunks, sink)?;
        let pair_count: u64 = partials.iter().map(PartialCount::pairs).sum();
        wordfreq_info!("map stage emitted {} word pairs", pair_count);

        progress(Stage::Reducing);
        let table = aggregate(partials);
        let elapsed = started.elapsed();
        wordfreq_info!(
            "map-reduce finished in {:.2?}: {} unique words",
            elapsed,
            table.len()
        );

        let stats = RunStats {
            word_count,
            chunk_count,
            pair_count,
            unique_words: table.len(),
            elapsed,
        };
        Ok(RunReport { table, stats })
    }

    /// Spawns one task per chunk and waits for all of them. Results land in
    /// a slot per chunk index, so the returned order is the chunk order no
    /// matter which task finishes first.
    fn map_chunks(
        &self,
        job_id: JobId,
        chunks: Vec<Chunk>,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<PartialCount>, WordFreqError> {
        let total = chunks.len();
        let mut pending: FuturesUnordered<_> = chunks
            .into_iter()
            .map(|chunk| {
                let index = chunk.index;
                let counter = Arc::clone(&self.counter);
                let handle = self.pool.spawn(async move { counter.count(&chunk.text) });
                async move { (index, handle.await) }
            })
            .collect();

        let mut slots: Vec<Option<PartialCount>> = vec![None; total];
        self.pool.block_on(async {
            let mut completed = 0;
            while let Some((index, joined)) = pending.next().await {
                let partial = joined.map_err(|err| WordFreqError::MapTask {
                    chunk: index,
                    message: if err.is_panic() {
                        panic_message(err.into_panic())
                    } else {
                        err.to_string()
                    },
                })?;
                wordfreq_debug!("chunk {} counted: {} pairs", index, partial.pairs());
                slots[index] = Some(partial);
                completed += 1;
                sink.emit(EngineEvent::Progress(JobProgress::at(
                    job_id,
                    Stage::Mapping { completed, total },
                )));
            }
            Ok::<_, WordFreqError>(())
        })?;

        slots
            .into_iter()
            .enumerate()
            .map(|(chunk, slot)| {
                slot.ok_or_else(|| WordFreqError::MapTask {
                    chunk,
                    message: "task produced no result".into(),
                })
            })
            .collect()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "task panicked".to_string()
    }
}
