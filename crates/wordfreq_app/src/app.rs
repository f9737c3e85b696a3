use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use wordfreq_engine::{
    EngineConfig, EngineEvent, EngineHandle, ExportOptions, JobId, JobOutcome, Stage,
};
use wordfreq_logging::{wordfreq_debug, wordfreq_info, wordfreq_warn};

use crate::cli::Cli;
use crate::config::{load_file_config, FileConfig, Settings};
use crate::render;

const JOB_ID: JobId = 1;

pub fn run(cli: &Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(cli, file)?;
    wordfreq_debug!("settings: {settings:?}");

    let config = EngineConfig {
        run: settings.run,
        fallback: settings.fallback,
        export_dir: settings.export_dir.clone(),
        export: ExportOptions {
            top_n: settings.run.top_n,
            ..ExportOptions::default()
        },
        ..EngineConfig::default()
    };
    let engine = EngineHandle::new(config).context("failed to start the analysis engine")?;
    engine.analyze(JOB_ID, settings.source.clone());

    let outcome = wait_for_outcome(&engine, JOB_ID)?;

    let mut stdout = io::stdout().lock();
    render::write_report(&mut stdout, &outcome, settings.run.top_n, settings.chart)
        .context("failed to write the report")?;
    stdout.flush().context("failed to write the report")?;
    Ok(())
}

fn wait_for_outcome(engine: &EngineHandle, job: JobId) -> Result<JobOutcome> {
    while let Some(event) = engine.recv() {
        match event {
            EngineEvent::Progress(progress) => match progress.stage {
                Stage::Acquiring => {
                    if let Some(bytes) = progress.bytes {
                        wordfreq_debug!("downloaded {bytes} bytes");
                    }
                }
                Stage::Mapping { completed, total } => {
                    wordfreq_debug!("mapped {completed}/{total} chunks");
                }
                stage => wordfreq_info!("stage: {stage:?}"),
            },
            EngineEvent::JobCompleted { job_id, result } if job_id == job => {
                return result.context("analysis failed");
            }
            EngineEvent::JobCompleted { job_id, .. } => {
                wordfreq_warn!("ignoring result for unknown job {job_id}");
            }
        }
    }
    bail!("analysis engine stopped before the job finished")
}
