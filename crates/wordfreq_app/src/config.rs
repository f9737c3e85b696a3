use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wordfreq_core::RunConfig;
use wordfreq_engine::{FallbackPolicy, TextSource};
use wordfreq_logging::wordfreq_info;

use crate::cli::Cli;

pub const DEFAULT_URL: &str = "https://www.gutenberg.org/files/11/11-0.txt";

/// Contents of a `--config` RON file. Every field is optional.
///
/// ```ron
/// (
///     workers: Some(8),
///     top: Some(15),
///     url: Some("https://www.gutenberg.org/files/1342/1342-0.txt"),
///     fallback_sample: Some(true),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub workers: Option<usize>,
    pub top: Option<usize>,
    pub min_len: Option<usize>,
    pub url: Option<String>,
    pub fallback_sample: Option<bool>,
    pub export_dir: Option<PathBuf>,
    pub chart: Option<bool>,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    wordfreq_info!("loaded config from {}", path.display());
    Ok(config)
}

/// Effective settings after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub run: RunConfig,
    pub source: TextSource,
    pub fallback: FallbackPolicy,
    pub export_dir: Option<PathBuf>,
    pub chart: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let defaults = RunConfig::default();
        let run = RunConfig {
            num_workers: cli.workers.or(file.workers).unwrap_or(defaults.num_workers),
            top_n: cli.top.or(file.top).unwrap_or(defaults.top_n),
            min_word_len: cli.min_len.or(file.min_len).unwrap_or(defaults.min_word_len),
        };
        run.validate().context("invalid settings")?;

        let source = if let Some(text) = &cli.text {
            TextSource::Inline(text.clone())
        } else if let Some(path) = &cli.file {
            TextSource::File(path.clone())
        } else {
            let url = cli
                .url
                .clone()
                .or(file.url)
                .unwrap_or_else(|| DEFAULT_URL.to_string());
            TextSource::Url(url)
        };

        let fallback = if cli.fallback_sample || file.fallback_sample.unwrap_or(false) {
            FallbackPolicy::UseSample
        } else {
            FallbackPolicy::Fail
        };

        Ok(Self {
            run,
            source,
            fallback,
            export_dir: cli.export_dir.clone().or(file.export_dir),
            chart: !cli.no_chart && file.chart.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wordfreq").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_fetch_the_gutenberg_text() {
        let settings = Settings::resolve(&cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(settings.run, RunConfig::default());
        assert_eq!(settings.source, TextSource::Url(DEFAULT_URL.into()));
        assert_eq!(settings.fallback, FallbackPolicy::Fail);
        assert!(settings.chart);
        assert_eq!(settings.export_dir, None);
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            workers: Some(8),
            top: Some(15),
            url: Some("https://example.com/book.txt".into()),
            chart: Some(false),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(&cli(&["--workers", "2"]), file).unwrap();
        assert_eq!(settings.run.num_workers, 2);
        assert_eq!(settings.run.top_n, 15);
        assert_eq!(
            settings.source,
            TextSource::Url("https://example.com/book.txt".into())
        );
        assert!(!settings.chart);
    }

    #[test]
    fn inline_text_wins_over_configured_url() {
        let file = FileConfig {
            url: Some("https://example.com/book.txt".into()),
            fallback_sample: Some(true),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(&cli(&["--text", "down the hole"]), file).unwrap();
        assert_eq!(settings.source, TextSource::Inline("down the hole".into()));
        assert_eq!(settings.fallback, FallbackPolicy::UseSample);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = Settings::resolve(&cli(&["--workers", "0"]), FileConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("num_workers"));
    }

    #[test]
    fn loads_ron_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("wordfreq.ron");
        fs::write(&path, "(workers: Some(3), min_len: Some(5))").unwrap();

        let config = load_file_config(&path).unwrap();
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.min_len, Some(5));
        assert_eq!(config.top, None);
    }

    #[test]
    fn malformed_ron_names_the_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(workers: ").unwrap();

        let err = load_file_config(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"), "{err}");
    }
}
