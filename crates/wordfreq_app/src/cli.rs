use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};
use log::LevelFilter;

use crate::logging::LogDestination;

/// Count the most frequent words of a text with a parallel map-reduce pass.
#[derive(Debug, Parser)]
#[command(name = "wordfreq", version)]
#[command(group(ArgGroup::new("source").args(["url", "file", "text"])))]
pub struct Cli {
    /// Download the text from this URL (default: Alice in Wonderland on Project Gutenberg)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Read the text from a local file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Analyze this text directly
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Number of parallel map workers
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// How many of the most frequent words to show
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Shortest word that is counted
    #[arg(long, value_name = "N")]
    pub min_len: Option<usize>,

    /// RON configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write frequencies.json and top_words.txt into this directory
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Analyze the bundled sample text if the source cannot be read
    #[arg(long)]
    pub fallback_sample: bool,

    /// Skip the bar chart
    #[arg(long)]
    pub no_chart: bool,

    /// Also write logs to ./wordfreq.log
    #[arg(long)]
    pub log_file: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::Both
        } else {
            LogDestination::Terminal
        }
    }
}
