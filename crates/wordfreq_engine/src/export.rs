use std::fmt::Write as _;
use std::path::PathBuf;

use serde_json::json;
use wordfreq_core::{RankedWord, RunReport, TableSummary};

use crate::persist::{OutputDir, PersistError};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub json_filename: String,
    pub top_words_filename: Option<String>,
    pub top_n: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            json_filename: "frequencies.json".to_string(),
            top_words_filename: Some("top_words.txt".to_string()),
            top_n: wordfreq_core::DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub unique_words: usize,
    pub json_path: PathBuf,
    pub top_words_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the full ranked table as JSON and, optionally, the top-N table as
/// plain text into `dir`.
pub fn export_report(
    dir: &OutputDir,
    options: &ExportOptions,
    report: &RunReport,
    generated_utc: &str,
) -> Result<ExportSummary, ExportError> {
    let ranked = report.top(report.table.len());
    let summary = TableSummary::of(&report.table);
    let stats = &report.stats;

    let document = json!({
        "generated_utc": generated_utc,
        "stats": {
            "word_count": stats.word_count,
            "chunk_count": stats.chunk_count,
            "pair_count": stats.pair_count,
            "unique_words": stats.unique_words,
            "elapsed_ms": stats.elapsed.as_millis() as u64,
        },
        "summary": {
            "unique_words": summary.unique_words,
            "total_words": summary.total_words,
            "singletons": summary.singletons,
        },
        "words": ranked.iter().map(|r| {
            json!({ "rank": r.rank, "word": r.word, "count": r.count })
        }).collect::<Vec<_>>(),
    });
    let json_path =
        dir.write_atomic(&options.json_filename, serde_json::to_string_pretty(&document)?.as_bytes())?;

    let top_words_path = match &options.top_words_filename {
        Some(name) => {
            let top = &ranked[..options.top_n.min(ranked.len())];
            Some(dir.write_atomic(name, format_top_words(top).as_bytes())?)
        }
        None => None,
    };

    Ok(ExportSummary {
        unique_words: ranked.len(),
        json_path,
        top_words_path,
    })
}

/// One line per word: right-aligned rank, padded word, right-aligned count.
pub fn format_top_words(rows: &[RankedWord]) -> String {
    let width = rows
        .iter()
        .map(|r| r.word.chars().count())
        .max()
        .unwrap_or(0)
        .max(15);
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:>2}. {:<width$} {:>5}",
            row.rank,
            row.word,
            row.count,
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_top_words;
    use wordfreq_core::RankedWord;

    #[test]
    fn rows_are_aligned() {
        let rows = vec![
            RankedWord {
                rank: 1,
                word: "alice".into(),
                count: 403,
            },
            RankedWord {
                rank: 2,
                word: "said".into(),
                count: 462,
            },
        ];
        assert_eq!(
            format_top_words(&rows),
            " 1. alice             403\n 2. said              462\n"
        );
    }

    #[test]
    fn empty_rows_give_empty_text() {
        assert_eq!(format_top_words(&[]), "");
    }
}
