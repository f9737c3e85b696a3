use std::io::{self, Write};

use wordfreq_core::{RankedWord, TableSummary};
use wordfreq_engine::{format_top_words, JobOutcome, TextOrigin};

const CHART_WIDTH: usize = 40;

pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &JobOutcome,
    top_n: usize,
    chart: bool,
) -> io::Result<()> {
    let stats = &outcome.report.stats;
    let ranked = outcome.report.top(top_n);
    let rule = "=".repeat(50);

    writeln!(out, "{rule}")?;
    writeln!(out, "MapReduce Word Frequency Analyzer")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Source: {}", describe_origin(&outcome.origin))?;
    writeln!(out, "Words after cleanup: {}", stats.word_count)?;
    writeln!(out, "Chunks: {}", stats.chunk_count)?;
    writeln!(out, "Word pairs emitted: {}", stats.pair_count)?;
    writeln!(
        out,
        "Finished in {:.2} s, {} unique words",
        stats.elapsed.as_secs_f64(),
        stats.unique_words
    )?;

    writeln!(out)?;
    writeln!(out, "Top {top_n} most frequent words:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    if ranked.is_empty() {
        writeln!(out, "No words to show")?;
    } else {
        write!(out, "{}", format_top_words(&ranked))?;
    }

    if chart && !ranked.is_empty() {
        writeln!(out)?;
        write!(out, "{}", bar_chart(&ranked))?;
    }

    let summary = TableSummary::of(&outcome.report.table);
    writeln!(out)?;
    writeln!(out, "Overall statistics:")?;
    writeln!(out, "Unique words: {}", summary.unique_words)?;
    writeln!(out, "Total words: {}", summary.total_words)?;
    writeln!(out, "Words occurring once: {}", summary.singletons)?;

    if let Some(export) = &outcome.export {
        writeln!(out)?;
        writeln!(out, "Frequencies written to {}", export.json_path.display())?;
        if let Some(path) = &export.top_words_path {
            writeln!(out, "Top words written to {}", path.display())?;
        }
    }
    Ok(())
}

fn describe_origin(origin: &TextOrigin) -> String {
    match origin {
        TextOrigin::Url { final_url } => final_url.clone(),
        TextOrigin::File(path) => path.display().to_string(),
        TextOrigin::Inline => "inline text".to_string(),
        TextOrigin::Sample { reason } => format!("bundled sample text ({reason})"),
    }
}

/// Horizontal bars scaled so the most frequent word spans the full width.
fn bar_chart(rows: &[RankedWord]) -> String {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    let label_width = rows.iter().map(|r| r.word.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let len = bar_len(row.count, max);
        out.push_str(&format!(
            "{:<label_width$} |{} {}\n",
            row.word,
            "#".repeat(len),
            row.count
        ));
    }
    out
}

fn bar_len(count: u64, max: u64) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    let scaled = (count * CHART_WIDTH as u64) / max;
    (scaled as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(words: &[(&str, u64)]) -> Vec<RankedWord> {
        words
            .iter()
            .enumerate()
            .map(|(idx, &(word, count))| RankedWord {
                rank: idx + 1,
                word: word.to_string(),
                count,
            })
            .collect()
    }

    #[test]
    fn bars_scale_to_the_largest_count() {
        assert_eq!(bar_len(10, 10), CHART_WIDTH);
        assert_eq!(bar_len(5, 10), CHART_WIDTH / 2);
        assert_eq!(bar_len(1, 1000), 1);
        assert_eq!(bar_len(0, 10), 0);
    }

    #[test]
    fn chart_aligns_labels() {
        let chart = bar_chart(&ranked(&[("alice", 4), ("cat", 2)]));
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines[0], format!("alice |{} 4", "#".repeat(CHART_WIDTH)));
        assert_eq!(lines[1], format!("cat   |{} 2", "#".repeat(CHART_WIDTH / 2)));
    }

    #[test]
    fn sample_origin_mentions_the_reason() {
        let origin = TextOrigin::Sample {
            reason: "timeout".into(),
        };
        assert_eq!(describe_origin(&origin), "bundled sample text (timeout)");
    }
}
