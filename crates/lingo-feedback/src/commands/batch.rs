//! Batch command: score a JSONL file of responses.
//!
//! Each non-blank line is `{"response": "...", "expected_patterns": [...]}`;
//! `expected_patterns` and an optional `id` may be omitted.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lingo_feedback_core::config::Config;
use lingo_feedback_core::feedback::FeedbackReport;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{analyzer_for, read_input_file};

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSONL file of responses.
    pub file: Utf8PathBuf,

    /// Language code (defaults to the configured language).
    #[arg(long, short = 'l')]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchRecord {
    #[serde(default)]
    id: Option<String>,
    response: String,
    #[serde(default)]
    expected_patterns: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    report: FeedbackReport,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    file: String,
    count: usize,
    mean_overall_score: Option<f64>,
    results: Vec<BatchEntry>,
}

/// Score every record in a JSONL file.
#[instrument(name = "cmd_batch", skip_all, fields(file = %args.file))]
pub fn cmd_batch(
    args: BatchArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(language = ?args.language, "executing batch command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let records = parse_records(&content)
        .with_context(|| format!("failed to parse records in {}", args.file))?;

    let analyzer = analyzer_for(args.language.as_deref(), config);

    let progress = ProgressBar::new(records.len() as u64);
    if global_json {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    progress.set_message("scoring responses");

    let mut results = Vec::with_capacity(records.len());
    for (line, record) in records {
        let expected = record.expected_patterns.as_deref();
        let report = analyzer
            .evaluate(&record.response, expected)
            .with_context(|| format!("failed to evaluate line {line} of {}", args.file))?;
        results.push(BatchEntry {
            line,
            id: record.id,
            report,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    let summary = BatchSummary {
        file: args.file.to_string(),
        count: results.len(),
        mean_overall_score: mean(results.iter().map(|r| r.report.overall_score)),
        results,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for entry in &summary.results {
        let label = entry
            .id
            .clone()
            .unwrap_or_else(|| format!("line {}", entry.line));
        println!(
            "{:<16} {:.2}  {} suggestion(s)",
            label,
            entry.report.overall_score,
            entry.report.suggestions.len()
        );
    }
    match summary.mean_overall_score {
        Some(mean) => println!(
            "{} {} response(s), mean overall {:.2}",
            "Scored".bold(),
            summary.count,
            mean
        ),
        None => println!("{}", "No responses to score".yellow()),
    }

    Ok(())
}

/// Parse non-blank JSONL lines, keeping 1-based line numbers.
fn parse_records(content: &str) -> anyhow::Result<Vec<(usize, BatchRecord)>> {
    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record: BatchRecord = serde_json::from_str(line)
            .with_context(|| format!("line {line_no} is not a valid record"))?;
        records.push((line_no, record));
    }
    if records.is_empty() {
        warn!("batch file has no records");
    }
    Ok(records)
}

fn mean(scores: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = scores.fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    (count > 0).then(|| sum / count as f64)
}
