//! Evaluate command: score one learner response.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use lingo_feedback_core::analysis::AnalyzedText;
use lingo_feedback_core::config::Config;
use lingo_feedback_core::feedback::{FeedbackReport, SuggestionType};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::{analyzer_for, read_input_file, read_stdin};

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug, Default)]
pub struct EvaluateArgs {
    /// File containing the response. Reads stdin when neither FILE nor --text is given.
    #[arg(conflicts_with_all = ["text", "analysis"])]
    pub file: Option<Utf8PathBuf>,

    /// Response text, inline.
    #[arg(long, short = 't', conflicts_with = "analysis")]
    pub text: Option<String>,

    /// Language code (defaults to the configured language).
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Expected patterns, comma-separated or repeated.
    #[arg(long = "expect", short = 'e', value_delimiter = ',')]
    pub expected: Vec<String>,

    /// Score a pre-analyzed response (JSON) instead of running the built-in analyzer.
    #[arg(long, value_name = "JSON")]
    pub analysis: Option<Utf8PathBuf>,

    /// Minimum acceptable overall score.
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Score a response and print the report.
#[instrument(name = "cmd_evaluate", skip_all, fields(file = ?args.file))]
pub fn cmd_evaluate(
    args: EvaluateArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        language = ?args.language,
        expected = args.expected.len(),
        min_score = ?args.min_score,
        "executing evaluate command"
    );

    let analyzer = analyzer_for(args.language.as_deref(), config);
    let expected = (!args.expected.is_empty()).then_some(args.expected.as_slice());

    let (source, report) = if let Some(ref path) = args.analysis {
        let json = read_input_file(path, max_input_bytes)?;
        let doc: AnalyzedText = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse analysis from {path}"))?;
        let report = analyzer
            .evaluate_analyzed(&doc, expected)
            .with_context(|| format!("failed to evaluate analysis in {path}"))?;
        (path.to_string(), report)
    } else {
        let (source, text) = match (args.file.as_ref(), args.text) {
            (Some(path), _) => (path.to_string(), read_input_file(path, max_input_bytes)?),
            (None, Some(text)) => ("response".to_string(), text),
            (None, None) => ("stdin".to_string(), read_stdin(max_input_bytes)?),
        };
        let report = analyzer
            .evaluate(&text, expected)
            .with_context(|| format!("failed to evaluate {source}"))?;
        (source, report)
    };

    let min_score = args.min_score.or(config.min_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(min) = min_score {
        if !report.passes(min) {
            bail!(
                "{source} scores {:.2} (min: {min:.2}). Address the suggestions above and try again.",
                report.overall_score,
            );
        }
        if !global_json {
            println!(
                "{} {source} scores {:.2} (min: {min:.2})",
                "PASS:".green(),
                report.overall_score,
            );
        }
    }

    Ok(())
}

fn print_report(report: &FeedbackReport) {
    println!(
        "{} {:.2} ({})",
        "Overall".bold(),
        report.overall_score,
        report.language.name()
    );
    println!();
    for (name, value) in report.metrics.named() {
        println!("  {:<14} {}", format!("{name}:").dimmed(), colored_score(value));
    }

    if report.suggestions.is_empty() {
        return;
    }
    println!();
    println!("{}", "Suggestions".bold().underline());
    for suggestion in &report.suggestions {
        let label = match suggestion.kind {
            SuggestionType::Grammar => "grammar".yellow().to_string(),
            SuggestionType::Vocabulary => "vocabulary".cyan().to_string(),
        };
        println!("  [{label}] {}", suggestion.suggestion);
        println!("    {}: {}", "original".dimmed(), suggestion.original);
        println!("    {}", suggestion.explanation.dimmed());
    }
}

fn colored_score(value: f64) -> String {
    let text = format!("{value:.2}");
    if value >= 0.8 {
        text.green().to_string()
    } else if value >= 0.5 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
