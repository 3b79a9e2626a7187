//! Languages command: the language-to-model table.

use clap::Args;
use lingo_feedback_core::language::{DEFAULT_LANGUAGE, LANGUAGE_MODELS, select_model};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `languages` subcommand.
#[derive(Args, Debug, Default)]
pub struct LanguagesArgs {
    /// Show which model a language code resolves to.
    #[arg(long, value_name = "CODE")]
    pub resolve: Option<String>,
}

#[derive(Serialize)]
struct LanguageRow {
    code: &'static str,
    name: &'static str,
    model: &'static str,
    default: bool,
}

/// Print supported languages, or how one code resolves.
#[instrument(name = "cmd_languages", skip_all, fields(resolve = ?args.resolve))]
pub fn cmd_languages(args: LanguagesArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing languages command");

    if let Some(ref code) = args.resolve {
        let selection = select_model(code);
        if global_json {
            println!("{}", serde_json::to_string_pretty(&selection)?);
        } else if selection.fallback {
            println!(
                "{} is not supported; using {} ({})",
                code.yellow(),
                selection.language.name(),
                selection.model.cyan()
            );
        } else {
            println!(
                "{} -> {} ({})",
                code,
                selection.language.name(),
                selection.model.cyan()
            );
        }
        return Ok(());
    }

    let rows: Vec<LanguageRow> = LANGUAGE_MODELS
        .iter()
        .map(|&(language, model)| LanguageRow {
            code: language.code(),
            name: language.name(),
            model,
            default: language == DEFAULT_LANGUAGE,
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "Supported languages".bold().underline());
    for row in &rows {
        let marker = if row.default { " (default)" } else { "" };
        println!(
            "  {:<4} {:<10} {}{}",
            row.code,
            row.name,
            row.model.cyan(),
            marker.dimmed()
        );
    }
    Ok(())
}
