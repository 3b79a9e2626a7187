//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use lingo_feedback_core::config::Config;
use lingo_feedback_core::feedback::FeedbackAnalyzer;

pub mod batch;
pub mod evaluate;
pub mod info;
pub mod languages;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file, checking its size against the limit before loading it.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read standard input, stopping one byte past the limit.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            stdin
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            if content.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

/// Analyzer for the command's language (or the configured default) with the
/// configured scorers and input limit.
pub fn analyzer_for(language: Option<&str>, config: &Config) -> FeedbackAnalyzer {
    let code = language.unwrap_or(&config.language);
    FeedbackAnalyzer::new(code).with_config(config)
}
