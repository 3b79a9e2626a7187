//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use lingo_feedback_core::config::Config;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::FeedbackServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests over stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    info!(
        language = %config.language,
        max_sessions = ?config.max_sessions,
        "starting MCP server on stdio"
    );

    let service = FeedbackServer::with_config(config)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
