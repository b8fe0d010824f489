//! Seqgen MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Stdout carries the protocol only;
//! all logging goes to stderr.

mod config;
mod server;

use anyhow::Context;
use config::ServerConfig;
use server::{create_seqgen, handle_request, McpRequest, McpResponse};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::from_env();
    let seqgen = create_seqgen(&config);

    info!(
        version = server::SERVER_VERSION,
        protocol = server::PROTOCOL_VERSION,
        max_terms = config.max_terms,
        preview_terms = config.preview_terms,
        "seqgen MCP server started"
    );

    run(&seqgen, &config)?;

    info!("server shutting down");
    Ok(())
}

fn run(seqgen: &seqgen::Seqgen, config: &ServerConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                error!("invalid JSON-RPC: {e}");
                write_response(&mut stdout, &McpResponse::parse_error(format!("Parse error: {e}")))?;
                continue;
            }
        };

        debug!(method = %request.method, "request");
        let response = handle_request(seqgen, config, &request);

        // Notifications have no id and get no response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            continue;
        }

        write_response(&mut stdout, &response)?;
    }

    debug!("client disconnected (EOF)");
    Ok(())
}

fn write_response(out: &mut impl Write, response: &McpResponse) -> anyhow::Result<()> {
    let json = serde_json::to_string(response).context("serializing response")?;
    writeln!(out, "{json}").context("writing response")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
