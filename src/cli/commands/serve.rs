//! Serve command implementation.

use super::build_engine;
use crate::api::{self, AppState};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> Result<()> {
    let engine = build_engine(&settings)?;
    let mode = engine.mode();

    let host = host.unwrap_or_else(|| settings.api.host.clone());
    let port = port.unwrap_or(settings.api.port);

    let state = Arc::new(AppState { engine, settings });
    let app = api::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Satsang Guidance API");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Engine mode", &format!("{:?}", mode).to_lowercase());
    println!();
    println!("Endpoints:");
    Output::kv("Ask", "POST /ask");
    Output::kv("Ask (query)", "GET  /ask?question=...");
    Output::kv("Health", "GET  /health");
    Output::kv("Languages", "GET  /languages");
    Output::kv("Config", "GET  /config");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
