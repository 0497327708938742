mod args;
mod config;
mod controller;
mod handlers;
mod page;
mod render;
mod session;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;

use sharder_common::telemetry::{init_tracing, OtlpExport};
use sharder_runpod::RunpodClient;

use crate::args::Args;
use crate::config::Config;
use crate::handlers::{healthz, index, login, logo, refresh, start_pod, stop_pod};
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let export = args.otlp_endpoint.clone().map(|endpoint| OtlpExport {
        endpoint,
        token: args.otlp_token.clone(),
    });
    let provider = init_tracing("sharder-bff", export.as_ref());

    let config = Config::from_args(args).inspect_err(|e| {
        tracing::error!(error=%e, "invalid configuration");
    })?;

    let client = RunpodClient::new(config.api_url.clone(), config.api_key.clone())?;

    tracing::info!(
        pod_id=%config.pod_id,
        gpu_count = config.gpu_count,
        operators = config.credentials.len(),
        endpoint=%client.endpoint(),
        "sharder starting"
    );

    let listen_addr = config.listen_addr.clone();
    let st = AppState {
        config: Arc::new(config),
        pods: Arc::new(client),
        sessions: SessionStore::new(),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/pod/start", post(start_pod))
        .route("/pod/stop", post(stop_pod))
        .route("/logo.webp", get(logo))
        .route("/healthz", get(healthz))
        .with_state(st);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(addr=%listen_addr, "listening");
    axum::serve(listener, app).await?;

    if let Some(provider) = provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error=%e, "failed to flush traces");
        }
    }
    Ok(())
}
