//! HTTP layer exposing extraction results to the external dashboard.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState {
        settings: settings.clone(),
    };
    // The dashboard is a browser app on another origin.
    let router = Router::new()
        .route("/summary", get(routes::get_summary))
        .route("/results", get(routes::list_results))
        .route("/results/:patient_id", get(routes::get_result))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving icd-assistant API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to install ctrl-c handler");
    }
}
