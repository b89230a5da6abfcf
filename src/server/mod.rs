//! HTTP front ends. Each pipeline gets its own router, mirroring the two
//! separate web tools.

pub mod error;
pub mod html;
pub mod numeric;
pub mod tiles;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::AppError;
pub use numeric::NumericState;
pub use tiles::TileState;

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "codegrid"
    }))
}

pub fn build_numeric_router(state: NumericState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/",
            get(numeric::handle_index).post(numeric::handle_submit),
        )
        .route("/admin", get(numeric::handle_admin))
        .with_state(state)
}

pub fn build_tiles_router(state: TileState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(tiles::handle_index).post(tiles::handle_submit))
        .route("/download/:filename", get(tiles::handle_download))
        .with_state(state)
}

/// Bind on all interfaces and serve until the process is stopped.
pub async fn serve(app: Router, port: u16) -> Result<()> {
    let app = app.layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
