//! Bit tile front end: `/` and `/download/:filename`.

use axum::{
    Form,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::pipeline::TileContext;
use crate::server::error::AppError;
use crate::server::html;

#[derive(Clone)]
pub struct TileState {
    pub ctx: TileContext,
}

#[derive(Debug, Deserialize)]
pub struct TileForm {
    pub input_string: Option<String>,
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(html::tiles_form())
}

/// POST /
/// Saves one PNG per page and links each for download.
pub async fn handle_submit(
    State(state): State<TileState>,
    Form(form): Form<TileForm>,
) -> Result<Html<String>, AppError> {
    let text = form
        .input_string
        .ok_or_else(|| AppError::Validation("missing form field 'input_string'".to_string()))?;
    info!(chars = text.chars().count(), "encoding bit tiles");

    let ctx = state.ctx.clone();
    let pages = tokio::task::spawn_blocking(move || ctx.save(&text))
        .await?
        .map_err(AppError::from_pipeline)?;
    Ok(Html(html::tiles_result(&pages)))
}

/// GET /download/:filename
pub async fn handle_download(
    State(state): State<TileState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let output = state.ctx.output.clone();
    let name = filename.clone();
    let bytes = tokio::task::spawn_blocking(move || output.open(&name)).await??;
    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename.replace('"', "")),
        ),
    ];
    Ok((headers, bytes).into_response())
}
