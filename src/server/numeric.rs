//! Code point grid front end: `/` and `/admin`.

use axum::{
    Form,
    extract::State,
    response::Html,
};
use serde::Deserialize;
use tracing::info;

use crate::encoding::DEFAULT_COLS;
use crate::pipeline::NumericContext;
use crate::server::error::AppError;
use crate::server::html;

#[derive(Clone)]
pub struct NumericState {
    pub ctx: NumericContext,
}

#[derive(Debug, Deserialize)]
pub struct NumericForm {
    pub text: Option<String>,
    pub cols: Option<String>,
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(html::numeric_form())
}

/// POST /
/// Renders, uploads and records every page, then lists the uploaded URLs.
pub async fn handle_submit(
    State(state): State<NumericState>,
    Form(form): Form<NumericForm>,
) -> Result<Html<String>, AppError> {
    let text = form
        .text
        .ok_or_else(|| AppError::Validation("missing form field 'text'".to_string()))?;
    let cols = parse_cols(form.cols.as_deref())?;
    info!(chars = text.chars().count(), cols, "encoding code point grid");

    let ctx = state.ctx.clone();
    let records = tokio::task::spawn_blocking(move || ctx.publish(&text, cols))
        .await?
        .map_err(AppError::from_pipeline)?;
    Ok(Html(html::numeric_result(&records)))
}

/// GET /admin
pub async fn handle_admin(State(state): State<NumericState>) -> Result<Html<String>, AppError> {
    let ctx = state.ctx.clone();
    let records = tokio::task::spawn_blocking(move || ctx.records()).await??;
    Ok(Html(html::admin(&records)))
}

/// Blank or absent means the default; anything else must be a positive integer.
pub fn parse_cols(raw: Option<&str>) -> Result<usize, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_COLS),
        Some(raw) => raw,
    };
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(AppError::Validation(format!(
            "cols must be a positive integer, got {raw:?}"
        ))),
        Ok(cols) => Ok(cols),
    }
}
