//! Router-level tests for both web front ends.
//!
//! The image host is replaced by an in-process uploader, so these run
//! offline.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use codegrid::{
    MemoryRecordStore, NumericContext, OutputDir, TileContext, UploadError, Uploader,
    server::{NumericState, TileState, build_numeric_router, build_tiles_router},
};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

struct StaticUploader;

impl Uploader for StaticUploader {
    fn upload(&self, name: &str, _png: &[u8]) -> Result<String, UploadError> {
        Ok(format!("https://img.example/{name}.png"))
    }
}

fn numeric_app() -> Router {
    let ctx = NumericContext::new(
        Arc::new(StaticUploader),
        Arc::new(MemoryRecordStore::default()),
    );
    build_numeric_router(NumericState { ctx })
}

fn tiles_app(dir: &std::path::Path) -> Router {
    let output = OutputDir::create(dir).unwrap();
    build_tiles_router(TileState {
        ctx: TileContext::new(output),
    })
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = numeric_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn numeric_form_is_served() {
    let response = numeric_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"text\""));
    assert!(html.contains("name=\"cols\""));
}

#[tokio::test]
async fn numeric_submit_uploads_and_records() {
    let app = numeric_app();
    let response = app.clone().oneshot(form("/", "text=AB&cols=10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("https://img.example/page_1.png")
    );

    let response = app.oneshot(get("/admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("page_1"));
    assert!(!html.contains("page_2"));
}

#[tokio::test]
async fn numeric_submit_requires_text() {
    let response = numeric_app().oneshot(form("/", "cols=4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("VALIDATION_ERROR"));
}

#[tokio::test]
async fn numeric_submit_rejects_bad_cols() {
    for cols in ["0", "-2", "wide"] {
        let response = numeric_app()
            .oneshot(form("/", &format!("text=hi&cols={cols}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "cols={cols}");
    }
}

#[tokio::test]
async fn numeric_submit_survives_huge_cols() {
    let app = numeric_app();
    let response = app
        .clone()
        .oneshot(form("/", &format!("text=a&cols={}", usize::MAX)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("https://img.example/page_1.png")
    );

    let response = app.oneshot(get("/admin")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("page_1"));
    assert!(!html.contains("page_2"));
}

#[tokio::test]
async fn tiles_submit_then_download() {
    let dir = tempfile::tempdir().unwrap();
    let app = tiles_app(dir.path());

    let response = app
        .clone()
        .oneshot(form("/", "input_string=hello+tiles"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    let start = html.find("/download/").unwrap() + "/download/".len();
    let end = start + html[start..].find('"').unwrap();
    let file_name = &html[start..end];
    assert!(file_name.ends_with("_1.png"));

    let response = app
        .oneshot(get(&format!("/download/{file_name}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, format!("attachment; filename=\"{file_name}\""));

    let png = body_bytes(response).await;
    assert_eq!(
        codegrid::pipeline::decode_tile_png(&png).unwrap(),
        "hello tiles"
    );
}

#[tokio::test]
async fn tiles_download_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let response = tiles_app(dir.path())
        .oneshot(get("/download/19990101000000_1.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tiles_submit_rejects_astral_characters() {
    let dir = tempfile::tempdir().unwrap();
    let response = tiles_app(dir.path())
        .oneshot(form("/", "input_string=go%F0%9F%9A%80"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn tiles_submit_requires_input() {
    let dir = tempfile::tempdir().unwrap();
    let response = tiles_app(dir.path())
        .oneshot(form("/", "text=wrong+field"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
