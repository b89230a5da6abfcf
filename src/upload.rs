//! Image host client. Pages go out one request at a time; a failed upload is
//! reported to the caller and never retried.

use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image host rejected upload (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed image host response: {0}")]
    Malformed(String),
}

/// Anything that can publish PNG bytes and hand back a public URL.
pub trait Uploader: Send + Sync {
    fn upload(&self, name: &str, png: &[u8]) -> Result<String, UploadError>;
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    data: Option<ImgbbData>,
}

#[derive(Debug, Deserialize)]
struct ImgbbData {
    url: Option<String>,
}

/// Uploads to imgbb with the API key passed as a query parameter.
#[derive(Clone)]
pub struct ImgbbUploader {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ImgbbUploader {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(concat!("codegrid/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

impl Uploader for ImgbbUploader {
    fn upload(&self, name: &str, png: &[u8]) -> Result<String, UploadError> {
        let part = multipart::Part::bytes(png.to_vec())
            .file_name(format!("{name}.png"))
            .mime_str("image/png")?;
        let form = multipart::Form::new().part("image", part);

        debug!(name, bytes = png.len(), "uploading page");
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_upload_response(&body)
    }
}

/// Pull `data.url` out of an imgbb response body.
pub fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let parsed: ImgbbResponse =
        serde_json::from_str(body).map_err(|e| UploadError::Malformed(e.to_string()))?;
    parsed
        .data
        .and_then(|data| data.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| UploadError::Malformed("response has no data.url".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_is_read_from_data() {
        let body = r#"{"data":{"id":"x1","url":"https://i.ibb.co/x1/page_1.png"},"success":true,"status":200}"#;
        assert_eq!(
            parse_upload_response(body).unwrap(),
            "https://i.ibb.co/x1/page_1.png"
        );
    }

    #[test]
    fn missing_url_is_malformed() {
        let err = parse_upload_response(r#"{"data":{}}"#).unwrap_err();
        assert!(matches!(err, UploadError::Malformed(_)));
        let err = parse_upload_response("not json").unwrap_err();
        assert!(matches!(err, UploadError::Malformed(_)));
    }
}
