//! One-shot client for the coloring-page conversion service.
//!
//! Unlike the face service there is no analysis step and nothing to cache:
//! every submission uploads the input image and gets a converted page (or
//! nothing) back.

use crate::error::{ClientError, ClientResult};
use crate::types::{ImageFormat, ImagePayload, RenderedImage};
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};

const COLORING_PATH: &str = "/api/coloring-page";

/// Client for the `/api/coloring-page` endpoint.
pub struct ColoringClient {
    base_url: String,
    client: reqwest::Client,
}

impl ColoringClient {
    /// Create a client targeting the given base URL with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::transport(COLORING_PATH, &e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Convert an input image into a coloring page.
    pub async fn convert(&self, payload: &ImagePayload) -> ClientResult<RenderedImage> {
        let start = Instant::now();
        tracing::debug!("→ {COLORING_PATH} | {} bytes", payload.len());

        let part = Part::bytes(payload.bytes.clone())
            .file_name(
                payload
                    .file_name
                    .clone()
                    .unwrap_or_else(|| "input".to_string()),
            )
            .mime_str(&payload.mime_type)
            .map_err(|e| ClientError::RemoteCallFailed {
                endpoint: COLORING_PATH.to_string(),
                message: format!("Invalid MIME type '{}': {e}", payload.mime_type),
                status_code: None,
            })?;
        let form = Form::new().part("input-image", part);

        let resp = self
            .client
            .post(format!("{}{COLORING_PATH}", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::transport(COLORING_PATH, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::status(COLORING_PATH, status.as_u16(), body));
        }

        let format = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(ImageFormat::from_mime)
            .unwrap_or(ImageFormat::Png);

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::transport(COLORING_PATH, &e))?
            .to_vec();

        tracing::debug!(
            "← {COLORING_PATH} | {} ms | {} bytes",
            start.elapsed().as_millis(),
            bytes.len()
        );
        Ok(RenderedImage { bytes, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = ColoringClient::new("http://localhost:8081/", Duration::from_secs(30));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "http://localhost:8081");
    }
}
