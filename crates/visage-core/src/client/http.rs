//! HTTP face backend over the `/analyze-image` and `/process-image`
//! endpoints.
//!
//! Both calls are multipart form posts: the image identity is either an
//! `image` file part (raw bytes with their MIME type) or a `file_name`
//! text part; render calls add the annotation blob and the option fields.

use super::backend::FaceBackend;
use crate::error::{ClientError, ClientResult};
use crate::types::{Analysis, ImageFormat, ImageIdentity, RenderRequest, RenderedImage};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Instant;

const ANALYZE_PATH: &str = "/analyze-image";
const PROCESS_PATH: &str = "/process-image";

/// reqwest-based face backend.
pub struct HttpFaceBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFaceBackend {
    /// Create a backend targeting the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the image identity to a multipart form.
    fn with_identity(form: Form, identity: &ImageIdentity) -> ClientResult<Form> {
        match identity {
            ImageIdentity::Payload(payload) => {
                let part = Part::bytes(payload.bytes.clone())
                    .file_name(
                        payload
                            .file_name
                            .clone()
                            .unwrap_or_else(|| "image".to_string()),
                    )
                    .mime_str(&payload.mime_type)
                    .map_err(|e| ClientError::RemoteCallFailed {
                        endpoint: ANALYZE_PATH.to_string(),
                        message: format!("Invalid MIME type '{}': {e}", payload.mime_type),
                        status_code: None,
                    })?;
                Ok(form.part("image", part))
            }
            ImageIdentity::TestImage(name) => Ok(form.text("file_name", name.clone())),
        }
    }
}

#[async_trait]
impl FaceBackend for HttpFaceBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(&self, identity: &ImageIdentity) -> ClientResult<Analysis> {
        let start = Instant::now();
        let form = Self::with_identity(Form::new(), identity)?;

        let resp = self
            .client
            .post(self.url(ANALYZE_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::transport(ANALYZE_PATH, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::status(ANALYZE_PATH, status.as_u16(), body));
        }

        let analysis: Analysis = resp.json().await.map_err(|e| ClientError::RemoteCallFailed {
            endpoint: ANALYZE_PATH.to_string(),
            message: format!("Failed to parse analysis response: {e}"),
            status_code: None,
        })?;

        tracing::debug!(
            "← {ANALYZE_PATH} | {} ms | {} face(s)",
            start.elapsed().as_millis(),
            analysis.faces_detected
        );
        Ok(analysis)
    }

    async fn render(&self, request: &RenderRequest) -> ClientResult<RenderedImage> {
        let start = Instant::now();
        let mut form = Self::with_identity(Form::new(), &request.identity)?;
        for (name, value) in request.form_fields() {
            form = form.text(name, value);
        }

        let resp = self
            .client
            .post(self.url(PROCESS_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::transport(PROCESS_PATH, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::status(PROCESS_PATH, status.as_u16(), body));
        }

        // The backend answers with the negotiated format; fall back to the
        // requested one if the header is missing or unrecognized.
        let format = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(ImageFormat::from_mime)
            .unwrap_or(request.options.format);

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::transport(PROCESS_PATH, &e))?
            .to_vec();

        tracing::debug!(
            "← {PROCESS_PATH} | {} ms | {} face(s) | {} bytes",
            start.elapsed().as_millis(),
            request.faces_detected,
            bytes.len()
        );
        Ok(RenderedImage { bytes, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpFaceBackend::new("http://localhost:8080/");
        assert_eq!(backend.url(ANALYZE_PATH), "http://localhost:8080/analyze-image");
    }

    #[test]
    fn test_backend_name() {
        let backend = HttpFaceBackend::new("http://localhost:8080");
        assert_eq!(backend.name(), "http");
    }
}
