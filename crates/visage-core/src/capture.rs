//! Camera capture capability.
//!
//! The library ships no camera driver; capture is a platform collaborator
//! hidden behind a small interface so the session logic tests without a
//! device. [`FileCapture`] covers the demo wiring where an external tool
//! drops frames at a known path.

use crate::error::Result;
use crate::types::ImagePayload;
use async_trait::async_trait;
use std::path::PathBuf;

/// A device (or stand-in) that can produce one frame on demand.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Device name for logging (e.g., "file").
    fn name(&self) -> &str;

    /// Capture the current frame.
    async fn capture(&self) -> Result<ImagePayload>;
}

/// Capture device that reads the latest frame from a file path.
pub struct FileCapture {
    frame_path: PathBuf,
}

impl FileCapture {
    /// Create a capture device reading frames from the given path.
    pub fn new(frame_path: impl Into<PathBuf>) -> Self {
        Self {
            frame_path: frame_path.into(),
        }
    }
}

#[async_trait]
impl CaptureDevice for FileCapture {
    fn name(&self) -> &str {
        "file"
    }

    async fn capture(&self) -> Result<ImagePayload> {
        let payload = ImagePayload::from_path(&self.frame_path).await?;
        tracing::debug!(
            "New frame from {} | {} bytes",
            self.frame_path.display(),
            payload.len()
        );
        Ok(payload)
    }
}
