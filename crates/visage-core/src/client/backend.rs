//! Face backend trait.
//!
//! Defines the interface the render session drives: one analysis call and
//! one render call. Uses `async_trait` because native async fn in trait is
//! not object-safe (the session holds an `Arc<dyn FaceBackend>`).

use crate::error::ClientResult;
use crate::types::{Analysis, ImageIdentity, RenderRequest, RenderedImage};
use async_trait::async_trait;

/// Trait implemented by face service backends.
///
/// Both calls take the same image identity the demo pages send: raw bytes
/// for camera/custom sources, a backend-side file name for test images.
#[async_trait]
pub trait FaceBackend: Send + Sync {
    /// Backend name for logging (e.g., "http").
    fn name(&self) -> &str;

    /// Run content analysis on the given image identity.
    ///
    /// A non-success response is a total failure; partial results are
    /// never returned.
    async fn analyze(&self, identity: &ImageIdentity) -> ClientResult<Analysis>;

    /// Render a processed image from an assembled request.
    async fn render(&self, request: &RenderRequest) -> ClientResult<RenderedImage>;
}
