//! Visage Core - Embeddable client library for face rendering services.
//!
//! Visage drives two remote image services: a face service that analyzes
//! an image once and then renders it any number of times under different
//! options (landmarks, anonymization, mustache overlays, animation), and
//! a stateless coloring-page converter.
//!
//! # Architecture
//!
//! The center of the crate is the render session, a source-keyed cache:
//!
//! ```text
//! Source (camera | custom | test) → cached Analysis → RenderRequest → image
//! ```
//!
//! An analysis is fetched once per new picture and reused across every
//! option change; new bytes for a source invalidate its slot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use visage_core::{Config, RenderOptions, Source, Visage};
//!
//! #[tokio::main]
//! async fn main() -> visage_core::Result<()> {
//!     let visage = Visage::with_defaults()?;
//!     visage.session().select_test_image("American_Gothic.jpg");
//!
//!     let outcome = visage
//!         .session()
//!         .render(Source::TestImage, RenderOptions::default())
//!         .await?;
//!     println!("Faces: {}", outcome.faces_detected);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod capture;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use capture::{CaptureDevice, FileCapture};
pub use client::{ColoringClient, FaceBackend, HttpFaceBackend};
pub use config::Config;
pub use error::{ClientError, ConfigError, Result, VisageError};
pub use session::{RenderOutcome, RenderSession, SessionOptions};
pub use types::{
    Analysis, ImageFormat, ImageIdentity, ImagePayload, RenderMode, RenderOptions, RenderRequest,
    RenderedImage, Source,
};

use std::sync::Arc;
use std::time::Duration;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Visage facade - wires a session and clients from configuration.
pub struct Visage {
    config: Config,
    session: RenderSession,
}

impl Visage {
    /// Create a new Visage instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Visage v{VERSION}");
        let backend = Arc::new(HttpFaceBackend::new(&config.service.face_url));
        tracing::debug!(
            "Using {} face backend at {}",
            backend.name(),
            config.service.face_url
        );
        let session = RenderSession::new(backend, SessionOptions::from_config(&config));
        Self { config, session }
    }

    /// Create a new Visage instance with configuration from disk.
    pub fn with_defaults() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The render session (analysis cache + request builder).
    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    /// Build a coloring-page client from the configured endpoint.
    pub fn coloring_client(&self) -> error::ClientResult<ColoringClient> {
        ColoringClient::new(
            &self.config.service.coloring_url,
            Duration::from_millis(self.config.limits.coloring_timeout_ms),
        )
    }
}
