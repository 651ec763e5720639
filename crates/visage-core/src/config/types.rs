//! Sub-configuration structs with defaults matching the demo deployment.

use serde::{Deserialize, Serialize};

/// Backend service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the face analysis/rendering service
    pub face_url: String,

    /// Base URL of the coloring-page service
    pub coloring_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            face_url: "http://localhost:8080".to_string(),
            coloring_url: "http://localhost:8081".to_string(),
        }
    }
}

/// Request limits and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Analysis call timeout in milliseconds
    pub analyze_timeout_ms: u64,

    /// Render call timeout in milliseconds
    pub render_timeout_ms: u64,

    /// Coloring-page call timeout in milliseconds
    pub coloring_timeout_ms: u64,

    /// Maximum upload size in megabytes
    pub max_upload_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            analyze_timeout_ms: 30_000,
            render_timeout_ms: 60_000,
            coloring_timeout_ms: 60_000,
            max_upload_mb: 20,
        }
    }
}

/// Camera capture settings.
///
/// The library has no camera driver of its own; a capture tool drops
/// frames at `frame_path` and `FileCapture` picks up the latest one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Path where the capture tool writes the current frame
    pub frame_path: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_path: "~/.visage/frame.jpg".to_string(),
        }
    }
}

/// Default rendering selections, mirroring the demo's initial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Test image selected when none is specified
    pub test_image: String,

    /// Output format ("png", "webp", or "gif")
    pub image_format: String,

    /// Mustache overlay starts enabled in still mode
    pub stache: bool,

    /// Oscillation starts enabled in animated mode
    pub oscillating: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            test_image: "American_Gothic.jpg".to_string(),
            image_format: "webp".to_string(),
            stache: true,
            oscillating: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where result images are written
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
