//! Core data types for the Visage client.
//!
//! These types model the three image sources, the opaque analysis result
//! returned by the face service, the rendering options, and the request
//! and response payloads exchanged with the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The origin of the image data for a render sequence.
///
/// Exactly one source is active at a time; each source owns one analysis
/// cache slot, and the two binary sources each own one payload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// A frame captured from a camera device
    Camera,
    /// A user-provided image file
    CustomImage,
    /// A built-in test image, referenced by name on the backend
    TestImage,
}

impl Source {
    /// All sources, in slot order.
    pub const ALL: [Source; 3] = [Source::Camera, Source::CustomImage, Source::TestImage];

    /// Cache slot index for this source.
    pub(crate) fn index(self) -> usize {
        match self {
            Source::Camera => 0,
            Source::CustomImage => 1,
            Source::TestImage => 2,
        }
    }

    /// Whether this source carries raw bytes (as opposed to a name).
    pub fn carries_bytes(self) -> bool {
        !matches!(self, Source::TestImage)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Camera => "camera",
            Source::CustomImage => "custom-image",
            Source::TestImage => "test-image",
        };
        write!(f, "{name}")
    }
}

/// The result of a `/analyze-image` call.
///
/// The annotation blob is opaque to this client: it is produced by the
/// backend's detection step and passed back verbatim on every render. Only
/// `faces_detected` is interpreted, and only for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Number of faces found in the image
    pub faces_detected: u32,

    /// Opaque annotation data (URL-safe base64), echoed back on render
    pub annotations: String,
}

/// Raw image bytes with their MIME type, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Raw encoded image bytes
    pub bytes: Vec<u8>,

    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,

    /// Original file name, when the payload came from disk
    pub file_name: Option<String>,
}

impl ImagePayload {
    /// Create a payload from raw bytes and a format identifier.
    ///
    /// The format is the image format identifier (e.g., "jpeg", "png",
    /// "webp"), typically taken from a file extension.
    pub fn from_bytes(bytes: Vec<u8>, format: &str) -> Self {
        Self {
            bytes,
            mime_type: mime_for_format(format).to_string(),
            file_name: None,
        }
    }

    /// Read a payload from disk, guessing the MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Ok(Self {
            bytes,
            mime_type: mime_for_format(format).to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
        })
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Map a format identifier to its MIME type, defaulting to JPEG.
fn mime_for_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        other => {
            if !other.is_empty() {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
            }
            "image/jpeg"
        }
    }
}

/// Output image format supported by the render endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Webp,
    Gif,
}

impl ImageFormat {
    /// Wire identifier, also used as the output file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
        }
    }

    /// MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Parse a format identifier (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Derive the format from a response `Content-Type` header.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::parse(mime.trim().strip_prefix("image/")?)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering mode with its mode-specific options.
///
/// Still and animated sub-options are mutually exclusive by construction:
/// a request can only carry the fields of the variant it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Single processed frame
    Still {
        /// Draw detected face landmarks
        landmarks: bool,
        /// Blur faces beyond recognition
        anonymize: bool,
        /// Overlay a mustache on each face
        stache: bool,
    },
    /// Animated sequence built from the same frame
    Animated {
        /// Oscillating rotation animation
        oscillating: bool,
        /// Bouncing scale animation
        bouncing: bool,
    },
}

impl RenderMode {
    /// Default still mode: mustache overlay on, everything else off.
    pub fn still() -> Self {
        RenderMode::Still {
            landmarks: false,
            anonymize: false,
            stache: true,
        }
    }

    /// Default animated mode: oscillating on, bouncing off.
    pub fn animated() -> Self {
        RenderMode::Animated {
            oscillating: true,
            bouncing: false,
        }
    }

    /// Whether this is the animated mode.
    pub fn is_animated(self) -> bool {
        matches!(self, RenderMode::Animated { .. })
    }
}

/// Options for one render request.
///
/// Read fresh from caller state at request-build time and never cached:
/// the same analysis can be re-rendered under any number of option sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Still or animated, with the active mode's sub-options
    pub mode: RenderMode,

    /// Crop the output to the detected faces
    pub crop_faces: bool,

    /// Crop the output to the union of detected faces
    pub crop_image: bool,

    /// Output image format
    pub format: ImageFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::still(),
            crop_faces: false,
            crop_image: false,
            format: ImageFormat::Png,
        }
    }
}

/// Encode a flag the way the backend expects ("1"/"0").
fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

impl RenderOptions {
    /// Encode the options as backend form fields.
    ///
    /// Only the active mode's sub-option fields are emitted; the backend
    /// treats absent fields as off.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("animated", flag(self.mode.is_animated())),
            ("crop-faces", flag(self.crop_faces)),
            ("crop-image", flag(self.crop_image)),
            ("image-format", self.format.as_str().to_string()),
        ];
        match self.mode {
            RenderMode::Still {
                landmarks,
                anonymize,
                stache,
            } => {
                fields.push(("landmarks", flag(landmarks)));
                fields.push(("anonymize", flag(anonymize)));
                fields.push(("stache", flag(stache)));
            }
            RenderMode::Animated {
                oscillating,
                bouncing,
            } => {
                fields.push(("oscillating", flag(oscillating)));
                fields.push(("bouncing", flag(bouncing)));
            }
        }
        fields
    }
}

/// The image identity to send with a request: raw bytes for camera and
/// custom uploads, a backend-side name for test images.
#[derive(Debug, Clone)]
pub enum ImageIdentity {
    /// Upload these bytes
    Payload(ImagePayload),
    /// Reference a backend test image by file name
    TestImage(String),
}

/// A fully populated render request, ready for the `/process-image` call.
///
/// Built by the session only after a non-absent analysis is in hand.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Image identity (bytes or test-image name)
    pub identity: ImageIdentity,

    /// Opaque annotation blob from the analysis step
    pub annotations: String,

    /// Face count from the analysis, for display
    pub faces_detected: u32,

    /// The option set for this render
    pub options: RenderOptions,
}

impl RenderRequest {
    /// All text form fields: the annotation blob plus the option fields.
    /// The identity part (file upload or `file_name`) is encoded separately.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("annotations", self.annotations.clone())];
        fields.extend(self.options.form_fields());
        fields
    }
}

/// A rendered image returned by the backend.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// Encoded image bytes
    pub bytes: Vec<u8>,

    /// Format, negotiated via the response `Content-Type`
    pub format: ImageFormat,
}

impl RenderedImage {
    /// Size of the encoded image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_still_fields_exclude_animated_options() {
        let options = RenderOptions {
            mode: RenderMode::Still {
                landmarks: true,
                anonymize: false,
                stache: true,
            },
            crop_faces: true,
            crop_image: false,
            format: ImageFormat::Webp,
        };
        let fields = options.form_fields();

        assert_eq!(field(&fields, "animated"), Some("0"));
        assert_eq!(field(&fields, "landmarks"), Some("1"));
        assert_eq!(field(&fields, "anonymize"), Some("0"));
        assert_eq!(field(&fields, "stache"), Some("1"));
        assert_eq!(field(&fields, "crop-faces"), Some("1"));
        assert_eq!(field(&fields, "image-format"), Some("webp"));
        assert!(field(&fields, "oscillating").is_none());
        assert!(field(&fields, "bouncing").is_none());
    }

    #[test]
    fn test_animated_fields_exclude_still_options() {
        let options = RenderOptions {
            mode: RenderMode::Animated {
                oscillating: true,
                bouncing: true,
            },
            crop_faces: false,
            crop_image: true,
            format: ImageFormat::Gif,
        };
        let fields = options.form_fields();

        assert_eq!(field(&fields, "animated"), Some("1"));
        assert_eq!(field(&fields, "oscillating"), Some("1"));
        assert_eq!(field(&fields, "bouncing"), Some("1"));
        assert_eq!(field(&fields, "crop-image"), Some("1"));
        assert_eq!(field(&fields, "image-format"), Some("gif"));
        assert!(field(&fields, "landmarks").is_none());
        assert!(field(&fields, "anonymize").is_none());
        assert!(field(&fields, "stache").is_none());
    }

    #[test]
    fn test_render_request_fields_include_annotations() {
        let request = RenderRequest {
            identity: ImageIdentity::TestImage("American_Gothic.jpg".to_string()),
            annotations: "b64blob".to_string(),
            faces_detected: 2,
            options: RenderOptions::default(),
        };
        let fields = request.form_fields();
        assert_eq!(field(&fields, "annotations"), Some("b64blob"));
        assert_eq!(field(&fields, "animated"), Some("0"));
    }

    #[test]
    fn test_default_options_match_initial_ui_state() {
        let options = RenderOptions::default();
        match options.mode {
            RenderMode::Still {
                landmarks,
                anonymize,
                stache,
            } => {
                assert!(!landmarks);
                assert!(!anonymize);
                assert!(stache);
            }
            RenderMode::Animated { .. } => panic!("Default mode should be still"),
        }
        assert!(!options.crop_faces);
        assert!(!options.crop_image);
    }

    #[test]
    fn test_image_format_parse_and_mime() {
        assert_eq!(ImageFormat::parse("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse("webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::parse("tiff"), None);
        assert_eq!(ImageFormat::from_mime("image/gif"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_mime("text/html"), None);
        assert_eq!(ImageFormat::Webp.mime_type(), "image/webp");
    }

    #[test]
    fn test_payload_mime_guess() {
        let payload = ImagePayload::from_bytes(vec![0xFF, 0xD8, 0xFF], "jpg");
        assert_eq!(payload.mime_type, "image/jpeg");
        let payload = ImagePayload::from_bytes(vec![0x89, 0x50], "png");
        assert_eq!(payload.mime_type, "image/png");
        // Unknown extensions fall back to JPEG
        let payload = ImagePayload::from_bytes(vec![1, 2, 3], "bmp");
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_source_display_and_slots() {
        assert_eq!(Source::Camera.to_string(), "camera");
        assert_eq!(Source::CustomImage.to_string(), "custom-image");
        assert_eq!(Source::TestImage.to_string(), "test-image");
        assert!(Source::Camera.carries_bytes());
        assert!(!Source::TestImage.carries_bytes());
    }

    #[test]
    fn test_analysis_deserializes_backend_response() {
        let json = r#"{"faces_detected": 2, "annotations": "CgYIARIC..."}"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.faces_detected, 2);
        assert_eq!(analysis.annotations, "CgYIARIC...");
    }
}
