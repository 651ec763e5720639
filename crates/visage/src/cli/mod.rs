//! CLI command modules.

pub mod analyze;
pub mod coloring;
pub mod config;
pub mod render;

use clap::Args;
use std::path::PathBuf;
use visage_core::{CaptureDevice, FileCapture, ImagePayload, Source, Visage};

/// Image source selection, shared by `analyze` and `render`.
///
/// With no selection, the configured default test image is used — the
/// same initial state as the demo page.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Local image file to upload
    #[arg(value_name = "IMAGE", conflicts_with_all = ["test_image", "camera"])]
    pub image: Option<PathBuf>,

    /// Backend test image, referenced by file name
    #[arg(long, value_name = "NAME", conflicts_with = "camera")]
    pub test_image: Option<String>,

    /// Capture a frame from the configured camera frame path
    #[arg(long)]
    pub camera: bool,
}

/// Feed the selected source into the session and return it.
pub(crate) async fn stage_source(visage: &Visage, args: &SourceArgs) -> anyhow::Result<Source> {
    if args.camera {
        let device = FileCapture::new(visage.config().capture_frame_path());
        let frame = device.capture().await?;
        visage.session().set_payload(Source::Camera, frame)?;
        Ok(Source::Camera)
    } else if let Some(path) = &args.image {
        let payload = ImagePayload::from_path(path).await?;
        let max_bytes = visage.config().limits.max_upload_mb * 1024 * 1024;
        if payload.len() as u64 > max_bytes {
            anyhow::bail!(
                "{} is {} bytes, above the {}MB upload limit",
                path.display(),
                payload.len(),
                visage.config().limits.max_upload_mb
            );
        }
        visage.session().set_payload(Source::CustomImage, payload)?;
        Ok(Source::CustomImage)
    } else {
        let name = args
            .test_image
            .clone()
            .unwrap_or_else(|| visage.config().defaults.test_image.clone());
        visage.session().select_test_image(&name);
        Ok(Source::TestImage)
    }
}
