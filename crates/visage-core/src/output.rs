//! Result image naming and writing.
//!
//! File names follow the demo's download names — a fixed prefix, an ISO
//! timestamp truncated to seconds, and the negotiated format as extension
//! — with colons replaced so the names are valid on every filesystem.

use crate::error::Result;
use crate::types::{ImageFormat, RenderedImage};
use chrono::{DateTime, Utc};
use std::path::Path;

/// File name for a face-rendering result, e.g.
/// `FaceDetection_2026-08-07T12-34-56.webp`.
pub fn render_file_name(timestamp: DateTime<Utc>, format: ImageFormat) -> String {
    format!(
        "FaceDetection_{}.{}",
        timestamp.format("%Y-%m-%dT%H-%M-%S"),
        format.as_str()
    )
}

/// File name for a coloring-page result, e.g.
/// `coloring-page_portrait_2026-08-07T12-34-56.png`.
pub fn coloring_file_name(stem: &str, timestamp: DateTime<Utc>, format: ImageFormat) -> String {
    format!(
        "coloring-page_{stem}_{}.{}",
        timestamp.format("%Y-%m-%dT%H-%M-%S"),
        format.as_str()
    )
}

/// Output path for a render result under `dir`, stamped with the current
/// time.
pub fn timestamped_render_path(dir: &Path, format: ImageFormat) -> std::path::PathBuf {
    dir.join(render_file_name(Utc::now(), format))
}

/// Output path for a coloring-page result under `dir`, stamped with the
/// current time.
pub fn timestamped_coloring_path(
    dir: &Path,
    stem: &str,
    format: ImageFormat,
) -> std::path::PathBuf {
    dir.join(coloring_file_name(stem, Utc::now(), format))
}

/// Write a rendered image to disk.
pub async fn write_image(path: &Path, image: &RenderedImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, &image.bytes).await?;
    tracing::info!("Image written | {} | {} bytes", path.display(), image.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 34, 56).unwrap()
    }

    #[test]
    fn test_render_file_name_shape() {
        let name = render_file_name(fixed_timestamp(), ImageFormat::Webp);
        assert_eq!(name, "FaceDetection_2026-08-07T12-34-56.webp");
    }

    #[test]
    fn test_coloring_file_name_shape() {
        let name = coloring_file_name("portrait", fixed_timestamp(), ImageFormat::Png);
        assert_eq!(name, "coloring-page_portrait_2026-08-07T12-34-56.png");
    }

    #[tokio::test]
    async fn test_write_image_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let image = RenderedImage {
            bytes: vec![1, 2, 3],
            format: ImageFormat::Png,
        };
        write_image(&path, &image).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
