//! The `visage render` command: analyze (cached) then render with the
//! selected display options, writing the result image to disk.

use super::{stage_source, SourceArgs};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use visage_core::output::{timestamped_render_path, write_image};
use visage_core::{ImageFormat, RenderMode, RenderOptions, Visage};

/// Output format choices.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Png,
    Webp,
    Gif,
}

impl From<FormatArg> for ImageFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Webp => ImageFormat::Webp,
            FormatArg::Gif => ImageFormat::Gif,
        }
    }
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Produce an animated result instead of a still
    #[arg(long)]
    pub animated: bool,

    /// Draw face landmarks (still mode)
    #[arg(long, conflicts_with = "animated")]
    pub landmarks: bool,

    /// Blur faces beyond recognition (still mode)
    #[arg(long, conflicts_with = "animated")]
    pub anonymize: bool,

    /// Force the mustache overlay on (still mode)
    #[arg(long, conflicts_with_all = ["animated", "no_stache"])]
    pub stache: bool,

    /// Turn the mustache overlay off (still mode)
    #[arg(long, conflicts_with = "animated")]
    pub no_stache: bool,

    /// Force the oscillating animation on (animated mode)
    #[arg(long, requires = "animated", conflicts_with = "no_oscillating")]
    pub oscillating: bool,

    /// Turn the oscillating animation off (animated mode)
    #[arg(long, requires = "animated")]
    pub no_oscillating: bool,

    /// Bouncing animation (animated mode)
    #[arg(long, requires = "animated")]
    pub bouncing: bool,

    /// Crop the output to each detected face
    #[arg(long)]
    pub crop_faces: bool,

    /// Crop the output to the region containing all faces
    #[arg(long)]
    pub crop_image: bool,

    /// Output image format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output file (defaults to a timestamped name in the output dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolve a default-carrying flag pair (`--x` / `--no-x`).
fn resolve_flag(on: bool, off: bool, default: bool) -> bool {
    if off {
        false
    } else {
        on || default
    }
}

impl RenderArgs {
    /// Build render options from the CLI flags and configured defaults.
    fn options(&self, visage: &Visage) -> RenderOptions {
        let defaults = &visage.config().defaults;
        let mode = if self.animated {
            RenderMode::Animated {
                oscillating: resolve_flag(
                    self.oscillating,
                    self.no_oscillating,
                    defaults.oscillating,
                ),
                bouncing: self.bouncing,
            }
        } else {
            RenderMode::Still {
                landmarks: self.landmarks,
                anonymize: self.anonymize,
                stache: resolve_flag(self.stache, self.no_stache, defaults.stache),
            }
        };

        let format = self
            .format
            .map(ImageFormat::from)
            .or_else(|| ImageFormat::parse(&defaults.image_format))
            .unwrap_or(ImageFormat::Png);

        RenderOptions {
            mode,
            crop_faces: self.crop_faces,
            crop_image: self.crop_image,
            format,
        }
    }
}

/// Execute the render command.
pub async fn execute(args: RenderArgs) -> anyhow::Result<()> {
    let visage = Visage::with_defaults()?;
    let source = stage_source(&visage, &args.source).await?;
    let options = args.options(&visage);

    let outcome = visage.session().render(source, options).await?;
    tracing::info!("{} face(s) detected", outcome.faces_detected);

    let path = args
        .output
        .unwrap_or_else(|| timestamped_render_path(&visage.config().output_dir(), outcome.image.format));
    write_image(&path, &outcome.image).await?;

    println!("{} | faces: {}", path.display(), outcome.faces_detected);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_flag_precedence() {
        // Off wins over everything
        assert!(!resolve_flag(false, true, true));
        // Explicit on wins over a false default
        assert!(resolve_flag(true, false, false));
        // Otherwise the default applies
        assert!(resolve_flag(false, false, true));
        assert!(!resolve_flag(false, false, false));
    }
}
