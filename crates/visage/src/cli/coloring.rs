//! The `visage coloring-page` command: one-shot conversion of a local
//! image into a coloring page.

use clap::Args;
use std::path::PathBuf;
use visage_core::output::{timestamped_coloring_path, write_image};
use visage_core::{ImagePayload, Visage};

/// Arguments for the `coloring-page` command.
#[derive(Args, Debug)]
pub struct ColoringArgs {
    /// Image file to convert
    #[arg(required = true, value_name = "IMAGE")]
    pub image: PathBuf,

    /// Output file (defaults to a timestamped name in the output dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the coloring-page command.
pub async fn execute(args: ColoringArgs) -> anyhow::Result<()> {
    let visage = Visage::with_defaults()?;
    let payload = ImagePayload::from_path(&args.image).await?;

    let client = visage.coloring_client()?;
    let page = client.convert(&payload).await?;

    let stem = args
        .image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let path = args.output.unwrap_or_else(|| {
        timestamped_coloring_path(&visage.config().output_dir(), &stem, page.format)
    });
    write_image(&path, &page).await?;

    println!("{}", path.display());
    Ok(())
}
