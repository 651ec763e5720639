//! The `visage analyze` command: one analysis call, JSON to stdout.

use super::{stage_source, SourceArgs};
use clap::Args;
use visage_core::Visage;

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs) -> anyhow::Result<()> {
    let visage = Visage::with_defaults()?;
    let source = stage_source(&visage, &args.source).await?;

    let analysis = visage.session().analysis(source).await?;
    tracing::info!("{} face(s) detected", analysis.faces_detected);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
