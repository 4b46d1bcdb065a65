//! CLI entry point listing chunk-aligned patches of an image

use chunkpatch::io::cli::{Cli, PatchLister};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> chunkpatch::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let summary = PatchLister::new(cli).run()?;
    tracing::info!(
        chunks = summary.chunks,
        patches = summary.patches,
        "sampling finished"
    );
    Ok(())
}
