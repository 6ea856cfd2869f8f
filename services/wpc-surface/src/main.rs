//! WPC surface analysis renderer.
//!
//! Decodes the coded surface bulletin and renders a transparent Web
//! Mercator overlay plus a dressed Lambert Conformal analysis with station
//! plots, unless both already exist for the bulletin's valid time.

mod config;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use ingestion::HttpFetcher;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::{parse_level, CommonArgs, Settings};
use pipeline::{RunOutcome, SurfacePipeline};

#[derive(Parser, Debug)]
#[command(name = "wpc-surface")]
#[command(about = "Render the WPC coded surface bulletin")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Skip the geo-referenced overlay
    #[arg(long)]
    no_gis: bool,

    /// Year of the bulletin's VALID stamp (default: closest to now)
    #[arg(long)]
    year: Option<i32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.common.log_level))
        .with_target(true)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(no_gis = args.no_gis, "Starting WPC surface analysis run");

    let settings = Settings::from_args(&args.common)?;
    let pipeline = SurfacePipeline::new(HttpFetcher::new()?, settings, !args.no_gis, args.year);

    match pipeline.run().await? {
        RunOutcome::AlreadyProduced => info!("Nothing to do"),
        RunOutcome::Rendered { images } => info!(images, "Finished"),
    }
    Ok(())
}
