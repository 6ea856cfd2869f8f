//! SPC outlook renderer.
//!
//! One run reads the outlook issue time, exits early when every outlook
//! product for that time already exists, and otherwise renders:
//! - Day 1-8 convective outlooks (categorical, probabilistic, hail, wind, tornado)
//! - Day 1-8 fire weather outlooks

mod config;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use ingestion::HttpFetcher;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::{parse_level, CommonArgs, Settings};
use pipeline::{OutlookPipeline, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "spc-outlooks")]
#[command(about = "Render SPC convective and fire weather outlooks")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
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

    info!("Starting SPC outlook run");

    let settings = Settings::from_args(&args.common)?;
    let pipeline = OutlookPipeline::new(HttpFetcher::new()?, settings);

    match pipeline.run().await? {
        RunOutcome::AlreadyProduced => info!("Nothing to do"),
        RunOutcome::Rendered { images } => info!(images, "Finished"),
    }
    Ok(())
}
