//! Run settings resolved from the command line and environment.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Args;
use renderer::FontBook;
use storage::{ProductSink, SinkMode};
use tracing::{info, Level};

/// Options shared with the other product binaries.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Root of the `output/` and `input/` trees
    #[arg(long, env = "HDWX_BASE_PATH", default_value = ".")]
    pub base_path: PathBuf,

    /// Metadata and dressing strategy: auto, helpers or plain
    #[arg(long, env = "HDWX_SINK", default_value = "auto")]
    pub sink: SinkMode,

    /// TrueType font for titles and legends (default: embedded DejaVu Sans)
    #[arg(long, env = "HDWX_FONT")]
    pub font: Option<PathBuf>,

    /// Natural Earth cache (default: <base-path>/cache)
    #[arg(long, env = "HDWX_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Everything a pipeline needs, built once at startup.
pub struct Settings {
    pub base_path: PathBuf,
    pub cache_dir: PathBuf,
    pub font: Rc<FontBook>,
    pub sink: Box<dyn ProductSink>,
}

impl Settings {
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let font = Rc::new(
            FontBook::load(args.font.as_deref()).context("Failed to load the label font")?,
        );
        let sink = args.sink.build(&args.base_path, font.clone());
        let cache_dir = args
            .cache_dir
            .clone()
            .unwrap_or_else(|| default_cache_dir(&args.base_path));

        info!(
            base_path = %args.base_path.display(),
            cache_dir = %cache_dir.display(),
            sink = sink.name(),
            font = args.font.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
            "Resolved settings"
        );
        Ok(Self {
            base_path: args.base_path.clone(),
            cache_dir,
            font,
            sink,
        })
    }
}

pub fn default_cache_dir(base_path: &Path) -> PathBuf {
    base_path.join("cache")
}

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
