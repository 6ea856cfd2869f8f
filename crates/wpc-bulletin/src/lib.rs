//! WPC coded surface bulletin.
//!
//! Parses the bulletin into pressure centers and boundaries and renders
//! the geo-referenced overlay and the static surface analysis.

pub mod error;
pub mod feature;
pub mod parser;
pub mod render;
pub mod stations;

pub use error::{BulletinError, Result};
pub use feature::{BulletinFeature, FeatureType, Geometry, SurfaceBulletin};
pub use parser::{decode_coordinate, parse_bulletin};
pub use render::{render_gis, render_static};
pub use stations::{fetch_station_layer, StationObservation};

use chrono::{DateTime, Utc};
use ingestion::HttpFetcher;
use tracing::info;
use wx_common::{OutputTree, ProductDestination};

pub const BULLETIN_URL: &str = "https://www.wpc.ncep.noaa.gov/discussions/codsus_hr";

/// Transparent Web Mercator overlay.
pub const GIS_DESTINATION: ProductDestination =
    ProductDestination::new(1200, OutputTree::GisProducts, &["noaa", "wpcsfcbull"]);

/// Dressed Lambert Conformal analysis.
pub const STATIC_DESTINATION: ProductDestination =
    ProductDestination::new(1201, OutputTree::Products, &["noaa", "wpcsfcbull"]);

pub const PRODUCT_TITLE: &str = "WPC Surface Analysis";

/// Refresh interval advertised for both bulletin products.
pub const REFRESH_INTERVAL_SECONDS: u64 = 300;

/// Image name for a bulletin valid at `time`, e.g. `1500.png`.
pub fn image_filename(time: DateTime<Utc>) -> String {
    time.format("%H%M.png").to_string()
}

/// Download and parse the current bulletin.
pub async fn fetch_bulletin(fetcher: &HttpFetcher, year: Option<i32>) -> Result<SurfaceBulletin> {
    let text = fetcher.get_text(BULLETIN_URL).await?;
    let bulletin = parse_bulletin(&text, Utc::now(), year)?;
    info!(
        valid = %bulletin.valid_time,
        features = bulletin.features.len(),
        "Fetched surface bulletin"
    );
    Ok(bulletin)
}
