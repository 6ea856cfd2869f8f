//! Surface station observations for the static analysis image.
//!
//! The hourly METAR collection nearest the bulletin time is fetched from
//! THREDDS, matched against the airport table for positions, reduced to
//! complete reports and thinned to one station per 200 km.

pub mod airports;
pub mod catalog;
pub mod metar;
pub mod thin;

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use image::RgbaImage;
use ingestion::HttpFetcher;
use projection::{MapProjection, MapView, Projection};
use renderer::barbs::{draw_barb, BarbConfig};
use renderer::color::{BLACK, WHITE};
use renderer::sky::{draw_sky_cover, SkyCover};
use renderer::{FontBook, MapCanvas};
use tracing::{debug, info};
use wx_common::truncate_to_hour;

use crate::error::{BulletinError, Result};

pub use airports::AirportTable;
pub use catalog::{MetarCatalog, METAR_CATALOG_URL};
pub use metar::{parse_metar_collection, MetarReport};

/// Minimum distance between plotted stations, projected meters.
pub const THINNING_RADIUS_M: f64 = 200_000.0;

const STATION_RADIUS: f32 = 5.0;
const TEXT_PX: f32 = 13.0;
const TEXT_OFFSET: i32 = 7;

/// A complete, plottable station report.
#[derive(Debug, Clone, PartialEq)]
pub struct StationObservation {
    pub station_id: String,
    pub lon: f64,
    pub lat: f64,
    pub temperature_c: f64,
    pub dewpoint_c: f64,
    pub sea_level_pressure_hpa: f64,
    pub wind_direction: f64,
    pub wind_speed_kt: f64,
    pub sky_cover: SkyCover,
}

impl StationObservation {
    fn from_report(report: &MetarReport, airports: &AirportTable) -> Option<Self> {
        let (lon, lat) = airports.position(&report.station_id)?;
        Some(Self {
            station_id: report.station_id.clone(),
            lon,
            lat,
            temperature_c: report.temperature_c?,
            dewpoint_c: report.dewpoint_c?,
            sea_level_pressure_hpa: report.sea_level_pressure_hpa?,
            wind_direction: report.wind_direction?,
            wind_speed_kt: report.wind_speed_kt?,
            sky_cover: report.sky_cover?,
        })
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.0}", celsius_to_fahrenheit(self.temperature_c))
    }

    pub fn dewpoint_label(&self) -> String {
        format!("{:.0}", celsius_to_fahrenheit(self.dewpoint_c))
    }

    /// Last three digits of the pressure in tenths of hPa, e.g. 1011.4 -> `114`.
    pub fn pressure_label(&self) -> String {
        let tenths = format!("{:.0}", self.sea_level_pressure_hpa * 10.0);
        tenths[tenths.len().saturating_sub(3)..].to_string()
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Complete reports from plotted airports, last report per station, thinned
/// in `projection` space.
pub fn select_observations(
    reports: &[MetarReport],
    airports: &AirportTable,
    projection: &Projection,
) -> Vec<StationObservation> {
    let complete: Vec<StationObservation> = reports
        .iter()
        .filter_map(|r| StationObservation::from_report(r, airports))
        .collect();

    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (i, obs) in complete.iter().enumerate() {
        last_index.insert(obs.station_id.as_str(), i);
    }
    let unique: Vec<&StationObservation> = complete
        .iter()
        .enumerate()
        .filter(|(i, obs)| last_index.get(obs.station_id.as_str()) == Some(i))
        .map(|(_, obs)| obs)
        .collect();

    let projected: Vec<(f64, f64)> = unique
        .iter()
        .map(|obs| projection.project(obs.lon, obs.lat))
        .collect();
    let keep = thin::reduce_point_density(&projected, THINNING_RADIUS_M);

    let selected: Vec<StationObservation> = unique
        .into_iter()
        .zip(keep)
        .filter(|(_, keep)| *keep)
        .map(|(obs, _)| obs.clone())
        .collect();
    debug!(
        reports = reports.len(),
        complete = complete.len(),
        plotted = selected.len(),
        "Selected station observations"
    );
    selected
}

/// Fetch and select the observations nearest `valid_time`.
pub async fn fetch_station_layer(
    fetcher: &HttpFetcher,
    cache_dir: &Path,
    valid_time: DateTime<Utc>,
) -> Result<Vec<StationObservation>> {
    let metar_time = truncate_to_hour(valid_time);
    let catalog = MetarCatalog::parse(&fetcher.get_text(METAR_CATALOG_URL).await?)?;
    let dataset = catalog
        .nearest(metar_time)
        .ok_or_else(|| BulletinError::NoMetarCollection(metar_time.to_rfc3339()))?;
    let url = catalog.download_url(METAR_CATALOG_URL, dataset);
    info!(dataset = %dataset.name, "Fetching METAR collection");

    let reports = parse_metar_collection(&fetcher.get_text(&url).await?);
    let airports = AirportTable::load(fetcher, cache_dir).await?;
    Ok(select_observations(
        &reports,
        &airports,
        &Projection::lambert_conus(),
    ))
}

/// Sky cover circles and wind barbs.
pub fn draw_station_symbols(canvas: &mut MapCanvas, observations: &[StationObservation]) {
    let config = BarbConfig::default();
    let map = canvas.map_rect();
    for obs in observations {
        let (x, y) = canvas.to_pixel(obs.lon, obs.lat);
        if !map.contains(x as f64, y as f64) {
            continue;
        }
        draw_barb(canvas, x, y, obs.wind_direction, obs.wind_speed_kt, &config);
        draw_sky_cover(canvas, x, y, STATION_RADIUS, obs.sky_cover);
    }
}

/// Temperature (NW), dewpoint (SW) and pressure (NE) with a white halo.
pub fn draw_station_text(
    image: &mut RgbaImage,
    font: &FontBook,
    view: &MapView,
    observations: &[StationObservation],
) {
    let map = view.map_rect();
    for obs in observations {
        let (x, y) = view.to_pixel(obs.lon, obs.lat);
        if !map.contains(x, y) {
            continue;
        }
        let (x, y) = (x.round() as i32, y.round() as i32);

        let temperature = obs.temperature_label();
        let (tw, th) = font.text_size(&temperature, TEXT_PX);
        let nw = (x - TEXT_OFFSET - tw as i32, y - TEXT_OFFSET - th as i32 / 2 - 2);
        font.draw_with_halo(image, &temperature, nw.0, nw.1, TEXT_PX, BLACK, WHITE);

        let dewpoint = obs.dewpoint_label();
        let (dw, _) = font.text_size(&dewpoint, TEXT_PX);
        let sw = (x - TEXT_OFFSET - dw as i32, y + TEXT_OFFSET - 4);
        font.draw_with_halo(image, &dewpoint, sw.0, sw.1, TEXT_PX, BLACK, WHITE);

        let pressure = obs.pressure_label();
        let (_, ph) = font.text_size(&pressure, TEXT_PX);
        let ne = (x + TEXT_OFFSET, y - TEXT_OFFSET - ph as i32 / 2 - 2);
        font.draw_with_halo(image, &pressure, ne.0, ne.1, TEXT_PX, BLACK, WHITE);
    }
}
