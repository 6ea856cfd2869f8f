//! Airport positions used to place and filter METAR stations.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use ingestion::HttpFetcher;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{BulletinError, Result};

/// Airport table in the `ident,type,...,coordinates` layout.
pub const AIRPORT_CODES_URL: &str =
    "https://github.com/Unidata/MetPy/raw/main/staticdata/airport-codes.csv";

const PLOTTED_TYPES: [&str; 3] = ["large_airport", "medium_airport", "small_airport"];

#[derive(Debug, Deserialize)]
struct AirportRow {
    ident: String,
    #[serde(rename = "type")]
    kind: String,
    /// `"lon, lat"`
    coordinates: String,
}

/// Positions of large, medium and small airports by identifier.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    positions: HashMap<String, (f64, f64)>,
}

impl AirportTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut positions = HashMap::new();
        for row in csv.deserialize::<AirportRow>() {
            let row = row?;
            if !PLOTTED_TYPES.contains(&row.kind.as_str()) {
                continue;
            }
            if let Some(position) = parse_coordinates(&row.coordinates) {
                positions.insert(row.ident, position);
            }
        }
        debug!(airports = positions.len(), "Loaded airport table");
        Ok(Self { positions })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| BulletinError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Read the cached table, downloading it into `cache_dir` first if needed.
    pub async fn load(fetcher: &HttpFetcher, cache_dir: &Path) -> Result<Self> {
        let path = cache_dir.join("airport-codes.csv");
        if !path.exists() {
            info!(url = AIRPORT_CODES_URL, "Downloading airport table");
            let bytes = fetcher.get_bytes(AIRPORT_CODES_URL).await?;
            std::fs::create_dir_all(cache_dir).map_err(|source| BulletinError::Io {
                path: cache_dir.to_path_buf(),
                source,
            })?;
            std::fs::write(&path, &bytes).map_err(|source| BulletinError::Io {
                path: path.clone(),
                source,
            })?;
        }
        Self::read(&path)
    }

    /// (lon, lat) of a plotted airport.
    pub fn position(&self, ident: &str) -> Option<(f64, f64)> {
        self.positions.get(ident).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn parse_coordinates(value: &str) -> Option<(f64, f64)> {
    let (lon, lat) = value.split_once(',')?;
    Some((lon.trim().parse().ok()?, lat.trim().parse().ok()?))
}
