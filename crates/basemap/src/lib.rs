//! Natural Earth base map layers.
//!
//! Downloads the 1:50m state/province boundaries and coastline once into a
//! cache directory, then reads them as line work clipped to the map extent.

pub mod error;
pub mod layers;

use std::fs;
use std::path::{Path, PathBuf};

use ingestion::{extract_zip, HttpFetcher};
use renderer::color::BLACK;
use renderer::{LineStyle, MapCanvas};
use tracing::{debug, info, warn};
use wx_common::BoundingBox;

pub use error::{BasemapError, Result};
pub use layers::LineLayer;

const NATURAL_EARTH_BASE: &str = "https://naciscdn.org/naturalearth/50m";

/// A Natural Earth dataset and its category on the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalEarthSource {
    pub category: &'static str,
    pub name: &'static str,
}

pub const STATES: NaturalEarthSource = NaturalEarthSource {
    category: "cultural",
    name: "ne_50m_admin_1_states_provinces_lakes",
};

pub const COASTLINE: NaturalEarthSource = NaturalEarthSource {
    category: "physical",
    name: "ne_50m_coastline",
};

impl NaturalEarthSource {
    pub fn url(&self) -> String {
        format!("{}/{}/{}.zip", NATURAL_EARTH_BASE, self.category, self.name)
    }

    /// Directory holding the unpacked dataset below `cache_dir`.
    pub fn layer_dir(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join("natural_earth").join(self.name)
    }

    /// Location of the cached `.shp` below `cache_dir`.
    pub fn shapefile_path(&self, cache_dir: &Path) -> PathBuf {
        self.layer_dir(cache_dir).join(format!("{}.shp", self.name))
    }

    /// A layer counts as cached only once its geometry, index and attribute
    /// files are all in place.
    pub fn is_cached(&self, cache_dir: &Path) -> bool {
        self.is_cached_in(&self.layer_dir(cache_dir))
    }

    /// Download and unpack the dataset unless it is already cached.
    pub async fn ensure_cached(&self, fetcher: &HttpFetcher, cache_dir: &Path) -> Result<PathBuf> {
        if self.is_cached(cache_dir) {
            return Ok(self.shapefile_path(cache_dir));
        }

        let url = self.url();
        info!(layer = self.name, url = %url, "Downloading base map layer");
        let bytes = fetcher
            .get_bytes(&url)
            .await
            .map_err(|source| BasemapError::Download {
                layer: self.name,
                source,
            })?;
        self.install(&bytes, cache_dir)
    }

    /// Unpack `archive` into a hidden sibling of the layer directory, then
    /// rename it into place. An interrupted extraction leaves only the
    /// hidden directory behind.
    pub fn install(&self, archive: &[u8], cache_dir: &Path) -> Result<PathBuf> {
        let dir = self.layer_dir(cache_dir);
        let parent = dir.parent().unwrap_or(cache_dir);
        let staging = parent.join(format!(".{}.partial", self.name));
        if staging.exists() {
            warn!(path = %staging.display(), "Removing stale partial extraction");
            fs::remove_dir_all(&staging)?;
        }

        extract_zip(archive, &staging).map_err(|source| BasemapError::Download {
            layer: self.name,
            source,
        })?;
        if !self.is_cached_in(&staging) {
            fs::remove_dir_all(&staging)?;
            return Err(BasemapError::Shapefile {
                path: dir.display().to_string(),
                message: "archive is missing .shp, .shx or .dbf".to_string(),
            });
        }

        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::rename(&staging, &dir)?;
        debug!(layer = self.name, path = %dir.display(), "Base map layer cached");
        Ok(self.shapefile_path(cache_dir))
    }

    fn is_cached_in(&self, dir: &Path) -> bool {
        ["shp", "shx", "dbf"]
            .iter()
            .all(|ext| dir.join(format!("{}.{}", self.name, ext)).is_file())
    }
}

/// State boundaries and coastlines.
#[derive(Debug, Clone, Default)]
pub struct Basemap {
    pub states: LineLayer,
    pub coastlines: LineLayer,
}

impl Basemap {
    /// Read both layers from already-cached shapefiles.
    pub fn from_cache(cache_dir: &Path, extent: &BoundingBox) -> Result<Self> {
        let margin = extent.expanded(5.0);
        Ok(Self {
            states: LineLayer::read(&STATES.shapefile_path(cache_dir))?.clipped_to(&margin),
            coastlines: LineLayer::read(&COASTLINE.shapefile_path(cache_dir))?.clipped_to(&margin),
        })
    }

    /// Fetch missing layers into `cache_dir`, then read them.
    pub async fn load(fetcher: &HttpFetcher, cache_dir: &Path, extent: &BoundingBox) -> Result<Self> {
        STATES.ensure_cached(fetcher, cache_dir).await?;
        COASTLINE.ensure_cached(fetcher, cache_dir).await?;
        let basemap = Self::from_cache(cache_dir, extent)?;
        info!(
            states = basemap.states.len(),
            coastlines = basemap.coastlines.len(),
            "Base map loaded"
        );
        Ok(basemap)
    }

    /// Draw both layers as thin black lines.
    pub fn draw(&self, canvas: &mut MapCanvas) {
        let style = LineStyle::solid(BLACK, 0.5);
        for line in self.states.lines.iter().chain(&self.coastlines.lines) {
            canvas.stroke_line(line, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_urls() {
        assert_eq!(
            STATES.url(),
            "https://naciscdn.org/naturalearth/50m/cultural/ne_50m_admin_1_states_provinces_lakes.zip"
        );
        assert_eq!(
            COASTLINE.url(),
            "https://naciscdn.org/naturalearth/50m/physical/ne_50m_coastline.zip"
        );
    }

    #[test]
    fn test_cache_layout() {
        let path = COASTLINE.shapefile_path(Path::new("/var/cache/hdwx"));
        assert_eq!(
            path,
            PathBuf::from("/var/cache/hdwx/natural_earth/ne_50m_coastline/ne_50m_coastline.shp")
        );
    }

    fn layer_zip(name: &str, extensions: &[&str]) -> Vec<u8> {
        use std::io::Write;
        let mut zip_writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        for ext in extensions {
            zip_writer.start_file(format!("{}.{}", name, ext), options).unwrap();
            zip_writer.write_all(ext.as_bytes()).unwrap();
        }
        zip_writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_lone_shp_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let shp = COASTLINE.shapefile_path(dir.path());
        fs::create_dir_all(shp.parent().unwrap()).unwrap();
        fs::write(&shp, b"truncated").unwrap();
        assert!(!COASTLINE.is_cached(dir.path()));
    }

    #[test]
    fn test_install_renames_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("natural_earth/.ne_50m_coastline.partial");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("leftover.shp"), b"old").unwrap();

        let data = layer_zip(COASTLINE.name, &["shp", "shx", "dbf", "prj"]);
        let shp = COASTLINE.install(&data, dir.path()).unwrap();

        assert_eq!(shp, COASTLINE.shapefile_path(dir.path()));
        assert!(COASTLINE.is_cached(dir.path()));
        assert!(!staging.exists());
        assert!(!COASTLINE.layer_dir(dir.path()).join("leftover.shp").exists());
    }

    #[test]
    fn test_incomplete_archive_leaves_no_cache() {
        let dir = tempfile::tempdir().unwrap();
        let data = layer_zip(STATES.name, &["shp"]);
        let result = STATES.install(&data, dir.path());

        assert!(matches!(result, Err(BasemapError::Shapefile { .. })));
        assert!(!STATES.is_cached(dir.path()));
        assert!(!STATES.layer_dir(dir.path()).exists());
        assert!(!dir
            .path()
            .join("natural_earth/.ne_50m_admin_1_states_provinces_lakes.partial")
            .exists());
    }

    #[test]
    fn test_missing_cache_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Basemap::from_cache(dir.path(), &wx_common::CONUS_EXTENT);
        assert!(matches!(result, Err(BasemapError::Shapefile { .. })));
    }
}
