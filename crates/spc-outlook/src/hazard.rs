//! Outlook hazard types and their fixed presentation profiles.

use std::fmt;

use wx_common::{OutputTree, ProductDestination};

use crate::error::{OutlookError, Result};

pub const CATEGORICAL_OUT: ProductDestination =
    ProductDestination::new(1203, OutputTree::Products, &["noaa", "spc", "catout"]);
pub const LONG_RANGE_OUT: ProductDestination =
    ProductDestination::new(1205, OutputTree::Products, &["noaa", "spc", "LRout"]);
pub const PROBABILISTIC_OUT: ProductDestination =
    ProductDestination::new(1207, OutputTree::Products, &["noaa", "spc", "probout"]);
pub const HAIL_OUT: ProductDestination =
    ProductDestination::new(1209, OutputTree::Products, &["noaa", "spc", "hailout"]);
pub const WIND_OUT: ProductDestination =
    ProductDestination::new(1211, OutputTree::Products, &["noaa", "spc", "windout"]);
pub const TORNADO_OUT: ProductDestination =
    ProductDestination::new(1213, OutputTree::Products, &["noaa", "spc", "tornout"]);
pub const FIRE_OUT: ProductDestination =
    ProductDestination::new(1215, OutputTree::Products, &["noaa", "spc", "fireout"]);

/// Every product family one outlook run fills.
pub const ALL_DESTINATIONS: [ProductDestination; 7] = [
    CATEGORICAL_OUT,
    LONG_RANGE_OUT,
    PROBABILISTIC_OUT,
    HAIL_OUT,
    WIND_OUT,
    TORNADO_OUT,
    FIRE_OUT,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardType {
    Categorical,
    Probabilistic,
    Hail,
    Wind,
    Tornado,
    FireWeather,
}

impl HazardType {
    /// Classify a convective shapefile by the text after its last `_`.
    ///
    /// Significant-severity layers (`sighail`, `sigtorn`, ...) are folded
    /// into their parent hazard upstream and return `Ok(None)`.
    pub fn from_file_name(file_name: &str) -> Result<Option<Self>> {
        let suffix = file_name
            .rsplit('_')
            .next()
            .unwrap_or(file_name)
            .to_lowercase()
            .replace(".shp", "");
        if suffix.contains("sig") {
            return Ok(None);
        }
        match suffix.as_str() {
            "cat" => Ok(Some(HazardType::Categorical)),
            "prob" => Ok(Some(HazardType::Probabilistic)),
            "hail" => Ok(Some(HazardType::Hail)),
            "wind" => Ok(Some(HazardType::Wind)),
            "torn" => Ok(Some(HazardType::Tornado)),
            _ => Err(OutlookError::UnknownHazard(suffix)),
        }
    }

    /// Name used in product titles.
    pub fn title(&self) -> &'static str {
        match self {
            HazardType::Categorical => "Categorical",
            HazardType::Probabilistic => "Probabilistic",
            HazardType::Hail => "Hail",
            HazardType::Wind => "Wind",
            HazardType::Tornado => "Tornado",
            HazardType::FireWeather => "Fire Weather",
        }
    }

    /// Informational first legend entry.
    pub fn legend_header(&self) -> &'static str {
        match self {
            HazardType::Categorical => {
                "Classification Info:\nhttps://www.spc.noaa.gov/misc/SPC_probotlk_info.html"
            }
            HazardType::Probabilistic => "Chance of any severe weather within 25 miles of a point",
            HazardType::Hail => "Chance of Hail >= 1\" within 25 miles of a point",
            HazardType::Wind => "Chance of Wind >= 58 mph within 25 miles of a point",
            HazardType::Tornado => "Chance of Tornado within 25 miles of a point",
            HazardType::FireWeather => {
                "Classification Info:\nhttps://www.spc.noaa.gov/misc/about.html#FireWx"
            }
        }
    }

    /// Threshold text appended to significant-severity legend entries.
    pub fn severity_suffix(&self) -> &'static str {
        match self {
            HazardType::Hail => "(2\" or larger)",
            HazardType::Tornado => "(EF2 or stronger)",
            HazardType::Wind => "(74 mph or stronger)",
            HazardType::Probabilistic => {
                "(10% chance of 2\" or larger hail, or EF2 or stronger tornado, or 74 mph or stronger wind)"
            }
            HazardType::Categorical | HazardType::FireWeather => "",
        }
    }

    /// Product families an outlook for `day` is filed under.
    pub fn destinations(&self, day: u8) -> Vec<ProductDestination> {
        match self {
            HazardType::Categorical => vec![CATEGORICAL_OUT, LONG_RANGE_OUT],
            HazardType::Probabilistic if day >= 4 => vec![LONG_RANGE_OUT, PROBABILISTIC_OUT],
            HazardType::Probabilistic => vec![PROBABILISTIC_OUT],
            HazardType::Hail => vec![HAIL_OUT],
            HazardType::Wind => vec![WIND_OUT],
            HazardType::Tornado => vec![TORNADO_OUT],
            HazardType::FireWeather => vec![FIRE_OUT],
        }
    }

    /// Product title, e.g. `SPC Day 1 Categorical Outlook`.
    pub fn product_title(&self, day: u8) -> String {
        format!("SPC Day {} {} Outlook", day, self.title())
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Upstream outlook bundle families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlookSource {
    Convective,
    Fire,
}

impl OutlookSource {
    /// Zipped shapefile bundle for `day` (1..=8).
    pub fn bundle_url(&self, day: u8) -> String {
        match self {
            OutlookSource::Convective if day < 4 => {
                format!("https://www.spc.noaa.gov/products/outlook/day{day}otlk-shp.zip")
            }
            OutlookSource::Convective => {
                format!("https://www.spc.noaa.gov/products/exper/day4-8/day{day}prob-shp.zip")
            }
            OutlookSource::Fire if day < 3 => {
                format!("https://www.spc.noaa.gov/products/fire_wx/day{day}firewx-shp.zip")
            }
            OutlookSource::Fire => {
                format!("https://www.spc.noaa.gov/products/exper/fire_wx/day{day}firewx-shp.zip")
            }
        }
    }

    /// Scratch directory name below `input/`.
    pub fn scratch_name(&self, day: u8) -> String {
        match self {
            OutlookSource::Convective => format!("day{day}-conv"),
            OutlookSource::Fire => format!("day{day}-fire"),
        }
    }
}

/// Page whose update stamp gives the outlook issue time.
pub const OUTLOOK_INDEX_URL: &str = "https://www.spc.noaa.gov/products/outlook/";

/// Fire shapefiles with this marker hold dry-lightning areas and are skipped.
pub const DRY_LIGHTNING_MARKER: &str = "dryltg";
