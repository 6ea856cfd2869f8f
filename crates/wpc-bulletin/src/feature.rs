//! Surface analysis features decoded from the bulletin.

use std::fmt;

use chrono::{DateTime, Utc};
use renderer::fronts::FrontKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    High,
    Low,
    Warm,
    Cold,
    Occluded,
    Stationary,
    Trough,
}

impl FeatureType {
    /// Boundary keyword at the start of a bulletin line.
    pub fn from_boundary_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "WARM" => Some(FeatureType::Warm),
            "COLD" => Some(FeatureType::Cold),
            "OCFNT" => Some(FeatureType::Occluded),
            "STNRY" => Some(FeatureType::Stationary),
            "TROF" => Some(FeatureType::Trough),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FeatureType::High => "HIGH",
            FeatureType::Low => "LOW",
            FeatureType::Warm => "WARM",
            FeatureType::Cold => "COLD",
            FeatureType::Occluded => "OCFNT",
            FeatureType::Stationary => "STNRY",
            FeatureType::Trough => "TROF",
        }
    }

    /// Frontal glyph style, `None` for pressure centers and troughs.
    pub fn front_kind(&self) -> Option<FrontKind> {
        match self {
            FeatureType::Warm => Some(FrontKind::Warm),
            FeatureType::Cold => Some(FrontKind::Cold),
            FeatureType::Occluded => Some(FrontKind::Occluded),
            FeatureType::Stationary => Some(FrontKind::Stationary),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Position(s) in (lon, lat) degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point((f64, f64)),
    Line(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletinFeature {
    pub feature_type: FeatureType,
    pub geometry: Geometry,
    /// Central pressure in hPa for highs and lows.
    pub strength: Option<f64>,
    /// Intensity word of a boundary (`WK`, `MDT`, `STG`).
    pub intensity: Option<String>,
    pub valid: DateTime<Utc>,
}

/// Every feature of one bulletin.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceBulletin {
    /// Valid time of the first feature block.
    pub valid_time: DateTime<Utc>,
    pub features: Vec<BulletinFeature>,
}

impl SurfaceBulletin {
    pub fn of_type(&self, feature_type: FeatureType) -> impl Iterator<Item = &BulletinFeature> {
        self.features
            .iter()
            .filter(move |f| f.feature_type == feature_type)
    }

    pub fn count(&self, feature_type: FeatureType) -> usize {
        self.of_type(feature_type).count()
    }
}
