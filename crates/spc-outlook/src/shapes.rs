//! Reading outlook polygons from shapefiles.

use std::path::Path;

use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;
use tracing::debug;

use crate::error::{OutlookError, Result};
use crate::record::{OutlookRecord, Rings};

const COMPANIONS: [&str; 2] = ["dbf", "shx"];

/// Load every polygon record of an outlook shapefile.
///
/// Features without polygon geometry (SPC ships empty placeholder rows
/// on quiet days) are skipped.
pub fn load_records(path: &Path) -> Result<Vec<OutlookRecord>> {
    for extension in COMPANIONS {
        if !path.with_extension(extension).exists() {
            return Err(OutlookError::MissingCompanion {
                shapefile: path.to_path_buf(),
                extension,
            });
        }
    }

    let features = shapefile::read(path).map_err(|e| OutlookError::Shapefile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut records = Vec::with_capacity(features.len());
    for (shape, record) in features {
        let Some(rings) = polygon_rings(&shape) else {
            continue;
        };
        records.push(OutlookRecord {
            category_code: numeric_field(&record, "DN")
                .ok_or_else(|| missing(path, "DN"))?
                .round() as i64,
            fill_color: text_field(&record, "fill").ok_or_else(|| missing(path, "fill"))?,
            stroke_color: text_field(&record, "stroke").ok_or_else(|| missing(path, "stroke"))?,
            label: text_field(&record, "LABEL2").ok_or_else(|| missing(path, "LABEL2"))?,
            rings,
        });
    }

    debug!(path = %path.display(), records = records.len(), "Loaded outlook shapefile");
    Ok(records)
}

fn missing(path: &Path, field: &'static str) -> OutlookError {
    OutlookError::MissingField {
        path: path.to_path_buf(),
        field,
    }
}

fn polygon_rings(shape: &Shape) -> Option<Rings> {
    let rings: Rings = match shape {
        Shape::Polygon(p) => p
            .rings()
            .iter()
            .map(|r| r.points().iter().map(|pt| (pt.x, pt.y)).collect())
            .collect(),
        Shape::PolygonM(p) => p
            .rings()
            .iter()
            .map(|r| r.points().iter().map(|pt| (pt.x, pt.y)).collect())
            .collect(),
        Shape::PolygonZ(p) => p
            .rings()
            .iter()
            .map(|r| r.points().iter().map(|pt| (pt.x, pt.y)).collect())
            .collect(),
        _ => return None,
    };
    (!rings.is_empty()).then_some(rings)
}

fn numeric_field(record: &Record, name: &str) -> Option<f64> {
    match record.get(name)? {
        FieldValue::Numeric(value) => *value,
        FieldValue::Double(value) => Some(*value),
        FieldValue::Float(value) => value.map(f64::from),
        FieldValue::Integer(value) => Some(f64::from(*value)),
        FieldValue::Character(Some(text)) => text.trim().parse().ok(),
        _ => None,
    }
}

fn text_field(record: &Record, name: &str) -> Option<String> {
    match record.get(name)? {
        FieldValue::Character(value) => Some(value.clone().unwrap_or_default().trim().to_string()),
        FieldValue::Memo(text) => Some(text.trim().to_string()),
        _ => None,
    }
}
