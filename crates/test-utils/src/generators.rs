//! Synthetic input generators for testing.
//!
//! Builds small SPC-style outlook shapefiles on disk so loaders can be
//! tested without network access.

use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing, Writer};

/// One outlook polygon with the attribute columns SPC ships.
#[derive(Debug, Clone)]
pub struct OutlookFeature {
    pub dn: i32,
    pub label: String,
    pub label2: String,
    pub fill: String,
    pub stroke: String,
    /// Outer ring as (lon, lat) pairs
    pub ring: Vec<(f64, f64)>,
}

impl OutlookFeature {
    pub fn square(
        dn: i32,
        label2: &str,
        fill: &str,
        stroke: &str,
        (lon0, lat0): (f64, f64),
        size: f64,
    ) -> Self {
        Self {
            dn,
            label: label2.split_whitespace().next().unwrap_or("").to_uppercase(),
            label2: label2.to_string(),
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            ring: square_ring(lon0, lat0, size),
        }
    }
}

/// Closed square ring with its south-west corner at (`lon0`, `lat0`).
pub fn square_ring(lon0: f64, lat0: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (lon0, lat0),
        (lon0, lat0 + size),
        (lon0 + size, lat0 + size),
        (lon0 + size, lat0),
        (lon0, lat0),
    ]
}

fn field(name: &str) -> FieldName {
    FieldName::try_from(name).expect("valid dBase field name")
}

/// Write `features` as a polygon shapefile (`.shp`, `.shx`, `.dbf`).
pub fn write_outlook_shapefile(path: &Path, features: &[OutlookFeature]) {
    let table = TableWriterBuilder::new()
        .add_numeric_field(field("DN"), 10, 0)
        .add_character_field(field("LABEL"), 32)
        .add_character_field(field("LABEL2"), 64)
        .add_character_field(field("stroke"), 16)
        .add_character_field(field("fill"), 16);

    let mut writer = Writer::from_path(path, table).expect("create shapefile writer");
    for feature in features {
        let points = feature
            .ring
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect::<Vec<_>>();
        let polygon = Polygon::with_rings(vec![PolygonRing::Outer(points)]);

        let mut record = Record::default();
        record.insert("DN".to_string(), FieldValue::Numeric(Some(feature.dn as f64)));
        record.insert(
            "LABEL".to_string(),
            FieldValue::Character(Some(feature.label.clone())),
        );
        record.insert(
            "LABEL2".to_string(),
            FieldValue::Character(Some(feature.label2.clone())),
        );
        record.insert(
            "stroke".to_string(),
            FieldValue::Character(Some(feature.stroke.clone())),
        );
        record.insert(
            "fill".to_string(),
            FieldValue::Character(Some(feature.fill.clone())),
        );
        writer
            .write_shape_and_record(&polygon, &record)
            .expect("write outlook feature");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_ring_is_closed() {
        let ring = square_ring(-100.0, 30.0, 2.0);
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_write_outlook_shapefile_creates_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day1otlk_cat.shp");
        write_outlook_shapefile(
            &path,
            &[OutlookFeature::square(
                2,
                "Slight Risk",
                "#FFE066",
                "#DDAA00",
                (-100.0, 35.0),
                3.0,
            )],
        );
        assert!(path.exists());
        assert!(dir.path().join("day1otlk_cat.dbf").exists());
    }
}
