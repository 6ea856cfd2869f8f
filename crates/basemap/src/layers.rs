//! Reading line work from shapefiles.

use std::path::Path;

use shapefile::Shape;
use wx_common::BoundingBox;

use crate::error::{BasemapError, Result};

/// A named set of lon/lat line strings.
#[derive(Debug, Clone, Default)]
pub struct LineLayer {
    pub lines: Vec<Vec<(f64, f64)>>,
}

impl LineLayer {
    pub fn new(lines: Vec<Vec<(f64, f64)>>) -> Self {
        Self { lines }
    }

    /// Read polygon rings and polyline parts as line strings.
    pub fn read(path: &Path) -> Result<Self> {
        let shapes = shapefile::read_shapes(path).map_err(|e| BasemapError::Shapefile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut lines = Vec::new();
        for shape in shapes {
            collect_lines(&shape, &mut lines);
        }
        Ok(Self { lines })
    }

    /// Keep only lines whose bounds touch `extent`.
    pub fn clipped_to(self, extent: &BoundingBox) -> Self {
        let lines = self
            .lines
            .into_iter()
            .filter(|line| {
                BoundingBox::from_points(line.iter().copied())
                    .map(|bounds| bounds_touch(&bounds, extent))
                    .unwrap_or(false)
            })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Like `intersects`, but counts degenerate (zero-width) bounds.
fn bounds_touch(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
}

fn collect_lines(shape: &Shape, lines: &mut Vec<Vec<(f64, f64)>>) {
    match shape {
        Shape::Polygon(polygon) => {
            for ring in polygon.rings() {
                lines.push(ring.points().iter().map(|p| (p.x, p.y)).collect());
            }
        }
        Shape::PolygonM(polygon) => {
            for ring in polygon.rings() {
                lines.push(ring.points().iter().map(|p| (p.x, p.y)).collect());
            }
        }
        Shape::PolygonZ(polygon) => {
            for ring in polygon.rings() {
                lines.push(ring.points().iter().map(|p| (p.x, p.y)).collect());
            }
        }
        Shape::Polyline(polyline) => {
            for part in polyline.parts() {
                lines.push(part.iter().map(|p| (p.x, p.y)).collect());
            }
        }
        Shape::PolylineM(polyline) => {
            for part in polyline.parts() {
                lines.push(part.iter().map(|p| (p.x, p.y)).collect());
            }
        }
        Shape::PolylineZ(polyline) => {
            for part in polyline.parts() {
                lines.push(part.iter().map(|p| (p.x, p.y)).collect());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wx_common::CONUS_EXTENT;

    #[test]
    fn test_clip_drops_far_lines() {
        let layer = LineLayer::new(vec![
            vec![(-100.0, 30.0), (-95.0, 32.0)],
            // Alaska
            vec![(-150.0, 61.0), (-149.0, 62.0)],
            // Crosses into the extent from outside
            vec![(-140.0, 45.0), (-120.0, 45.0)],
        ]);
        let clipped = layer.clipped_to(&CONUS_EXTENT);
        assert_eq!(clipped.len(), 2);
    }

    #[test]
    fn test_clip_keeps_vertical_line() {
        let layer = LineLayer::new(vec![vec![(-100.0, 30.0), (-100.0, 40.0)]]);
        assert_eq!(layer.clipped_to(&CONUS_EXTENT).len(), 1);
    }
}
