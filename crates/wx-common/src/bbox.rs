//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// Map extent used by every rendered product: lon -130..-60, lat 20..50.
pub const CONUS_EXTENT: BoundingBox = BoundingBox {
    min_x: -130.0,
    min_y: 20.0,
    max_x: -60.0,
    max_y: 50.0,
};

/// A geographic or projected bounding box.
///
/// For geographic coordinates x is longitude and y is latitude (degrees).
/// For projected coordinates both axes are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let mut bbox = Self::new(x0, y0, x0, y0);
        for (x, y) in iter {
            bbox.min_x = bbox.min_x.min(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_x = bbox.max_x.max(x);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Points along the box outline, `steps` segments per edge.
    ///
    /// Used to find the projected footprint of a lon/lat box, where straight
    /// edges turn into curves.
    pub fn densified_outline(&self, steps: usize) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        let mut points = Vec::with_capacity(steps * 4);
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            points.push((self.min_x + t * self.width(), self.min_y));
        }
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            points.push((self.max_x, self.min_y + t * self.height()));
        }
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            points.push((self.max_x - t * self.width(), self.max_y));
        }
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            points.push((self.min_x, self.max_y - t * self.height()));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(vec![(1.0, 5.0), (-3.0, 2.0), (4.0, -1.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-3.0, -1.0, 4.0, 5.0));
        assert!(BoundingBox::from_points(Vec::<(f64, f64)>::new()).is_none());
    }

    #[test]
    fn test_conus_extent() {
        assert_eq!(CONUS_EXTENT.width(), 70.0);
        assert_eq!(CONUS_EXTENT.height(), 30.0);
        assert!(CONUS_EXTENT.contains_point(-97.0, 35.0));
        assert!(!CONUS_EXTENT.contains_point(-150.0, 61.0));
    }
}
