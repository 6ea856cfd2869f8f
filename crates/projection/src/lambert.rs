//! Lambert Conformal Conic projection.
//!
//! Used for the static CONUS products. It maps a cone secant to the Earth's
//! surface onto a flat plane, which keeps shapes true across mid-latitudes.
//!
//! The projection parameters include:
//! - Central meridian (lon0) and latitude of origin (lat0)
//! - Standard parallels: latin1 and latin2 (can be equal for tangent cone)
//! - Sphere radius

use std::f64::consts::PI;

use crate::MapProjection;

/// Lambert Conformal Conic projection on a sphere.
///
/// Projected coordinates are meters east/north of the origin
/// (lon0, lat0).
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of origin in radians
    pub lat0: f64,
    /// First standard parallel in radians
    pub latin1: f64,
    /// Second standard parallel in radians
    pub latin2: f64,
    /// Sphere radius (meters)
    pub earth_radius: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the latitude of origin
    rho0: f64,
}

impl LambertConformal {
    /// Create a projection from parameters in degrees.
    pub fn new(lon0_deg: f64, lat0_deg: f64, latin1_deg: f64, latin2_deg: f64) -> Self {
        let to_rad = PI / 180.0;

        let lon0 = lon0_deg * to_rad;
        let lat0 = lat0_deg * to_rad;
        let latin1 = latin1_deg * to_rad;
        let latin2 = latin2_deg * to_rad;

        // Authalic sphere used by cartographic defaults
        let earth_radius = 6370997.0;

        // Compute cone constant n
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone (single standard parallel)
            latin1.sin()
        } else {
            // Secant cone (two standard parallels)
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio =
                ((PI / 4.0 + latin2 / 2.0).tan() / (PI / 4.0 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        let f = (latin1.cos() * (PI / 4.0 + latin1 / 2.0).tan().powf(n)) / n;
        let rho0 = earth_radius * f / (PI / 4.0 + lat0 / 2.0).tan().powf(n);

        Self {
            lon0,
            lat0,
            latin1,
            latin2,
            earth_radius,
            n,
            f,
            rho0,
        }
    }

    /// CONUS defaults: central meridian 96W, origin 39N, parallels 33N/45N.
    pub fn conus() -> Self {
        Self::new(-96.0, 39.0, 33.0, 45.0)
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

impl MapProjection for LambertConformal {
    fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let to_rad = PI / 180.0;
        let lat = lat_deg * to_rad;
        let lon = lon_deg * to_rad;

        // Normalize longitude difference to [-π, π]
        let mut dlon = lon - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let rho = self.earth_radius * self.f / (PI / 4.0 + lat / 2.0).tan().powf(self.n);
        let theta = self.n * dlon;

        let x = rho * theta.sin();
        let y = self.rho0 - rho * theta.cos();
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;

        let dy = self.rho0 - y;
        let mut rho = (x * x + dy * dy).sqrt();
        let mut theta = x.atan2(dy);
        if self.n < 0.0 {
            rho = -rho;
            theta = (-x).atan2(-dy);
        }

        let lat = 2.0 * ((self.earth_radius * self.f / rho).powf(1.0 / self.n)).atan() - PI / 2.0;
        let lon = self.lon0 + theta / self.n;

        (lon * to_deg, lat * to_deg)
    }
}
