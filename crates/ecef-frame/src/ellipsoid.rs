//! WGS84 reference ellipsoid parameters.
//!
//! These are the only ellipsoid constants used anywhere in the crate; heights
//! are always heights above this ellipsoid.

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared, `1 - (1 - f)^2`.
pub const WGS84_E2: f64 = 1.0 - (1.0 - WGS84_F) * (1.0 - WGS84_F);
/// WGS84 second eccentricity squared, `(a^2 - b^2) / b^2`.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// Multiply degrees by this to get radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
/// Multiply radians by this to get degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Parameters of a reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis in meters.
    pub a: f64,
    /// Flattening.
    pub f: f64,
    /// Semi-minor (polar) axis in meters.
    pub b: f64,
    /// First eccentricity squared.
    pub e2: f64,
    /// Second eccentricity squared.
    pub ep2: f64,
}

impl Ellipsoid {
    /// The WGS84 ellipsoid.
    pub const WGS84: Self = Self {
        a: WGS84_A,
        f: WGS84_F,
        b: WGS84_B,
        e2: WGS84_E2,
        ep2: WGS84_EP2,
    };

    /// Radius of curvature in the prime vertical at a geodetic latitude (radians).
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }
}
