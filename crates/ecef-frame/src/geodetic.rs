//! Conversions between ECEF and geodetic coordinates on the WGS84 ellipsoid.
//!
//! ECEF positions are plain [`DVec3`] values in meters: origin at the
//! ellipsoid center, Z through the north pole, X through the prime meridian.

use glam::DVec3;

use crate::ellipsoid::{DEG_TO_RAD, Ellipsoid, RAD_TO_DEG};
use crate::error::{Error, Result};

/// Geodetic coordinates: degrees and meters above the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Height above the ellipsoid in meters.
    pub height: f64,
}

impl Geodetic {
    /// Geodetic coordinate with every component `NaN`.
    pub const NAN: Self = Self {
        lat: f64::NAN,
        lon: f64::NAN,
        height: f64::NAN,
    };

    /// Create a new geodetic coordinate.
    pub fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }

    /// Returns true if any component is `NaN`.
    pub fn is_nan(&self) -> bool {
        self.lat.is_nan() || self.lon.is_nan() || self.height.is_nan()
    }

    /// Convert to ECEF. See [`geodetic_to_ecef`].
    pub fn to_ecef(self) -> DVec3 {
        geodetic_to_ecef(self.lat, self.lon, self.height)
    }
}

/// Convert an ECEF position (meters) to geodetic coordinates.
///
/// Uses Bowring's closed-form latitude rather than an iterative solver, which
/// keeps the function branch-free for the per-frame callers. Accuracy is
/// sub-millimeter for points within a few hundred kilometers of the surface.
///
/// Latitude is in `[-90, 90]` and longitude in `(-180, 180]`.
///
/// # Edge cases
///
/// - On or very near the polar axis the height is computed as
///   `p / cos(lat) - N` with `cos(lat)` close to zero, so height loses all
///   precision there (exactly on the axis it comes out as `-N`). Latitude and
///   longitude stay well defined.
/// - Deep inside the Earth, within `e²·a` (about 43 km) of the center and off
///   the polar axis, Bowring's latitude denominator goes negative and the
///   point has no unique ellipsoid normal. Those points, the center included,
///   return [`Geodetic::NAN`].
#[allow(clippy::float_cmp)]
pub fn ecef_to_geodetic(position: DVec3) -> Geodetic {
    let DVec3 { x, y, z } = position;
    let wgs84 = Ellipsoid::WGS84;

    let p = (x * x + y * y).sqrt();

    // Parametric (reduced) latitude as the starting estimate.
    let theta = (z * wgs84.a).atan2(p * wgs84.b);
    let (sin_theta, cos_theta) = theta.sin_cos();

    let numerator = z + wgs84.ep2 * wgs84.b * sin_theta * sin_theta * sin_theta;
    let denominator = p - wgs84.e2 * wgs84.a * cos_theta * cos_theta * cos_theta;
    // On the polar axis the denominator is a rounding-sized negative and the
    // latitude still lands on +-90; only the origin is degenerate there.
    if denominator < 0.0 && (p > 0.0 || z == 0.0) {
        return Geodetic::NAN;
    }

    let lat = numerator.atan2(denominator);
    let lon = y.atan2(x);

    let n = wgs84.prime_vertical_radius(lat);
    let height = p / lat.cos() - n;

    Geodetic {
        lat: lat * RAD_TO_DEG,
        lon: lon * RAD_TO_DEG,
        height,
    }
}

/// Convert geodetic coordinates (degrees, meters) to an ECEF position.
///
/// Inputs are not range-checked; out-of-range angles are folded by the
/// trigonometry.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, height: f64) -> DVec3 {
    let wgs84 = Ellipsoid::WGS84;
    let lat_rad = lat_deg * DEG_TO_RAD;
    let lon_rad = lon_deg * DEG_TO_RAD;
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    let n = wgs84.prime_vertical_radius(lat_rad);

    DVec3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - wgs84.e2) + height) * sin_lat,
    )
}

/// Euclidean distance between two ECEF positions (meters).
pub fn ecef_distance(a: DVec3, b: DVec3) -> f64 {
    (a - b).length()
}

/// Arithmetic mean of a set of ECEF positions.
pub fn ecef_center(points: &[DVec3]) -> Result<DVec3> {
    let Some((&first, rest)) = points.split_first() else {
        return Err(Error::EmptyInput {
            operation: "ecef_center",
        });
    };
    if rest.is_empty() {
        return Ok(first);
    }

    let sum = points.iter().fold(DVec3::ZERO, |acc, &p| acc + p);
    #[allow(clippy::cast_precision_loss)]
    let count = points.len() as f64;
    Ok(sum / count)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::ellipsoid::{WGS84_A, WGS84_B};

    #[test]
    fn test_ecef_to_geodetic_equator_prime_meridian() {
        let geo = ecef_to_geodetic(DVec3::new(6_378_137.0, 0.0, 0.0));
        assert!(geo.lat.abs() < 1e-12);
        assert!(geo.lon.abs() < 1e-12);
        assert!(geo.height.abs() < 1e-6);
    }

    #[test]
    fn test_geodetic_to_ecef_equator_prime_meridian() {
        let ecef = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert!((ecef.x - 6_378_137.0).abs() < 1e-9);
        assert!(ecef.y.abs() < 1e-9);
        assert!(ecef.z.abs() < 1e-9);
    }

    #[test]
    fn test_geodetic_to_ecef_equator_90e() {
        let ecef = geodetic_to_ecef(0.0, 90.0, 0.0);
        assert!(ecef.x.abs() < 1e-6);
        assert!((ecef.y - WGS84_A).abs() < 1e-6);
        assert!(ecef.z.abs() < 1e-6);
    }

    #[test]
    fn test_geodetic_to_ecef_north_pole() {
        let ecef = geodetic_to_ecef(90.0, 0.0, 0.0);
        assert!(ecef.x.abs() < 1e-6);
        assert!(ecef.y.abs() < 1e-6);
        assert!((ecef.z - WGS84_B).abs() < 1e-6);
    }

    #[test]
    fn test_tokyo() {
        // geodetic_to_ecef(35.6762, 139.6503, 40.0).
        let ecef = DVec3::new(-3_953_099.846_251, 3_358_372.031_278, 3_699_089.485_774);
        let geo = ecef_to_geodetic(ecef);
        assert!((geo.lat - 35.6762).abs() < 1e-6, "lat {}", geo.lat);
        assert!((geo.lon - 139.6503).abs() < 1e-6, "lon {}", geo.lon);
        assert!((geo.height - 40.0).abs() < 1e-3, "height {}", geo.height);
    }

    #[test]
    fn test_central_tokyo_reference_point() {
        let geo = ecef_to_geodetic(DVec3::new(-3_959_768.229, 3_352_818.505, 3_697_478.773));
        assert!((geo.lat - 35.656_558).abs() < 1e-5, "lat {}", geo.lat);
        assert!((geo.lon - 139.744_713).abs() < 1e-5, "lon {}", geo.lon);
        assert!((geo.height - 314.15).abs() < 1e-2, "height {}", geo.height);
    }

    #[test]
    fn test_southern_western_hemisphere() {
        let ecef = geodetic_to_ecef(-33.8688, -70.6693, 570.0);
        assert!(ecef.x > 0.0 && ecef.y < 0.0 && ecef.z < 0.0);
        let geo = ecef_to_geodetic(ecef);
        assert!((geo.lat + 33.8688).abs() < 1e-9);
        assert!((geo.lon + 70.6693).abs() < 1e-9);
        assert!((geo.height - 570.0).abs() < 1e-6);
    }

    #[test]
    fn test_below_ellipsoid() {
        let geo = ecef_to_geodetic(geodetic_to_ecef(31.5, 35.5, -430.0));
        assert!((geo.height + 430.0).abs() < 1e-6);
    }

    #[test]
    fn test_antimeridian_longitude() {
        let geo = ecef_to_geodetic(DVec3::new(-WGS84_A, 0.0, 0.0));
        assert!((geo.lon - 180.0).abs() < 1e-12);
        assert!(geo.lat.abs() < 1e-12);
    }

    #[test]
    fn test_near_pole_round_trip() {
        let geo = ecef_to_geodetic(geodetic_to_ecef(89.9999, 10.0, 1000.0));
        assert!((geo.lat - 89.9999).abs() < 1e-9);
        assert!((geo.lon - 10.0).abs() < 1e-9);
        assert!((geo.height - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_exact_pole_height_is_degenerate() {
        // Latitude and longitude are still sane on the polar axis, but the
        // height formula divides by cos(90°) and collapses to -N.
        let geo = ecef_to_geodetic(DVec3::new(0.0, 0.0, WGS84_B));
        assert!((geo.lat - 90.0).abs() < 1e-9);
        assert!(geo.lon.abs() < 1e-12);
        let polar_n = WGS84_A * WGS84_A / WGS84_B;
        assert!((geo.height + polar_n).abs() < 1.0, "height {}", geo.height);

        let south = ecef_to_geodetic(DVec3::new(0.0, 0.0, -WGS84_B));
        assert!((south.lat + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_earth_center_is_nan() {
        let geo = ecef_to_geodetic(DVec3::ZERO);
        assert!(geo.is_nan());
        assert!(geo.lat.is_nan() && geo.lon.is_nan() && geo.height.is_nan());
    }

    #[test]
    fn test_deep_interior_is_nan() {
        assert!(ecef_to_geodetic(DVec3::new(1.0, 0.0, 0.0)).is_nan());
        assert!(ecef_to_geodetic(DVec3::new(1000.0, 0.0, 1000.0)).is_nan());
        assert!(ecef_to_geodetic(DVec3::new(20_000.0, 0.0, 0.0)).is_nan());
        assert!(ecef_to_geodetic(DVec3::new(0.0, -30_000.0, 5_000.0)).is_nan());
    }

    #[test]
    fn test_interior_outside_evolute_is_in_range() {
        let geo = ecef_to_geodetic(DVec3::new(50_000.0, 0.0, 0.0));
        assert!(geo.lat.abs() < 1e-12);
        assert!((geo.height - (50_000.0 - WGS84_A)).abs() < 1e-6);

        // Points on the polar axis keep a latitude of +-90 however deep they are.
        let geo = ecef_to_geodetic(DVec3::new(0.0, 0.0, 1.0));
        assert!((geo.lat - 90.0).abs() < 1e-9);
        let geo = ecef_to_geodetic(DVec3::new(0.0, 0.0, -1.0));
        assert!((geo.lat + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_longitude_wraps() {
        let a = geodetic_to_ecef(10.0, 370.0, 0.0);
        let b = geodetic_to_ecef(10.0, 10.0, 0.0);
        assert!(ecef_distance(a, b) < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(geodetic_to_ecef(f64::NAN, 0.0, 0.0).x.is_nan());
        assert!(ecef_to_geodetic(DVec3::new(f64::NAN, 1.0, 1.0)).is_nan());
    }

    #[test]
    fn test_geodetic_to_ecef_method() {
        let geo = Geodetic::new(12.0, -45.0, 250.0);
        assert_eq!(geo.to_ecef(), geodetic_to_ecef(12.0, -45.0, 250.0));
    }

    #[test]
    fn test_distance_pythagorean() {
        let d = ecef_distance(DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_center_of_three_points() {
        let points = [
            DVec3::ZERO,
            DVec3::new(10.0, 10.0, 10.0),
            DVec3::new(20.0, 20.0, 20.0),
        ];
        assert_eq!(ecef_center(&points).unwrap(), DVec3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_center_single_point_unchanged() {
        let p = DVec3::new(1_329_866.230_289, -4_643_494.267_515, 4_154_677.131_562);
        assert_eq!(ecef_center(&[p]).unwrap(), p);
    }

    #[test]
    fn test_center_empty() {
        assert!(matches!(
            ecef_center(&[]),
            Err(Error::EmptyInput {
                operation: "ecef_center"
            })
        ));
    }

    fn ecef_point() -> impl Strategy<Value = DVec3> {
        (-7.0e6..7.0e6f64, -7.0e6..7.0e6f64, -7.0e6..7.0e6f64)
            .prop_map(|(x, y, z)| DVec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            lat in -89.999f64..89.999,
            lon in -180.0f64..180.0,
            height in -10_000.0f64..100_000.0,
        ) {
            let geo = ecef_to_geodetic(geodetic_to_ecef(lat, lon, height));
            prop_assert!((geo.lat - lat).abs() < 1e-5, "lat {} vs {}", geo.lat, lat);
            prop_assert!((geo.lon - lon).abs() < 1e-5, "lon {} vs {}", geo.lon, lon);
            prop_assert!((geo.height - height).abs() < 1e-2, "height {} vs {}", geo.height, height);
        }

        #[test]
        fn prop_output_ranges(p in ecef_point()) {
            let geo = ecef_to_geodetic(p);
            if p.length() > 1.0e5 {
                prop_assert!(!geo.is_nan());
            }
            if !geo.is_nan() {
                prop_assert!((-90.0..=90.0).contains(&geo.lat), "lat {}", geo.lat);
                prop_assert!((-180.0..=180.0).contains(&geo.lon), "lon {}", geo.lon);
            }
        }

        #[test]
        fn prop_interior_output_ranges(
            x in -60_000.0f64..60_000.0,
            y in -60_000.0f64..60_000.0,
            z in -60_000.0f64..60_000.0,
        ) {
            let geo = ecef_to_geodetic(DVec3::new(x, y, z));
            prop_assert!(geo.is_nan() || (-90.0..=90.0).contains(&geo.lat), "lat {}", geo.lat);
        }

        #[test]
        fn prop_distance_to_self_is_zero(p in ecef_point()) {
            prop_assert_eq!(ecef_distance(p, p), 0.0);
        }

        #[test]
        fn prop_distance_symmetric(a in ecef_point(), b in ecef_point()) {
            prop_assert_eq!(ecef_distance(a, b), ecef_distance(b, a));
        }

        #[test]
        fn prop_triangle_inequality(a in ecef_point(), b in ecef_point(), c in ecef_point()) {
            let direct = ecef_distance(a, c);
            let detour = ecef_distance(a, b) + ecef_distance(b, c);
            prop_assert!(direct <= detour * (1.0 + 1e-12) + 1e-9);
        }

        #[test]
        fn prop_center_of_identical_points(p in ecef_point(), n in 1usize..16) {
            let points = vec![p; n];
            let center = ecef_center(&points).unwrap();
            prop_assert!(ecef_distance(center, p) <= p.length() * 1e-12);
        }
    }
}
