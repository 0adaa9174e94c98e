//! Rotations between the ECEF radial direction and the local up axis.

use glam::{DQuat, DVec3};

/// The axis that points "up" in the local frame.
pub const LOCAL_UP: DVec3 = DVec3::Y;

/// Below this cross-product magnitude the radial direction is treated as
/// parallel to [`LOCAL_UP`].
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Rotation that takes the radial direction at `center` onto [`LOCAL_UP`].
///
/// The radial direction (Earth center to `center`, normalized) stands in for
/// the ellipsoid normal, so the result is "upright" to within the deflection
/// between geocentric and geodetic latitude.
///
/// Returns the identity when the direction is already parallel to the up
/// axis. It also returns the identity when the direction is anti-parallel
/// (`center` on the negative Y axis), which is *not* a valid rotation onto
/// the up axis; no surface point away from that single nadir is affected.
/// A zero `center` yields a `NaN` quaternion.
pub fn create_local_up_rotation(center: DVec3) -> DQuat {
    let direction = center / center.length();
    let axis = direction.cross(LOCAL_UP);
    let axis_length = axis.length();

    if axis_length < PARALLEL_EPSILON {
        return DQuat::IDENTITY;
    }

    let angle = direction.dot(LOCAL_UP).clamp(-1.0, 1.0).acos();
    let axis = axis / axis_length;
    let (sin_half, cos_half) = (angle * 0.5).sin_cos();

    DQuat::from_xyzw(
        axis.x * sin_half,
        axis.y * sin_half,
        axis.z * sin_half,
        cos_half,
    )
}

/// Rotate `point` by the unit quaternion `rotation`.
///
/// Equivalent to the sandwich product `q * p * q⁻¹` but expanded into the
/// closed form `p + w·t + q⃗ × t` with `t = 2·(q⃗ × p)`. The quaternion is not
/// normalized here; callers must pass a unit quaternion.
pub fn apply_quaternion(point: DVec3, rotation: DQuat) -> DVec3 {
    let q = DVec3::new(rotation.x, rotation.y, rotation.z);
    let t = 2.0 * q.cross(point);
    point + rotation.w * t + q.cross(t)
}
