//! Composition of translation, rotation and scale into ECEF to local mappings.

use glam::{DAffine3, DMat3, DQuat, DVec3};

use crate::rotation::{apply_quaternion, create_local_up_rotation};

/// Translate an ECEF position into a frame whose origin is `center`.
pub fn ecef_to_local(position: DVec3, center: DVec3) -> DVec3 {
    position - center
}

/// Inverse of [`ecef_to_local`].
pub fn local_to_ecef(local: DVec3, center: DVec3) -> DVec3 {
    local + center
}

/// Description of one ECEF to local mapping.
///
/// Applied in a fixed order: translate by `-center`, rotate (if present),
/// then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Reference point that becomes the local origin (ECEF meters).
    pub center: DVec3,
    /// Optional rotation applied after translation. Must be unit length.
    pub rotation: Option<DQuat>,
    /// Uniform scale applied last.
    pub scale: f64,
}

impl TransformConfig {
    /// Translation-only mapping around `center`.
    pub fn new(center: DVec3) -> Self {
        Self {
            center,
            rotation: None,
            scale: 1.0,
        }
    }

    /// Set the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Use the rotation that makes the radial direction at `center` point up.
    #[must_use]
    pub fn with_local_up(self) -> Self {
        let rotation = create_local_up_rotation(self.center);
        self.with_rotation(rotation)
    }

    /// Set the uniform scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Map an ECEF position into the local frame.
    #[allow(clippy::float_cmp)]
    pub fn apply(&self, position: DVec3) -> DVec3 {
        let mut local = ecef_to_local(position, self.center);
        if let Some(rotation) = self.rotation {
            local = apply_quaternion(local, rotation);
        }
        if self.scale != 1.0 {
            local *= self.scale;
        }
        local
    }

    /// Map a local position back to ECEF, undoing [`TransformConfig::apply`].
    ///
    /// A zero scale has no inverse and produces non-finite results.
    #[allow(clippy::float_cmp)]
    pub fn inverse_apply(&self, local: DVec3) -> DVec3 {
        let mut position = local;
        if self.scale != 1.0 {
            position /= self.scale;
        }
        if let Some(rotation) = self.rotation {
            position = apply_quaternion(position, rotation.conjugate());
        }
        local_to_ecef(position, self.center)
    }

    /// The whole mapping as one affine transform.
    pub fn to_affine(&self) -> DAffine3 {
        compose_affine(self.center, self.rotation, self.scale)
    }
}

/// Build a reusable ECEF to local mapping from `config`.
///
/// The returned closure owns a copy of the configuration, so it can be stored,
/// copied and called from any thread.
pub fn create_transform(config: &TransformConfig) -> impl Fn(DVec3) -> DVec3 + Copy + Send + Sync + use<> {
    let config = *config;
    move |position| config.apply(position)
}

/// Options for [`create_transform_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixOptions {
    /// Rotate so the radial direction at the center becomes local up.
    pub auto_rotate: bool,
    /// Uniform scale applied last.
    pub scale: f64,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            scale: 1.0,
        }
    }
}

/// Build the ECEF to local mapping around `center` as a single affine transform.
///
/// Produces the same result as [`create_transform`] with the equivalent
/// [`TransformConfig`], for consumption by renderers that want a matrix.
pub fn create_transform_matrix(center: DVec3, options: MatrixOptions) -> DAffine3 {
    let rotation = options
        .auto_rotate
        .then(|| create_local_up_rotation(center));
    compose_affine(center, rotation, options.scale)
}

/// `scale * rotation * translate(-center)`, so translation applies first.
#[allow(clippy::float_cmp)]
fn compose_affine(center: DVec3, rotation: Option<DQuat>, scale: f64) -> DAffine3 {
    let mut matrix = DAffine3::from_translation(-center);
    if let Some(rotation) = rotation {
        matrix = DAffine3::from_mat3(DMat3::from_quat(rotation)) * matrix;
    }
    if scale != 1.0 {
        matrix = DAffine3::from_scale(DVec3::splat(scale)) * matrix;
    }
    matrix
}
