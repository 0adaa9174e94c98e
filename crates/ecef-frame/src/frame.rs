//! A single owner for the current local frame.
//!
//! Renderers hold one [`LocalFrame`], point it at a reference center once
//! that center is known (for example from an asset's RTC metadata), and read
//! immutable [`TransformConfig`] snapshots from it. Derived state is
//! recomputed here whenever the center changes, so consumers never see a
//! rotation that belongs to a stale center.

use glam::{DAffine3, DQuat, DVec3};

use crate::error::{Error, Result};
use crate::rotation::create_local_up_rotation;
use crate::transform::TransformConfig;

/// Stateful ECEF to local mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    config: Option<TransformConfig>,
    auto_rotate: bool,
    scale: f64,
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFrame {
    /// A frame with no center yet. Auto rotation is on and the scale is 1.
    pub fn new() -> Self {
        Self {
            config: None,
            auto_rotate: true,
            scale: 1.0,
        }
    }

    /// A frame centered on `center`.
    pub fn with_center(center: DVec3) -> Self {
        let mut frame = Self::new();
        frame.set_center(center);
        frame
    }

    /// The current center, if one has been set.
    pub fn center(&self) -> Option<DVec3> {
        self.config.map(|config| config.center)
    }

    /// The current rotation, if a center is set and auto rotation is on.
    pub fn rotation(&self) -> Option<DQuat> {
        self.config.and_then(|config| config.rotation)
    }

    /// The uniform scale applied after rotation.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether the frame rotates the radial direction onto local up.
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Snapshot of the current mapping, if a center is set.
    pub fn config(&self) -> Option<TransformConfig> {
        self.config
    }

    /// Move the frame to `center`. Returns false if it was already there.
    pub fn set_center(&mut self, center: DVec3) -> bool {
        if self.center() == Some(center) {
            return false;
        }
        self.config = Some(self.build_config(center));
        tracing::debug!(
            x = center.x,
            y = center.y,
            z = center.z,
            "local frame center changed"
        );
        true
    }

    /// Enable or disable the local up rotation.
    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.auto_rotate = auto_rotate;
        self.rebuild();
    }

    /// Set the uniform scale.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.rebuild();
    }

    /// Forget the center. Options are kept.
    pub fn clear(&mut self) {
        self.config = None;
    }

    /// Map an ECEF position into the frame.
    pub fn transform_point(&self, position: DVec3) -> Result<DVec3> {
        Ok(self.require("transform_point")?.apply(position))
    }

    /// Map a position in the frame back to ECEF.
    pub fn inverse_transform_point(&self, local: DVec3) -> Result<DVec3> {
        Ok(self.require("inverse_transform_point")?.inverse_apply(local))
    }

    /// The mapping as an affine transform.
    pub fn matrix(&self) -> Result<DAffine3> {
        Ok(self.require("matrix")?.to_affine())
    }

    fn require(&self, operation: &'static str) -> Result<TransformConfig> {
        self.config.ok_or(Error::MissingCenter { operation })
    }

    fn rebuild(&mut self) {
        if let Some(center) = self.center() {
            self.config = Some(self.build_config(center));
        }
    }

    fn build_config(&self, center: DVec3) -> TransformConfig {
        let config = TransformConfig::new(center).with_scale(self.scale);
        if self.auto_rotate {
            config.with_rotation(create_local_up_rotation(center))
        } else {
            config
        }
    }
}
