//! Bevy plugin that places ECEF-anchored entities in a local tangent frame.
//!
//! Earth coordinates are millions of meters, which `f32` transforms cannot
//! hold precisely. Entities keep their true position in an [`EcefAnchor`]
//! (`f64`), and every frame their `Transform` is rewritten from the
//! [`ActiveFrame`]: translated so the frame center is the origin, rotated so
//! the radial direction is +Y, and scaled.

use bevy::prelude::*;
use ecef_frame::{LocalFrame, RtcExtension};
use glam::{DQuat, DVec3};

/// Plugin for the ECEF local frame.
pub struct EcefFramePlugin;

impl Plugin for EcefFramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveFrame>()
            .add_systems(PostUpdate, update_anchored_transforms);
    }
}

/// The frame every [`EcefAnchor`] is placed in.
///
/// Starts without a center; anchored entities are left untouched until one
/// is set.
#[derive(Resource, Default, Debug)]
pub struct ActiveFrame {
    /// Center, rotation and scale applied to every anchored entity.
    pub frame: LocalFrame,
}

impl ActiveFrame {
    /// Center the frame on an asset's RTC center.
    pub fn set_rtc_center(&mut self, rtc: &RtcExtension) -> bool {
        self.frame.set_center(rtc.center)
    }
}

/// True ECEF placement of an entity.
#[derive(Component, Clone, Debug)]
pub struct EcefAnchor {
    /// Position in ECEF coordinates (meters).
    pub position: DVec3,
    /// Orientation relative to the ECEF axes.
    pub orientation: DQuat,
}

impl EcefAnchor {
    /// Anchor at `position` with ECEF-aligned axes.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            orientation: DQuat::IDENTITY,
        }
    }

    /// Anchor for an asset whose vertices are stored relative to its RTC center.
    pub fn from_rtc(rtc: &RtcExtension) -> Self {
        Self::new(rtc.center)
    }
}

/// Rewrite anchored transforms from the active frame.
///
/// Runs in `PostUpdate` so frame changes made during `Update` apply the same
/// frame.
#[allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]
fn update_anchored_transforms(
    frame: Res<ActiveFrame>,
    mut query: Query<(&EcefAnchor, &mut Transform)>,
    mut warned: Local<bool>,
) {
    let Some(config) = frame.frame.config() else {
        if !*warned && !query.is_empty() {
            tracing::warn!("ECEF anchors present but the local frame has no center");
            *warned = true;
        }
        return;
    };
    *warned = false;

    let frame_rotation = config.rotation.unwrap_or(DQuat::IDENTITY);
    let scale = Vec3::splat(config.scale as f32);

    for (anchor, mut transform) in &mut query {
        // Relative coordinates are small, so f32 is safe from here on.
        transform.translation = config.apply(anchor.position).as_vec3();
        transform.rotation = (frame_rotation * anchor.orientation).as_quat();
        transform.scale = scale;
    }
}
