//! Axis-aligned bounding extents over ECEF point sets.

use glam::DVec3;

use crate::error::{Error, Result};

/// Axis-aligned bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Componentwise minimum.
    pub min: DVec3,
    /// Componentwise maximum.
    pub max: DVec3,
    /// Midpoint of `min` and `max`.
    pub center: DVec3,
}

impl Bounds {
    /// Edge lengths of the box.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Whether `point` lies inside the box (boundary included).
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Compute the axis-aligned bounds of `points`.
pub fn calculate_bounds(points: &[DVec3]) -> Result<Bounds> {
    let Some((&first, rest)) = points.split_first() else {
        return Err(Error::EmptyInput {
            operation: "calculate_bounds",
        });
    };

    let (min, max) = rest
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));

    Ok(Bounds {
        min,
        max,
        center: (min + max) / 2.0,
    })
}
