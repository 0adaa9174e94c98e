//! WGS84 ECEF/geodetic conversion and local tangent frame transforms.
//!
//! Earth-scale ECEF coordinates are millions of meters, far beyond what `f32`
//! vertex data can represent precisely. This crate converts between ECEF and
//! geodetic coordinates and builds the translation, rotation and scale that
//! move a region of interest into a small, origin-centered local frame where
//! the local +Y axis points away from the Earth's center.
//!
//! # Design principles
//!
//! - **Pure math**: every free function is a deterministic value-to-value
//!   mapping with no shared state; all types are `Copy + Send + Sync`
//! - **No panics on degenerate input**: the Earth's center, the poles and
//!   other numeric edge cases propagate `NaN` instead of erroring
//! - **Engine-agnostic**: results are `glam` values; adapters copy them onto
//!   whatever scene graph they drive
//!
//! # Example
//!
//! ```
//! use ecef_frame::{LocalFrame, geodetic_to_ecef};
//!
//! let center = geodetic_to_ecef(40.7, -74.0, 0.0);
//! let frame = LocalFrame::with_center(center);
//!
//! let above = geodetic_to_ecef(40.7, -74.0, 100.0);
//! let local = frame.transform_point(above).unwrap();
//! assert!((local.y - 100.0).abs() < 1e-2);
//! ```

pub mod bounds;
pub mod ellipsoid;
mod error;
pub mod frame;
pub mod geodetic;
pub mod rotation;
pub mod rtc;
pub mod transform;

pub use bounds::{Bounds, calculate_bounds};
pub use ellipsoid::Ellipsoid;
pub use error::{Error, Result};
pub use frame::LocalFrame;
pub use geodetic::{Geodetic, ecef_center, ecef_distance, ecef_to_geodetic, geodetic_to_ecef};
pub use rotation::{LOCAL_UP, apply_quaternion, create_local_up_rotation};
pub use rtc::RtcExtension;
pub use transform::{
    MatrixOptions, TransformConfig, create_transform, create_transform_matrix, ecef_to_local,
    local_to_ecef,
};

// Re-export glam for consumers.
pub use glam;
