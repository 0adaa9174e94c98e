//! Error types for the ecef-frame crate.

use std::fmt;

/// Result type for ecef-frame operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ecef-frame operations.
///
/// Numeric degeneracies (the Earth's center, exact poles) are not errors:
/// those propagate as `NaN`/infinite values through the returned coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A reduction over points was given no points.
    EmptyInput {
        /// The operation that required at least one point.
        operation: &'static str,
    },
    /// A frame transform was requested before a reference center was set.
    MissingCenter {
        /// The operation that needed the center.
        operation: &'static str,
    },
    /// The `CESIUM_RTC` extension was present but malformed.
    InvalidRtc {
        /// Description of what was invalid.
        detail: String,
    },
    /// A binary glTF container could not be read.
    InvalidGlb {
        /// Description of what was invalid.
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput { operation } => {
                write!(f, "{operation} requires at least one point")
            }
            Error::MissingCenter { operation } => {
                write!(f, "{operation} called before a frame center was set")
            }
            Error::InvalidRtc { detail } => write!(f, "invalid CESIUM_RTC extension: {detail}"),
            Error::InvalidGlb { detail } => write!(f, "invalid binary glTF: {detail}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidRtc {
            detail: e.to_string(),
        }
    }
}
