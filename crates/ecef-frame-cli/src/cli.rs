//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default uniform scale for `frame`.
const DEFAULT_SCALE: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(about = "WGS84 ECEF/geodetic conversion and local frame inspection")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an ECEF position (meters) to latitude, longitude and height.
    ToGeodetic {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
    },
    /// Convert latitude, longitude (degrees) and height (meters) to ECEF.
    ToEcef {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        /// Height above the WGS84 ellipsoid in meters.
        #[arg(allow_hyphen_values = true, default_value_t = 0.0)]
        height: f64,
    },
    /// Straight-line distance between two ECEF positions.
    Distance {
        /// First position followed by second position: X1 Y1 Z1 X2 Y2 Z2.
        #[arg(num_args = 6, allow_hyphen_values = true, required = true)]
        coords: Vec<f64>,
    },
    /// Print the local frame rotation and matrix around an ECEF center.
    Frame {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
        /// Skip the rotation that makes the radial direction point up.
        #[arg(long)]
        no_rotate: bool,
        /// Uniform scale applied after rotation.
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f64,
    },
    /// Read the CESIUM_RTC center from a .gltf or .glb file.
    Rtc {
        /// Path to the glTF asset.
        path: PathBuf,
    },
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
