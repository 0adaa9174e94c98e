//! Command-line front end for `ecef-frame`.
//!
//! Converts coordinates, inspects local frames and reads RTC centers from
//! glTF assets. Set `RUST_LOG=debug` to see library tracing.

mod cli;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use cli::Command;
use ecef_frame::{LocalFrame, RtcExtension, ecef_distance, ecef_to_geodetic, geodetic_to_ecef};
use glam::DVec3;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::ToGeodetic { x, y, z } => {
            let geo = ecef_to_geodetic(DVec3::new(x, y, z));
            println!("lat {:.9} lon {:.9} height {:.4}", geo.lat, geo.lon, geo.height);
        }
        Command::ToEcef { lat, lon, height } => {
            let ecef = geodetic_to_ecef(lat, lon, height);
            println!("x {:.4} y {:.4} z {:.4}", ecef.x, ecef.y, ecef.z);
        }
        Command::Distance { coords } => {
            let &[x1, y1, z1, x2, y2, z2] = coords.as_slice() else {
                return Err(format!("expected 6 coordinates, got {}", coords.len()).into());
            };
            let d = ecef_distance(DVec3::new(x1, y1, z1), DVec3::new(x2, y2, z2));
            println!("{d:.4}");
        }
        Command::Frame {
            x,
            y,
            z,
            no_rotate,
            scale,
        } => {
            let mut frame = LocalFrame::new();
            frame.set_auto_rotate(!no_rotate);
            frame.set_scale(scale);
            frame.set_center(DVec3::new(x, y, z));
            print_frame(&frame)?;
        }
        Command::Rtc { path } => {
            let Some(rtc) = read_rtc(&path)? else {
                println!("{} has no {} extension", path.display(), RtcExtension::NAME);
                return Ok(());
            };
            let geo = ecef_to_geodetic(rtc.center);
            println!(
                "center x {:.4} y {:.4} z {:.4}",
                rtc.center.x, rtc.center.y, rtc.center.z
            );
            println!("lat {:.9} lon {:.9} height {:.4}", geo.lat, geo.lon, geo.height);
            print_frame(&rtc.frame())?;
        }
    }
    Ok(())
}

fn print_frame(frame: &LocalFrame) -> Result<(), Box<dyn Error>> {
    if let Some(rotation) = frame.rotation() {
        println!(
            "rotation x {:.12} y {:.12} z {:.12} w {:.12}",
            rotation.x, rotation.y, rotation.z, rotation.w
        );
    }
    let matrix = frame.matrix()?;
    for row in 0..3 {
        let m = matrix.matrix3.row(row);
        println!(
            "[{:>16.9} {:>16.9} {:>16.9} {:>18.4}]",
            m.x,
            m.y,
            m.z,
            matrix.translation[row]
        );
    }
    Ok(())
}

fn read_rtc(path: &Path) -> Result<Option<RtcExtension>, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read asset");
    parse_rtc(&bytes)
}

/// Binary glTF is recognised by its magic; anything else is read as JSON text.
fn parse_rtc(bytes: &[u8]) -> Result<Option<RtcExtension>, Box<dyn Error>> {
    let rtc = if bytes.starts_with(b"glTF") {
        RtcExtension::from_glb(bytes)?
    } else {
        RtcExtension::from_gltf_json(std::str::from_utf8(bytes)?)?
    };
    Ok(rtc)
}
