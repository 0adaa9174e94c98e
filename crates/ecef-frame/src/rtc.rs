//! Reading the `CESIUM_RTC` glTF extension.
//!
//! 3D-tile assets store vertex positions relative to an ECEF center to keep
//! them small. The center lives in the glTF JSON at
//! `extensions.CESIUM_RTC.center` as a three-element array.

use glam::DVec3;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::frame::LocalFrame;
use crate::transform::local_to_ecef;

/// Magic bytes at the start of a binary glTF file.
const GLB_MAGIC: &[u8; 4] = b"glTF";
/// Chunk type of the JSON chunk (`"JSON"` little-endian).
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A;
/// Size of the GLB file header.
const GLB_HEADER_LEN: usize = 12;
/// Size of a GLB chunk header.
const GLB_CHUNK_HEADER_LEN: usize = 8;

#[derive(Debug, Deserialize)]
struct GltfDocument {
    #[serde(default)]
    extensions: Option<GltfExtensions>,
}

#[derive(Debug, Deserialize)]
struct GltfExtensions {
    #[serde(rename = "CESIUM_RTC")]
    cesium_rtc: Option<RawRtc>,
}

#[derive(Debug, Deserialize)]
struct RawRtc {
    center: Vec<f64>,
}

/// The `CESIUM_RTC` extension of a glTF asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtcExtension {
    /// The ECEF center that vertex positions are relative to.
    pub center: DVec3,
}

impl RtcExtension {
    /// Extension name as it appears in the glTF JSON.
    pub const NAME: &'static str = "CESIUM_RTC";

    /// Read the extension from glTF JSON text.
    ///
    /// Returns `Ok(None)` when the asset has no `CESIUM_RTC` extension.
    pub fn from_gltf_json(json: &str) -> Result<Option<Self>> {
        let document: GltfDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Read the extension from an already parsed glTF JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Option<Self>> {
        let document = GltfDocument::deserialize(value)?;
        Self::from_document(document)
    }

    /// Read the extension from a binary glTF (`.glb`) file.
    pub fn from_glb(bytes: &[u8]) -> Result<Option<Self>> {
        let json = glb_json_chunk(bytes)?;
        let json = std::str::from_utf8(json).map_err(|e| Error::InvalidGlb {
            detail: format!("JSON chunk is not UTF-8: {e}"),
        })?;
        Self::from_gltf_json(json)
    }

    /// A local frame centered on the RTC center.
    pub fn frame(&self) -> LocalFrame {
        LocalFrame::with_center(self.center)
    }

    /// ECEF position of a vertex stored relative to the center.
    pub fn offset_position(&self, vertex: DVec3) -> DVec3 {
        local_to_ecef(vertex, self.center)
    }

    fn from_document(document: GltfDocument) -> Result<Option<Self>> {
        let Some(raw) = document.extensions.and_then(|e| e.cesium_rtc) else {
            return Ok(None);
        };

        let &[x, y, z] = raw.center.as_slice() else {
            return Err(Error::InvalidRtc {
                detail: format!(
                    "center must have 3 elements, got {}",
                    raw.center.len()
                ),
            });
        };

        let center = DVec3::new(x, y, z);
        if !center.is_finite() {
            return Err(Error::InvalidRtc {
                detail: format!("center is not finite: {center}"),
            });
        }

        tracing::debug!(x, y, z, "read CESIUM_RTC center");
        Ok(Some(Self { center }))
    }
}

/// Slice out the JSON chunk of a GLB container.
fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN {
        return Err(Error::InvalidGlb {
            detail: format!("file too small: {} bytes", bytes.len()),
        });
    }
    if &bytes[0..4] != GLB_MAGIC {
        return Err(Error::InvalidGlb {
            detail: "missing glTF magic".to_string(),
        });
    }

    let read_u32 = |offset: usize| {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };

    let chunk_len = read_u32(GLB_HEADER_LEN) as usize;
    let chunk_type = read_u32(GLB_HEADER_LEN + 4);
    if chunk_type != GLB_CHUNK_JSON {
        return Err(Error::InvalidGlb {
            detail: format!("first chunk is not JSON (type {chunk_type:#010x})"),
        });
    }

    let start = GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN;
    start
        .checked_add(chunk_len)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| Error::InvalidGlb {
            detail: format!(
                "JSON chunk length {chunk_len} exceeds file size {}",
                bytes.len()
            ),
        })
}
