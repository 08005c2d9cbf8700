//! Feature table JSON parsing.
//!
//! The feature table is the JSON block that follows the header. It describes
//! how many points the tile holds, how positions were quantized, and where the
//! position and color arrays sit inside the binary body that follows it.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};

/// Optional per-point fields that this decoder recognises but does not consume.
const IGNORED_FIELDS: [&str; 7] = [
    "POSITION",
    "RGBA",
    "RGB565",
    "NORMAL",
    "NORMAL_OCT16P",
    "CONSTANT_RGBA",
    "RTC_CENTER",
];

/// A reference into the feature table binary body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BinaryBodyReference {
    /// Offset from the start of the binary body, in bytes.
    #[serde(rename = "byteOffset")]
    pub byte_offset: usize,
}

/// The parsed feature table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureTable {
    #[serde(rename = "POINTS_LENGTH")]
    pub points_length: u32,
    #[serde(rename = "QUANTIZED_VOLUME_OFFSET")]
    pub quantized_volume_offset: [f64; 3],
    #[serde(rename = "QUANTIZED_VOLUME_SCALE")]
    pub quantized_volume_scale: [f64; 3],
    #[serde(rename = "POSITION_QUANTIZED")]
    pub position_quantized: BinaryBodyReference,
    #[serde(rename = "RGB", default)]
    pub rgb: Option<BinaryBodyReference>,
    /// Number of distinct batch ids, if the tile is batched per point.
    #[serde(rename = "BATCH_LENGTH", default)]
    pub batch_length: Option<u32>,
    /// Per-point batch id array, if present. Its shape is not interpreted.
    #[serde(rename = "BATCH_ID", default)]
    pub batch_id: Option<Value>,
    /// Every other key, kept so unconsumed fields can be reported.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureTable {
    /// Parse the feature table from its raw bytes.
    ///
    /// Trailing space or NUL padding after the JSON object is accepted.
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::MalformedMetadata {
            context: "feature table",
            detail: format!("not valid UTF-8: {e}"),
        })?;
        let text = text.trim_end_matches(['\0', ' ']);

        serde_json::from_str(text).map_err(|e| DecodeError::MalformedMetadata {
            context: "feature table",
            detail: e.to_string(),
        })
    }

    /// Whether the table addresses points through batch ids.
    #[must_use]
    pub fn is_batched(&self) -> bool {
        self.batch_length.is_some() || self.batch_id.is_some()
    }

    /// Known optional fields present in the table that the decoder skips.
    #[must_use]
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        IGNORED_FIELDS
            .into_iter()
            .filter(|name| self.extra.contains_key(*name))
            .collect()
    }
}
