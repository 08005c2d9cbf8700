//! Whole-tile decoding.

use glam::DVec3;

use crate::error::{DecodeError, DecodeResult};
use crate::extract::{extract_colors, extract_positions};
use crate::feature_table::FeatureTable;
use crate::header::TileHeader;
use crate::quantization::QuantizationParams;
use crate::stream::TileStream;
use crate::view::{Colors, DEFAULT_COLOR, QuantizedPositions};

/// What a tile declares about per-point batching, beyond a single feature.
///
/// Present only when the tile carries a batch table or batch ids; decoding
/// such a tile as one feature loses information the tile relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTableInfo {
    /// Batch table JSON length from the header.
    pub json_length: u32,
    /// Batch table binary length from the header.
    pub binary_length: u32,
    /// `BATCH_LENGTH` from the feature table.
    pub batch_length: Option<u32>,
    /// Whether the feature table has a `BATCH_ID` array.
    pub has_batch_ids: bool,
}

impl BatchTableInfo {
    fn detect(header: &TileHeader, table: &FeatureTable) -> Option<Self> {
        if !header.has_batch_table() && !table.is_batched() {
            return None;
        }
        Some(Self {
            json_length: header.batch_table_json_length,
            binary_length: header.batch_table_binary_length,
            batch_length: table.batch_length,
            has_batch_ids: table.batch_id.is_some(),
        })
    }

    /// Short description for logs and errors.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.json_length > 0 || self.binary_length > 0 {
            parts.push(format!(
                "batch table ({} JSON bytes, {} binary bytes)",
                self.json_length, self.binary_length
            ));
        }
        if let Some(length) = self.batch_length {
            parts.push(format!("BATCH_LENGTH {length}"));
        }
        if self.has_batch_ids {
            parts.push("BATCH_ID".to_string());
        }
        parts.join(", ")
    }
}

/// A decoded point cloud tile borrowing its arrays from the input buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPointCloud<'a> {
    pub header: TileHeader,
    pub params: QuantizationParams,
    pub point_count: usize,
    pub positions: QuantizedPositions<'a>,
    pub colors: Colors<'a>,
    /// Per-point batching the tile declares, which single-feature decoding
    /// does not honour.
    pub batch_table: Option<BatchTableInfo>,
    /// Optional feature table fields present in the tile but not decoded.
    pub ignored_fields: Vec<&'static str>,
}

impl DecodedPointCloud<'_> {
    /// Iterate over dequantized point coordinates.
    pub fn coordinates(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.positions.iter().map(|q| self.params.dequantize(q))
    }

    /// Dequantized coordinate of point `index`.
    #[must_use]
    pub fn coordinate(&self, index: usize) -> Option<DVec3> {
        self.positions.get(index).map(|q| self.params.dequantize(q))
    }

    /// Color of point `index`.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index)
    }
}

/// Decode a point cloud tile with opaque white as the fallback color.
///
/// See [`decode_point_cloud_with_default_color`].
pub fn decode_point_cloud(buffer: &[u8]) -> DecodeResult<DecodedPointCloud<'_>> {
    decode_point_cloud_with_default_color(buffer, DEFAULT_COLOR)
}

/// Decode a point cloud tile.
///
/// Position and color arrays are views into `buffer`; only a missing color
/// array is allocated, filled with `default_color`.
///
/// # Errors
///
/// - [`DecodeError::FormatMismatch`] if the magic is not `pnts`. The feature
///   table is not read in this case.
/// - [`DecodeError::MalformedMetadata`] if the feature table is not valid
///   UTF-8 JSON with the required keys.
/// - [`DecodeError::TruncatedBuffer`] if the header, feature table, or either
///   array runs past the end of `buffer`.
pub fn decode_point_cloud_with_default_color(
    buffer: &[u8],
    default_color: [u8; 3],
) -> DecodeResult<DecodedPointCloud<'_>> {
    let mut stream = TileStream::new(buffer);
    let header = TileHeader::read(&mut stream)?;
    if !header.is_valid() {
        return Err(DecodeError::FormatMismatch {
            found: header.format,
        });
    }

    let json_start = stream.position();
    let json_length = header.feature_table_json_length as usize;
    let table = FeatureTable::parse(stream.next_bytes(json_length, "feature table")?)?;
    let binary_start = json_start + json_length;

    let point_count = table.points_length as usize;
    let params = QuantizationParams::from_volume(
        table.quantized_volume_offset,
        table.quantized_volume_scale,
    );
    let positions = extract_positions(buffer, binary_start, table.position_quantized, point_count)?;
    let colors = extract_colors(buffer, binary_start, table.rgb, point_count, default_color)?;

    Ok(DecodedPointCloud {
        batch_table: BatchTableInfo::detect(&header, &table),
        ignored_fields: table.ignored_fields(),
        header,
        params,
        point_count,
        positions,
        colors,
    })
}
