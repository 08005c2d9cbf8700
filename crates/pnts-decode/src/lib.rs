//! Decode quantized point cloud (`pnts`) tiles.
//!
//! This crate provides pure synchronous decoding of point cloud tiles into
//! views over the caller's buffer. Nothing here allocates per point except a
//! default color array for tiles that carry no colors.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Zero-copy**: Position and color arrays borrow the input buffer
//! - **Bounds-checked**: Every offset taken from the tile is checked before use
//!
//! # Key functions
//!
//! - [`decode_point_cloud`]: Decode a whole tile
//! - [`TileHeader::read`]: Read the fixed 28-byte header
//! - [`FeatureTable::parse`]: Parse the feature table JSON
//! - [`compute_scale`]: Convert a quantized volume span into a step size

mod error;
mod stream;

pub mod extract;
pub mod feature_table;
pub mod header;
pub mod quantization;
pub mod tile;
pub mod view;

pub use error::{DecodeError, DecodeResult};
pub use extract::{extract_colors, extract_positions};
pub use feature_table::{BinaryBodyReference, FeatureTable};
pub use header::{HEADER_LEN, PNTS_MAGIC, TileFormat, TileHeader};
pub use quantization::{QUANTIZATION_RANGE, QuantizationParams, compute_scale};
pub use stream::TileStream;
pub use tile::{
    BatchTableInfo, DecodedPointCloud, decode_point_cloud, decode_point_cloud_with_default_color,
};
pub use view::{Colors, DEFAULT_COLOR, QuantizedPositions};
