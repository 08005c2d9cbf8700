//! Error types for decoding operations.

use std::fmt;

use crate::header::TileFormat;

/// Errors that can occur while decoding a point cloud tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The header tag does not identify a point cloud tile.
    FormatMismatch { found: [u8; 4] },
    /// The feature table is not valid UTF-8 or JSON, or a required key is
    /// missing or has the wrong shape.
    MalformedMetadata {
        context: &'static str,
        detail: String,
    },
    /// A span computed from the header or feature table runs past the end of
    /// the buffer.
    TruncatedBuffer {
        context: &'static str,
        offset: usize,
        len: usize,
        available: usize,
    },
    /// The tile carries a per-point attribute table this decoder cannot honour.
    UnsupportedFeature { feature: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormatMismatch { found } => {
                write!(
                    f,
                    "not a point cloud tile: found {:?} ({})",
                    String::from_utf8_lossy(found),
                    TileFormat::from_magic(*found)
                )
            }
            Self::MalformedMetadata { context, detail } => {
                write!(f, "malformed {context}: {detail}")
            }
            Self::TruncatedBuffer {
                context,
                offset,
                len,
                available,
            } => {
                write!(
                    f,
                    "truncated {context}: {len} bytes at offset {offset} exceed buffer of {available} bytes"
                )
            }
            Self::UnsupportedFeature { feature } => {
                write!(f, "unsupported tile feature: {feature}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    /// Whether this error is the normal "not my format" outcome rather than a
    /// damaged tile.
    #[must_use]
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::FormatMismatch { .. })
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
