//! Error types for the pnts crate.

use std::fmt;

use pnts_decode::DecodeError;

use crate::types::ModelId;

/// Result type for reading point cloud tiles.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a tile into a graphic.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The tile could not be decoded.
    Decode(DecodeError),
    /// The tile declares per-point attributes and the caller's policy rejects
    /// collapsing them into one feature.
    UnsupportedTable {
        /// Model the tile belongs to.
        model_id: ModelId,
        /// What the tile declared.
        source: DecodeError,
    },
}

impl Error {
    /// Whether the tile is simply of another format.
    #[must_use]
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Error::Decode(e) if e.is_format_mismatch())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "decode error: {e}"),
            Error::UnsupportedTable { model_id, source } => {
                write!(f, "tile of model {model_id} rejected: {source}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) | Error::UnsupportedTable { source: e, .. } => Some(e),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_decode_error_is_source() {
        let err = Error::from(DecodeError::FormatMismatch { found: *b"i3dm" });
        assert!(err.is_format_mismatch());
        assert!(err.to_string().starts_with("decode error: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unsupported_table_display() {
        let err = Error::UnsupportedTable {
            model_id: ModelId(0x2a),
            source: DecodeError::UnsupportedFeature {
                feature: "BATCH_ID".to_string(),
            },
        };
        assert!(!err.is_format_mismatch());
        let text = err.to_string();
        assert!(text.contains("0x2a"), "{text}");
        assert!(text.contains("BATCH_ID"), "{text}");
        assert!(err.source().is_some());
    }
}
