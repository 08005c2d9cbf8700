//! Tile header reading.

use std::fmt;

use crate::error::DecodeResult;
use crate::stream::TileStream;

/// Size of the fixed point cloud tile header in bytes.
pub const HEADER_LEN: usize = 28;

/// Magic tag of a point cloud tile.
pub const PNTS_MAGIC: [u8; 4] = *b"pnts";

/// Tile formats recognised by their 4-byte magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFormat {
    /// Quantized point cloud.
    Pnts,
    /// Batched 3D model.
    B3dm,
    /// Instanced 3D model.
    I3dm,
    /// Composite of other tiles.
    Cmpt,
    /// Binary glTF.
    Gltf,
    /// Native iModel tile.
    IModel,
    /// Anything else.
    Unknown,
}

impl TileFormat {
    /// Identify a tile format from its leading magic bytes.
    #[must_use]
    pub fn from_magic(magic: [u8; 4]) -> Self {
        match &magic {
            b"pnts" => Self::Pnts,
            b"b3dm" => Self::B3dm,
            b"i3dm" => Self::I3dm,
            b"cmpt" => Self::Cmpt,
            b"glTF" => Self::Gltf,
            b"iMdl" => Self::IModel,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pnts => "point cloud",
            Self::B3dm => "batched model",
            Self::I3dm => "instanced model",
            Self::Cmpt => "composite",
            Self::Gltf => "glTF",
            Self::IModel => "iModel",
            Self::Unknown => "unknown format",
        };
        f.write_str(name)
    }
}

/// The fixed 28-byte header at the front of a point cloud tile.
///
/// # Format
///
/// All integers are little-endian `u32`:
///
/// | offset | field                       |
/// |--------|-----------------------------|
/// | 0      | magic (4 bytes)             |
/// | 4      | version                     |
/// | 8      | total byte length           |
/// | 12     | feature table JSON length   |
/// | 16     | feature table binary length |
/// | 20     | batch table JSON length     |
/// | 24     | batch table binary length   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHeader {
    pub format: [u8; 4],
    pub version: u32,
    pub length: u32,
    pub feature_table_json_length: u32,
    pub feature_table_binary_length: u32,
    pub batch_table_json_length: u32,
    pub batch_table_binary_length: u32,
}

impl TileHeader {
    /// Read a header from the cursor, advancing it by [`HEADER_LEN`] bytes.
    ///
    /// No cross-field validation is done here; see [`TileHeader::is_valid`].
    pub fn read(stream: &mut TileStream<'_>) -> DecodeResult<Self> {
        // Take the whole header up front so a short buffer fails as one span.
        let bytes = stream.next_bytes(HEADER_LEN, "tile header")?;
        let word = |i: usize| {
            u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
        };

        Ok(Self {
            format: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: word(4),
            length: word(8),
            feature_table_json_length: word(12),
            feature_table_binary_length: word(16),
            batch_table_json_length: word(20),
            batch_table_binary_length: word(24),
        })
    }

    /// Whether the magic identifies a point cloud tile.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.format == PNTS_MAGIC
    }

    /// The format named by the magic.
    #[must_use]
    pub fn tile_format(&self) -> TileFormat {
        TileFormat::from_magic(self.format)
    }

    /// Whether the tile declares a batch table of either kind.
    #[must_use]
    pub fn has_batch_table(&self) -> bool {
        self.batch_table_json_length > 0 || self.batch_table_binary_length > 0
    }

    /// Serialize the header back to its 28-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.format);
        let words = [
            self.version,
            self.length,
            self.feature_table_json_length,
            self.feature_table_binary_length,
            self.batch_table_json_length,
            self.batch_table_binary_length,
        ];
        for (chunk, word) in out[4..].chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use proptest::prelude::*;

    fn sample_header() -> TileHeader {
        TileHeader {
            format: PNTS_MAGIC,
            version: 1,
            length: 1234,
            feature_table_json_length: 96,
            feature_table_binary_length: 600,
            batch_table_json_length: 0,
            batch_table_binary_length: 0,
        }
    }

    #[test]
    fn test_read_header_fields_in_order() {
        let mut data = Vec::new();
        data.extend_from_slice(b"pnts");
        for word in [1u32, 2, 3, 4, 5, 6] {
            data.extend_from_slice(&word.to_le_bytes());
        }
        data.extend_from_slice(b"trailing");

        let mut stream = TileStream::new(&data);
        let header = TileHeader::read(&mut stream).unwrap();

        assert_eq!(stream.position(), HEADER_LEN);
        assert!(header.is_valid());
        assert_eq!(header.version, 1);
        assert_eq!(header.length, 2);
        assert_eq!(header.feature_table_json_length, 3);
        assert_eq!(header.feature_table_binary_length, 4);
        assert_eq!(header.batch_table_json_length, 5);
        assert_eq!(header.batch_table_binary_length, 6);
        assert!(header.has_batch_table());
    }

    #[test]
    fn test_header_does_not_check_total_length() {
        // Total length far larger than the buffer is still accepted here.
        let header = TileHeader {
            length: u32::MAX,
            ..sample_header()
        };
        let bytes = header.to_bytes();
        let parsed = TileHeader::read(&mut TileStream::new(&bytes)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_invalid_magic() {
        let header = TileHeader {
            format: *b"b3dm",
            ..sample_header()
        };
        assert!(!header.is_valid());
        assert_eq!(header.tile_format(), TileFormat::B3dm);
    }

    #[test]
    fn test_short_buffer() {
        let bytes = sample_header().to_bytes();
        let result = TileHeader::read(&mut TileStream::new(&bytes[..HEADER_LEN - 1]));
        assert!(matches!(
            result,
            Err(DecodeError::TruncatedBuffer {
                context: "tile header",
                ..
            })
        ));
    }

    #[test]
    fn test_tile_format_from_magic() {
        assert_eq!(TileFormat::from_magic(*b"pnts"), TileFormat::Pnts);
        assert_eq!(TileFormat::from_magic(*b"i3dm"), TileFormat::I3dm);
        assert_eq!(TileFormat::from_magic(*b"cmpt"), TileFormat::Cmpt);
        assert_eq!(TileFormat::from_magic(*b"glTF"), TileFormat::Gltf);
        assert_eq!(TileFormat::from_magic(*b"iMdl"), TileFormat::IModel);
        assert_eq!(TileFormat::from_magic(*b"PNTS"), TileFormat::Unknown);
    }

    proptest! {
        #[test]
        fn test_header_round_trip(
            format in any::<[u8; 4]>(),
            words in any::<[u32; 6]>(),
        ) {
            let header = TileHeader {
                format,
                version: words[0],
                length: words[1],
                feature_table_json_length: words[2],
                feature_table_binary_length: words[3],
                batch_table_json_length: words[4],
                batch_table_binary_length: words[5],
            };
            let bytes = header.to_bytes();
            let mut stream = TileStream::new(&bytes);
            let parsed = TileHeader::read(&mut stream).unwrap();

            prop_assert_eq!(parsed, header);
            prop_assert_eq!(parsed.to_bytes(), bytes);
            prop_assert_eq!(stream.position(), HEADER_LEN);
        }
    }
}
