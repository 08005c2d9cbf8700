//! Zero-copy views into the tile buffer.
//!
//! Arrays in the binary body are not guaranteed to be aligned for their
//! element type, so views keep the raw bytes and decode little-endian
//! components on access instead of reinterpreting the slice.

use std::borrow::Cow;

use crate::error::DecodeResult;
use crate::stream::checked_span;

/// Opaque white, used when a tile carries no per-point colors.
pub const DEFAULT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Quantized positions: `count` little-endian `u16` triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedPositions<'a> {
    bytes: &'a [u8],
}

impl<'a> QuantizedPositions<'a> {
    /// Bytes per point: three `u16` components.
    pub const STRIDE: usize = 6;

    /// View `count` points starting at `offset`, failing if the span does not
    /// fit in `buffer`.
    pub fn new(buffer: &'a [u8], offset: usize, count: usize) -> DecodeResult<Self> {
        let len = count.saturating_mul(Self::STRIDE);
        let bytes = checked_span(buffer, offset, len, "quantized positions")?;
        Ok(Self { bytes })
    }

    /// Number of points in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / Self::STRIDE
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw little-endian bytes backing the view.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The quantized triple of point `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<[u16; 3]> {
        let start = index.checked_mul(Self::STRIDE)?;
        let chunk = self.bytes.get(start..start.checked_add(Self::STRIDE)?)?;
        Some(read_triple(chunk))
    }

    /// Iterate over all quantized triples in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = [u16; 3]> + use<'a> {
        self.bytes.chunks_exact(Self::STRIDE).map(read_triple)
    }
}

fn read_triple(chunk: &[u8]) -> [u16; 3] {
    [
        u16::from_le_bytes([chunk[0], chunk[1]]),
        u16::from_le_bytes([chunk[2], chunk[3]]),
        u16::from_le_bytes([chunk[4], chunk[5]]),
    ]
}

/// Per-point RGB colors, either borrowed from the tile or synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> Colors<'a> {
    /// Bytes per point.
    pub const STRIDE: usize = 3;

    /// View `count` colors starting at `offset`, failing if the span does not
    /// fit in `buffer`.
    pub fn borrowed(buffer: &'a [u8], offset: usize, count: usize) -> DecodeResult<Self> {
        let len = count.saturating_mul(Self::STRIDE);
        let bytes = checked_span(buffer, offset, len, "colors")?;
        Ok(Self {
            bytes: Cow::Borrowed(bytes),
        })
    }

    /// Allocate `count` colors all set to `color`.
    #[must_use]
    pub fn uniform(color: [u8; 3], count: usize) -> Self {
        Self {
            bytes: Cow::Owned(color.repeat(count)),
        }
    }

    /// Whether the colors come from the tile rather than a default.
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.bytes, Cow::Borrowed(_))
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len() / Self::STRIDE
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The packed RGB bytes, three per point.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The color of point `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        let start = index.checked_mul(Self::STRIDE)?;
        let chunk = self.bytes.get(start..start.checked_add(Self::STRIDE)?)?;
        Some([chunk[0], chunk[1], chunk[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn test_positions_unaligned_offset() {
        // One padding byte so the u16 data starts on an odd address.
        let mut buffer = vec![0xAA];
        for value in [1u16, 2, 3, 0xFFFF, 0x0100, 7] {
            buffer.extend_from_slice(&value.to_le_bytes());
        }

        let positions = QuantizedPositions::new(&buffer, 1, 2).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions.get(0), Some([1, 2, 3]));
        assert_eq!(positions.get(1), Some([0xFFFF, 0x0100, 7]));
        assert_eq!(positions.get(2), None);
        assert_eq!(
            positions.iter().collect::<Vec<_>>(),
            vec![[1, 2, 3], [0xFFFF, 0x0100, 7]]
        );
    }

    #[test]
    fn test_positions_one_byte_short() {
        let buffer = vec![0u8; 2 * QuantizedPositions::STRIDE - 1];
        let result = QuantizedPositions::new(&buffer, 0, 2);
        assert!(matches!(
            result,
            Err(DecodeError::TruncatedBuffer {
                context: "quantized positions",
                len: 12,
                available: 11,
                ..
            })
        ));
    }

    #[test]
    fn test_positions_view_is_zero_copy() {
        let buffer = [0u8; 12];
        let positions = QuantizedPositions::new(&buffer, 6, 1).unwrap();
        assert!(std::ptr::eq(positions.as_bytes().as_ptr(), buffer[6..].as_ptr()));
    }

    #[test]
    fn test_colors_borrowed() {
        let buffer = [9, 10, 20, 30, 40, 50, 60];
        let colors = Colors::borrowed(&buffer, 1, 2).unwrap();
        assert!(colors.is_borrowed());
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get(1), Some([40, 50, 60]));
    }

    #[test]
    fn test_colors_uniform_default() {
        let colors = Colors::uniform(DEFAULT_COLOR, 5);
        assert!(!colors.is_borrowed());
        assert_eq!(colors.as_bytes().len(), 15);
        assert!(colors.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_colors_out_of_bounds() {
        let buffer = [0u8; 5];
        assert!(matches!(
            Colors::borrowed(&buffer, 3, 1),
            Err(DecodeError::TruncatedBuffer {
                context: "colors",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_views() {
        let positions = QuantizedPositions::new(&[], 0, 0).unwrap();
        assert!(positions.is_empty());
        assert!(Colors::uniform(DEFAULT_COLOR, 0).is_empty());
    }
}
