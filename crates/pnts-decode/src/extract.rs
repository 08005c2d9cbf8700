//! Sub-buffer extraction.
//!
//! Positions and colors live in the feature table binary body, which starts
//! right after the feature table JSON. The feature table gives each array's
//! offset relative to the start of that body.

use crate::error::{DecodeError, DecodeResult};
use crate::feature_table::BinaryBodyReference;
use crate::view::{Colors, QuantizedPositions};

/// Absolute offset of an array given the start of the binary body.
fn absolute_offset(
    buffer: &[u8],
    binary_start: usize,
    reference: BinaryBodyReference,
    context: &'static str,
) -> DecodeResult<usize> {
    binary_start
        .checked_add(reference.byte_offset)
        .ok_or(DecodeError::TruncatedBuffer {
            context,
            offset: binary_start,
            len: reference.byte_offset,
            available: buffer.len(),
        })
}

/// Extract the quantized position view for `count` points.
pub fn extract_positions(
    buffer: &[u8],
    binary_start: usize,
    reference: BinaryBodyReference,
    count: usize,
) -> DecodeResult<QuantizedPositions<'_>> {
    let offset = absolute_offset(buffer, binary_start, reference, "quantized positions")?;
    QuantizedPositions::new(buffer, offset, count)
}

/// Extract the color view for `count` points, or synthesize `default` colors
/// when the tile has none.
pub fn extract_colors(
    buffer: &[u8],
    binary_start: usize,
    reference: Option<BinaryBodyReference>,
    count: usize,
    default: [u8; 3],
) -> DecodeResult<Colors<'_>> {
    match reference {
        Some(reference) => {
            let offset = absolute_offset(buffer, binary_start, reference, "colors")?;
            Colors::borrowed(buffer, offset, count)
        }
        None => Ok(Colors::uniform(default, count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DEFAULT_COLOR;

    #[test]
    fn test_positions_relative_to_binary_start() {
        let mut buffer = vec![0u8; 10];
        buffer.extend_from_slice(&[0, 0]); // Two bytes of other data.
        for value in [4u16, 5, 6] {
            buffer.extend_from_slice(&value.to_le_bytes());
        }

        let positions =
            extract_positions(&buffer, 10, BinaryBodyReference { byte_offset: 2 }, 1).unwrap();
        assert_eq!(positions.get(0), Some([4, 5, 6]));
    }

    #[test]
    fn test_colors_default_when_absent() {
        let colors = extract_colors(&[], 0, None, 7, DEFAULT_COLOR).unwrap();
        assert_eq!(colors.as_bytes(), vec![0xFF; 21].as_slice());
    }

    #[test]
    fn test_colors_explicit_default() {
        let colors = extract_colors(&[], 0, None, 2, [1, 2, 3]).unwrap();
        assert_eq!(colors.as_bytes(), &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_offset_overflow() {
        let result = extract_positions(
            &[0u8; 16],
            8,
            BinaryBodyReference {
                byte_offset: usize::MAX,
            },
            1,
        );
        assert!(matches!(result, Err(DecodeError::TruncatedBuffer { .. })));
    }

    #[test]
    fn test_colors_past_end() {
        let buffer = [0u8; 12];
        let result = extract_colors(
            &buffer,
            8,
            Some(BinaryBodyReference { byte_offset: 2 }),
            1,
            DEFAULT_COLOR,
        );
        assert!(matches!(
            result,
            Err(DecodeError::TruncatedBuffer {
                context: "colors",
                offset: 10,
                len: 3,
                available: 12,
            })
        ));
    }
}
