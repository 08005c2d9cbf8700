//! Sequential little-endian reads over a tile buffer.

use crate::error::{DecodeError, DecodeResult};

/// A forward-only cursor over a borrowed byte buffer.
///
/// Every read is bounds-checked; a read that would run past the end of the
/// buffer fails with [`DecodeError::TruncatedBuffer`] and leaves the cursor
/// where it was.
#[derive(Debug, Clone)]
pub struct TileStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TileStream<'a> {
    /// Create a cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read `len` bytes and advance past them.
    pub fn next_bytes(&mut self, len: usize, context: &'static str) -> DecodeResult<&'a [u8]> {
        let bytes = checked_span(self.data, self.pos, len, context)?;
        self.pos += len;
        Ok(bytes)
    }

    /// Read a fixed-size byte array.
    pub fn next_array<const N: usize>(&mut self, context: &'static str) -> DecodeResult<[u8; N]> {
        let bytes = self.next_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a little-endian `u32`.
    pub fn next_u32(&mut self, context: &'static str) -> DecodeResult<u32> {
        self.next_array::<4>(context).map(u32::from_le_bytes)
    }
}

/// Borrow `len` bytes starting at `offset`, or report how far the span
/// overshoots the buffer.
pub(crate) fn checked_span<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    context: &'static str,
) -> DecodeResult<&'a [u8]> {
    let truncated = || DecodeError::TruncatedBuffer {
        context,
        offset,
        len,
        available: data.len(),
    };

    let end = offset.checked_add(len).ok_or_else(truncated)?;
    data.get(offset..end).ok_or_else(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u32_little_endian() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x78, 0x56, 0x34, 0x12];
        let mut stream = TileStream::new(&data);

        assert_eq!(stream.next_u32("a").unwrap(), 1);
        assert_eq!(stream.position(), 4);
        assert_eq!(stream.next_u32("b").unwrap(), 0x1234_5678);
        assert_eq!(stream.position(), data.len());
    }

    #[test]
    fn test_next_bytes_past_end_does_not_advance() {
        let data = [1, 2, 3];
        let mut stream = TileStream::new(&data);
        stream.next_bytes(1, "first").unwrap();

        let err = stream.next_bytes(3, "second").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedBuffer {
                context: "second",
                offset: 1,
                len: 3,
                available: 3,
            }
        );
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_checked_span_overflow() {
        let data = [0u8; 8];
        let result = checked_span(&data, usize::MAX, 2, "overflow");
        assert!(matches!(result, Err(DecodeError::TruncatedBuffer { .. })));
    }

    #[test]
    fn test_checked_span_exact_fit() {
        let data = [0u8, 1, 2, 3];
        assert_eq!(checked_span(&data, 1, 3, "fit").unwrap(), &[1, 2, 3]);
        assert_eq!(checked_span(&data, 4, 0, "empty").unwrap(), &[] as &[u8]);
    }
}
