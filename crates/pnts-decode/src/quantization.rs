//! Position dequantization.

use glam::DVec3;

/// Largest value of a 16-bit quantized component.
pub const QUANTIZATION_RANGE: f64 = 65535.0;

/// Convert the span of a quantized volume axis into the distance covered by
/// one quantization step.
///
/// This is the inverse of the encoder's law
/// `q = round((v - origin) / compute_scale(span))`. A span of zero gives a
/// scale of zero, which places every point on that axis at the origin.
#[must_use]
pub fn compute_scale(span: f64) -> f64 {
    span / QUANTIZATION_RANGE
}

/// Origin and per-step scale recovering coordinates from 16-bit triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationParams {
    pub origin: DVec3,
    pub scale: DVec3,
}

impl QuantizationParams {
    /// Build parameters from origin and per-step scale directly.
    #[must_use]
    pub fn from_origin_and_scale(origin: DVec3, scale: DVec3) -> Self {
        Self { origin, scale }
    }

    /// Build parameters from the quantized volume offset and span stored in a
    /// feature table.
    #[must_use]
    pub fn from_volume(offset: [f64; 3], span: [f64; 3]) -> Self {
        Self::from_origin_and_scale(
            DVec3::from_array(offset),
            DVec3::from_array(span.map(compute_scale)),
        )
    }

    /// Recover the coordinate of a quantized point.
    #[must_use]
    pub fn dequantize(&self, quantized: [u16; 3]) -> DVec3 {
        let q = DVec3::new(
            f64::from(quantized[0]),
            f64::from(quantized[1]),
            f64::from(quantized[2]),
        );
        self.origin + self.scale * q
    }

    /// The volume covered by the full 16-bit range, as `(low, high)`.
    #[must_use]
    pub fn range(&self) -> (DVec3, DVec3) {
        let far = self.origin + self.scale * QUANTIZATION_RANGE;
        (self.origin.min(far), self.origin.max(far))
    }
}
