//! Types describing the context a tile is read in.

use std::fmt;

use glam::DVec3;
use pnts_decode::QuantizationParams;

/// Identity of the model that owns a tile; used as its single feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub u64);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// An axis-aligned box in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub low: DVec3,
    pub high: DVec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(low: DVec3, high: DVec3) -> Self {
        Self { low, high }
    }

    /// The box covered by the full quantization range of a tile.
    #[must_use]
    pub fn from_quantization(params: &QuantizationParams) -> Self {
        let (low, high) = params.range();
        Self { low, high }
    }
}

/// What to do with a tile that declares a per-point batch table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Skip the tile and report [`crate::Error::UnsupportedTable`].
    #[default]
    Reject,
    /// Render the tile as a single feature, logging what was ignored.
    SingleFeature,
}

/// Per-call parameters for reading a tile.
#[derive(Debug, Clone)]
pub struct TileContext {
    /// Owning model, used as the single feature of the batch.
    pub model_id: ModelId,
    /// Bounding volume handed to the batch.
    pub range: BoundingBox,
    /// Whether the source data has Y up rather than Z up.
    pub y_axis_up: bool,
    /// Handling of tiles with per-point batch tables.
    pub unsupported: UnsupportedPolicy,
}

impl TileContext {
    /// Create a context for a Z-up tile that rejects batch tables.
    #[must_use]
    pub fn new(model_id: ModelId, range: BoundingBox) -> Self {
        Self {
            model_id,
            range,
            y_axis_up: false,
            unsupported: UnsupportedPolicy::Reject,
        }
    }

    #[must_use]
    pub fn with_y_axis_up(mut self, y_axis_up: bool) -> Self {
        self.y_axis_up = y_axis_up;
        self
    }

    #[must_use]
    pub fn with_unsupported_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }
}
