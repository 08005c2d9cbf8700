//! The rendering boundary.
//!
//! The reader never builds drawable objects itself; it hands decoded arrays
//! to a [`RenderSystem`] and composes what comes back.

use glam::DMat4;
use pnts_decode::{QuantizationParams, QuantizedPositions};

use crate::feature::BatchFeatures;
use crate::types::BoundingBox;

/// Everything a backend needs to build a point cloud graphic.
#[derive(Debug, Clone, Copy)]
pub struct PointCloudArgs<'a> {
    pub positions: QuantizedPositions<'a>,
    pub params: QuantizationParams,
    /// Packed RGB, three bytes per point.
    pub colors: &'a [u8],
}

/// A group of graphics sharing one transform.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicBranch<G> {
    pub entries: Vec<G>,
}

impl<G> GraphicBranch<G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, graphic: G) {
        self.entries.push(graphic);
    }
}

impl<G> Default for GraphicBranch<G> {
    fn default() -> Self {
        Self::new()
    }
}

/// A backend that turns decoded geometry into drawable objects.
pub trait RenderSystem {
    /// The backend's drawable object.
    type Graphic;

    /// Create a point cloud graphic from quantized positions and colors.
    fn create_point_cloud(&self, args: PointCloudArgs<'_>) -> Self::Graphic;

    /// Associate a graphic with a set of features within `range`.
    fn create_batch(
        &self,
        graphic: Self::Graphic,
        features: BatchFeatures,
        range: &BoundingBox,
    ) -> Self::Graphic;

    /// Group graphics under a single transform.
    fn create_branch(
        &self,
        branch: GraphicBranch<Self::Graphic>,
        transform: DMat4,
    ) -> Self::Graphic;
}
