//! An in-memory scene graph backend.
//!
//! [`SceneBuilder`] implements [`RenderSystem`] by recording what it is asked
//! to build. It is the backend used by the inspection tool and by tests, and
//! a reference for how a real renderer is driven.

use glam::{DMat4, DVec3};
use pnts_decode::QuantizationParams;

use crate::feature::BatchFeatures;
use crate::render::{GraphicBranch, PointCloudArgs, RenderSystem};
use crate::types::BoundingBox;

/// Point data uploaded to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudNode {
    pub params: QuantizationParams,
    pub quantized: Vec<[u16; 3]>,
    /// Packed RGB, three bytes per point.
    pub colors: Vec<u8>,
}

impl PointCloudNode {
    /// Dequantized point coordinates in the node's local frame.
    pub fn coordinates(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.quantized.iter().map(|q| self.params.dequantize(*q))
    }
}

/// A node of the recorded scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    PointCloud(PointCloudNode),
    Batch {
        features: BatchFeatures,
        range: BoundingBox,
        child: Box<SceneNode>,
    },
    Branch {
        transform: DMat4,
        children: Vec<SceneNode>,
    },
}

impl SceneNode {
    /// Total number of points beneath this node.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match self {
            Self::PointCloud(node) => node.quantized.len(),
            Self::Batch { child, .. } => child.point_count(),
            Self::Branch { children, .. } => children.iter().map(Self::point_count).sum(),
        }
    }

    /// Number of branch transforms between this node and the first point
    /// cloud beneath it.
    #[must_use]
    pub fn branch_depth(&self) -> usize {
        match self {
            Self::PointCloud(_) => 0,
            Self::Batch { child, .. } => child.branch_depth(),
            Self::Branch { children, .. } => {
                1 + children.first().map_or(0, Self::branch_depth)
            }
        }
    }

    /// Every point beneath this node with all branch transforms applied.
    #[must_use]
    pub fn world_coordinates(&self) -> Vec<DVec3> {
        let mut out = Vec::with_capacity(self.point_count());
        self.collect_world(DMat4::IDENTITY, &mut out);
        out
    }

    fn collect_world(&self, transform: DMat4, out: &mut Vec<DVec3>) {
        match self {
            Self::PointCloud(node) => {
                out.extend(node.coordinates().map(|p| transform.transform_point3(p)));
            }
            Self::Batch { child, .. } => child.collect_world(transform, out),
            Self::Branch {
                transform: local,
                children,
            } => {
                let combined = transform * *local;
                for child in children {
                    child.collect_world(combined, out);
                }
            }
        }
    }
}

/// Records graphics as [`SceneNode`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneBuilder;

impl SceneBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderSystem for SceneBuilder {
    type Graphic = SceneNode;

    fn create_point_cloud(&self, args: PointCloudArgs<'_>) -> SceneNode {
        SceneNode::PointCloud(PointCloudNode {
            params: args.params,
            quantized: args.positions.iter().collect(),
            colors: args.colors.to_vec(),
        })
    }

    fn create_batch(
        &self,
        graphic: SceneNode,
        features: BatchFeatures,
        range: &BoundingBox,
    ) -> SceneNode {
        SceneNode::Batch {
            features,
            range: *range,
            child: Box::new(graphic),
        }
    }

    fn create_branch(&self, branch: GraphicBranch<SceneNode>, transform: DMat4) -> SceneNode {
        SceneNode::Branch {
            transform,
            children: branch.entries,
        }
    }
}
