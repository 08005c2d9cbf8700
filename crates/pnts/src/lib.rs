//! Assemble render-ready graphics from quantized point cloud tiles.
//!
//! This crate sits between [`pnts_decode`] and a renderer. It decodes a tile,
//! batches the points under the owning model, and applies the Y-up to Z-up
//! correction when the source needs it. Rendering itself is delegated to a
//! [`RenderSystem`] implementation.
//!
//! # Example
//!
//! ```ignore
//! use pnts::{BoundingBox, ModelId, SceneBuilder, TileContext, read_point_cloud};
//!
//! let context = TileContext::new(ModelId(0x20), range).with_y_axis_up(true);
//! if let Some(graphic) = read_point_cloud(&bytes, &context, &SceneBuilder) {
//!     println!("{} points", graphic.point_count());
//! }
//! ```

mod error;

pub mod feature;
pub mod reader;
pub mod render;
pub mod scene;
pub mod types;

pub use error::{Error, Result};
pub use feature::{AttributeTable, BatchFeatures, Feature};
pub use reader::{assemble, read_point_cloud, try_read_point_cloud, y_up_to_z_up};
pub use render::{GraphicBranch, PointCloudArgs, RenderSystem};
pub use scene::{PointCloudNode, SceneBuilder, SceneNode};
pub use types::{BoundingBox, ModelId, TileContext, UnsupportedPolicy};

// Re-export decode types for convenience.
pub use pnts_decode::{DecodeError, DecodeResult, DecodedPointCloud, QuantizationParams};
