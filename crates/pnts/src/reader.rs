//! Reading point cloud tiles into graphics.

use glam::DMat4;
use pnts_decode::{DecodedPointCloud, decode_point_cloud};

use crate::error::{Error, Result};
use crate::feature::AttributeTable;
use crate::render::{GraphicBranch, PointCloudArgs, RenderSystem};
use crate::types::{TileContext, UnsupportedPolicy};

/// Rotation taking Y-up source data into the Z-up frame: 90 degrees about +X.
#[must_use]
pub fn y_up_to_z_up() -> DMat4 {
    DMat4::from_rotation_x(std::f64::consts::FRAC_PI_2)
}

/// Read a point cloud tile, returning `None` if it cannot be decoded.
///
/// Failures are logged and never propagate: a tile of another format is
/// logged at debug level, a damaged or unsupported tile as a warning. Callers
/// treat `None` as "skip this tile".
pub fn read_point_cloud<R: RenderSystem>(
    buffer: &[u8],
    context: &TileContext,
    system: &R,
) -> Option<R::Graphic> {
    match try_read_point_cloud(buffer, context, system) {
        Ok(graphic) => Some(graphic),
        Err(e) if e.is_format_mismatch() => {
            tracing::debug!(model = %context.model_id, error = %e, "skipping tile");
            None
        }
        Err(e) => {
            tracing::warn!(model = %context.model_id, error = %e, "failed to read point cloud tile");
            None
        }
    }
}

/// Read a point cloud tile, reporting why it could not be decoded.
///
/// # Errors
///
/// - [`Error::Decode`] if the tile is of another format or is damaged.
/// - [`Error::UnsupportedTable`] if the tile declares per-point attributes
///   and the context's policy is [`UnsupportedPolicy::Reject`].
pub fn try_read_point_cloud<R: RenderSystem>(
    buffer: &[u8],
    context: &TileContext,
    system: &R,
) -> Result<R::Graphic> {
    let decoded = decode_point_cloud(buffer)?;

    if !decoded.ignored_fields.is_empty() {
        tracing::debug!(
            model = %context.model_id,
            fields = ?decoded.ignored_fields,
            "ignoring optional feature table fields"
        );
    }

    let graphic = assemble(&decoded, context, system)?;
    tracing::debug!(
        model = %context.model_id,
        points = decoded.point_count,
        y_axis_up = context.y_axis_up,
        "read point cloud tile"
    );
    Ok(graphic)
}

/// Build the graphic for an already decoded tile.
///
/// The point cloud is batched under the owning model as its only feature.
/// Y-up tiles are wrapped in one branch carrying [`y_up_to_z_up`].
pub fn assemble<R: RenderSystem>(
    decoded: &DecodedPointCloud<'_>,
    context: &TileContext,
    system: &R,
) -> Result<R::Graphic> {
    let attributes = match AttributeTable::classify(decoded, context.model_id) {
        AttributeTable::Table(info) if context.unsupported == UnsupportedPolicy::SingleFeature => {
            tracing::warn!(
                model = %context.model_id,
                ignored = %info.describe(),
                "rendering batched point cloud as a single feature"
            );
            AttributeTable::SingleFeature(context.model_id)
        }
        other => other,
    };
    let features = attributes
        .to_batch_features(context.model_id)
        .map_err(|source| Error::UnsupportedTable {
            model_id: context.model_id,
            source,
        })?;

    let graphic = system.create_point_cloud(PointCloudArgs {
        positions: decoded.positions,
        params: decoded.params,
        colors: decoded.colors.as_bytes(),
    });
    let graphic = system.create_batch(graphic, features, &context.range);

    if !context.y_axis_up {
        return Ok(graphic);
    }

    let mut branch = GraphicBranch::new();
    branch.add(graphic);
    Ok(system.create_branch(branch, y_up_to_z_up()))
}
