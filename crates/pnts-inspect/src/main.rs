//! Inspect a quantized point cloud tile.
//!
//! Decodes the tile, assembles it against the in-memory scene backend, and
//! prints what was found. Set `RUST_LOG=debug` to see why a tile is skipped.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pnts::{
    BoundingBox, ModelId, SceneBuilder, TileContext, UnsupportedPolicy, read_point_cloud,
};
use pnts_decode::{DecodedPointCloud, decode_point_cloud};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "Inspect a quantized point cloud (pnts) tile")]
struct Args {
    /// Path to the tile file.
    path: PathBuf,

    /// Identity of the owning model, decimal or 0x-prefixed hex.
    #[arg(long, default_value = "0x1", value_parser = parse_model_id)]
    model_id: ModelId,

    /// Treat the source data as Y-up and apply the Z-up correction.
    #[arg(long)]
    y_up: bool,

    /// Render tiles with a batch table as a single feature instead of skipping them.
    #[arg(long)]
    allow_batch_table: bool,

    /// Number of points to print.
    #[arg(long, default_value_t = 5)]
    points: usize,
}

fn parse_model_id(s: &str) -> Result<ModelId, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed
        .map(ModelId)
        .map_err(|e| format!("invalid model id {s:?}: {e}"))
}

fn print_summary(decoded: &DecodedPointCloud<'_>, limit: usize) {
    let header = &decoded.header;
    println!("format:            {}", header.tile_format());
    println!("version:           {}", header.version);
    println!("declared length:   {}", header.length);
    println!(
        "feature table:     {} JSON bytes, {} binary bytes",
        header.feature_table_json_length, header.feature_table_binary_length
    );
    println!(
        "batch table:       {} JSON bytes, {} binary bytes",
        header.batch_table_json_length, header.batch_table_binary_length
    );
    println!("points:            {}", decoded.point_count);
    println!("origin:            {}", decoded.params.origin);
    println!("step scale:        {}", decoded.params.scale);
    println!(
        "colors:            {}",
        if decoded.colors.is_borrowed() {
            "per point"
        } else {
            "default"
        }
    );
    if let Some(info) = &decoded.batch_table {
        println!("unsupported:       {}", info.describe());
    }
    if !decoded.ignored_fields.is_empty() {
        println!("ignored fields:    {}", decoded.ignored_fields.join(", "));
    }

    for (index, coordinate) in decoded.coordinates().take(limit).enumerate() {
        let [r, g, b] = decoded.color(index).unwrap_or_default();
        println!("  [{index}] {coordinate} rgb({r}, {g}, {b})");
    }
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let buffer = match std::fs::read(&args.path) {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", args.path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(path = %args.path.display(), bytes = buffer.len(), "read tile");

    let decoded = match decode_point_cloud(&buffer) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::error!("Failed to decode {}: {}", args.path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    print_summary(&decoded, args.points);

    let policy = if args.allow_batch_table {
        UnsupportedPolicy::SingleFeature
    } else {
        UnsupportedPolicy::Reject
    };
    let context = TileContext::new(args.model_id, BoundingBox::from_quantization(&decoded.params))
        .with_y_axis_up(args.y_up)
        .with_unsupported_policy(policy);

    let Some(graphic) = read_point_cloud(&buffer, &context, &SceneBuilder) else {
        tracing::warn!("Tile decoded but could not be assembled");
        return ExitCode::FAILURE;
    };

    println!(
        "graphic:           {} points, {} branch transform(s)",
        graphic.point_count(),
        graphic.branch_depth()
    );
    if args.y_up {
        for (index, coordinate) in graphic
            .world_coordinates()
            .into_iter()
            .take(args.points)
            .enumerate()
        {
            println!("  [{index}] z-up {coordinate}");
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_id() {
        assert_eq!(parse_model_id("0x20"), Ok(ModelId(0x20)));
        assert_eq!(parse_model_id("0X1f"), Ok(ModelId(0x1f)));
        assert_eq!(parse_model_id("42"), Ok(ModelId(42)));
        assert!(parse_model_id("0xZZ").is_err());
        assert!(parse_model_id("-1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "pnts-inspect",
            "tile.pnts",
            "--y-up",
            "--model-id",
            "0x10",
            "--points",
            "2",
        ])
        .unwrap();
        assert!(args.y_up);
        assert!(!args.allow_batch_table);
        assert_eq!(args.model_id, ModelId(0x10));
        assert_eq!(args.points, 2);
    }
}
