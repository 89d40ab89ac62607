//! Example: heatmap of a synthetic cone-shaped TIN.
//!
//! Builds a fan-triangulated cone around the origin, samples it on a regular
//! grid and writes the point records, the PNG heatmap and a JSON summary into
//! the output directory. The cone footprint is a polygon, so the corners of
//! its bounding box have no elevation and stay black.
//!
//! Run from the workspace root:
//!   cargo run -p tin-heatmap --example synthetic_cone -- --help
//!   cargo run -p tin-heatmap --example synthetic_cone -- --interval 0.5

use std::f64::consts::TAU;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tin_heatmap::{
    ArtifactNames, HeatmapConfig, Point3d, RunMeta, TinSurface, build_heatmap, save_heatmap_png,
    timestamp_now, write_json, write_points_csv,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Render a heatmap of a synthetic cone surface")]
struct Args {
    /// Grid interval in surface units
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Cone base radius
    #[arg(long, default_value_t = 100.0)]
    radius: f64,

    /// Cone height above the base
    #[arg(long, default_value_t = 25.0)]
    peak: f64,

    /// Number of rim vertices
    #[arg(long, default_value_t = 48)]
    segments: usize,

    /// Output directory (created if missing)
    #[arg(long, default_value = "out")]
    out: String,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Apex at the origin, rim on a circle, one triangle per rim segment.
fn cone(radius: f64, peak: f64, segments: usize) -> Result<TinSurface> {
    let mut vertices = vec![Point3d::new(0.0, 0.0, peak)];
    for k in 0..segments {
        let a = TAU * k as f64 / segments as f64;
        vertices.push(Point3d::new(radius * a.cos(), radius * a.sin(), 0.0));
    }
    let triangles = (0..segments)
        .map(|k| [0, 1 + k, 1 + (k + 1) % segments])
        .collect();
    TinSurface::new("cone", vertices, triangles).context("building cone surface")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.segments < 3 {
        bail!("segments must be >= 3, got {}", args.segments);
    }

    let surface = cone(args.radius, args.peak, args.segments)?;
    let bounds = surface.bounds();
    println!(
        "cone: {} vertices, {} triangles, bounds ({:.1}, {:.1})..({:.1}, {:.1})",
        surface.num_vertices(),
        surface.num_triangles(),
        bounds.min.x,
        bounds.min.y,
        bounds.max.x,
        bounds.max.y
    );

    let t0 = Instant::now();
    let heatmap = build_heatmap(bounds, args.interval, &surface, &HeatmapConfig::default())
        .context("building heatmap")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    println!(
        "sampled {}/{} points into {}x{} ({elapsed_ms:.2} ms)",
        heatmap.samples.len(),
        heatmap.samples.queried(),
        heatmap.image.width(),
        heatmap.image.height()
    );

    let out_dir = std::path::Path::new(&args.out);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let names = ArtifactNames::new(out_dir, surface.name(), &timestamp_now());

    write_points_csv(&names.points_csv, heatmap.samples.samples())?;
    save_heatmap_png(&names.heatmap_png, &heatmap.image)?;
    write_json(
        &names.meta_json,
        &RunMeta::new(surface.name(), &heatmap.grid, &heatmap.samples, &names),
    )?;

    println!("results written to {}", out_dir.display());
    Ok(())
}
