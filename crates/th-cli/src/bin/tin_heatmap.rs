use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use tin_heatmap::{
    ArtifactNames, DEFAULT_MAX_GRID_DIMENSION, GridSpec, Heatmap, HeatmapConfig, RunMeta,
    SurfaceDocument, TinSurface, build_heatmap, save_heatmap_png, timestamp_now, write_json,
    write_points_csv,
};

#[derive(Parser, Debug)]
#[command(name = "tin_heatmap")]
#[command(about = "Sample TIN surfaces on a regular grid and export elevation heatmaps")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write point records, a PNG heatmap and a summary for each surface
    #[command(name = "heatmap")]
    Heatmap(HeatmapArgs),
    /// Print bounds and grid dimensions per surface without sampling
    #[command(name = "inspect")]
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
struct GridArgs {
    /// Surface document (JSON)
    #[arg(long, required = true)]
    input: PathBuf,
    /// Grid interval in surface units, must be > 0
    #[arg(long, required = true)]
    interval: f64,
    /// Largest accepted raster width or height
    #[arg(long, default_value_t = DEFAULT_MAX_GRID_DIMENSION)]
    max_grid_dim: usize,
    /// Only process the surface with this name
    #[arg(long)]
    surface: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct HeatmapArgs {
    #[command(flatten)]
    grid: GridArgs,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Stop after the first valid surface
    #[arg(long, default_value_t = false)]
    first_only: bool,
}

#[derive(Args, Debug, Clone)]
struct InspectArgs {
    #[command(flatten)]
    grid: GridArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Heatmap(args) => run_heatmap(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_heatmap(args: HeatmapArgs) -> Result<()> {
    let surfaces = prepare_surfaces(&args.grid)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let cfg = HeatmapConfig {
        max_grid_dimension: args.grid.max_grid_dim,
        ..HeatmapConfig::default()
    };
    let stamp = timestamp_now();

    let mut produced = 0usize;
    for surface in &surfaces {
        match export_surface(surface, args.grid.interval, &cfg, &args.out, &stamp) {
            Ok(names) => {
                produced += 1;
                info!(
                    "'{}': wrote {} and {}",
                    surface.name(),
                    names.points_csv.display(),
                    names.heatmap_png.display()
                );
            }
            Err(e) => error!("'{}': {e:#}", surface.name()),
        }

        if args.first_only {
            break;
        }
    }

    if produced == 0 {
        bail!("no heatmaps were produced from {}", args.grid.input.display());
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let surfaces = prepare_surfaces(&args.grid)?;

    for surface in &surfaces {
        let b = surface.bounds();
        let grid = match GridSpec::new(b, args.grid.interval, args.grid.max_grid_dim) {
            Ok(g) => format!(
                "{}x{} pixels, {} lattice points",
                g.width(),
                g.height(),
                g.columns() * g.rows()
            ),
            Err(e) => e.to_string(),
        };
        println!(
            "{}: {} vertices, {} triangles, bounds ({:.3}, {:.3})..({:.3}, {:.3}), {}",
            surface.name(),
            surface.num_vertices(),
            surface.num_triangles(),
            b.min.x,
            b.min.y,
            b.max.x,
            b.max.y,
            grid
        );
    }
    Ok(())
}

/// Validates the interval, loads the document and builds the selected surfaces.
fn prepare_surfaces(args: &GridArgs) -> Result<Vec<TinSurface>> {
    validate_interval(args.interval)?;
    ensure_file_exists(&args.input, "input")?;

    let mut doc = read_document(&args.input)?;
    if let Some(name) = &args.surface {
        if !doc.names().any(|n| n == name) {
            bail!(
                "no surface named '{}' in {} (available: {})",
                name,
                args.input.display(),
                doc.names().collect::<Vec<_>>().join(", ")
            );
        }
        doc.surfaces.retain(|s| &s.name == name);
    }

    let surfaces = doc.valid_surfaces();
    if surfaces.is_empty() {
        bail!("no valid surfaces in {}", args.input.display());
    }
    Ok(surfaces)
}

fn export_surface(
    surface: &TinSurface,
    interval: f64,
    cfg: &HeatmapConfig,
    out_dir: &Path,
    stamp: &str,
) -> Result<ArtifactNames> {
    let heatmap = build_heatmap(surface.bounds(), interval, surface, cfg)
        .with_context(|| format!("building heatmap at interval {interval}"))?;

    let names = ArtifactNames::new(out_dir, surface.name(), stamp);
    if let Err(e) = write_artifacts(&names, surface.name(), &heatmap) {
        names.remove_all();
        return Err(e);
    }
    Ok(names)
}

fn write_artifacts(names: &ArtifactNames, surface_name: &str, heatmap: &Heatmap) -> Result<()> {
    write_points_csv(&names.points_csv, heatmap.samples.samples())?;
    save_heatmap_png(&names.heatmap_png, &heatmap.image)?;
    write_json(
        &names.meta_json,
        &RunMeta::new(surface_name, &heatmap.grid, &heatmap.samples, names),
    )
}

fn read_document(path: &Path) -> Result<SurfaceDocument> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    SurfaceDocument::from_json_slice(&data)
        .with_context(|| format!("parsing surface document {}", path.display()))
}

fn validate_interval(interval: f64) -> Result<()> {
    if !interval.is_finite() || interval <= 0.0 {
        bail!("interval must be a number greater than 0, got {interval}");
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
