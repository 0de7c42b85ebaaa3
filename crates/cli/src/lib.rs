//! # U-Flight CLI
//!
//! Shared argument definitions and command bodies for the
//! `generate-grid-trajectory` and `shorten-trajectory` binaries.

pub mod mesh;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use u_flight_core::io::{load_trajectory, save_trajectory};
use u_flight_core::{Trajectory, TrajectoryStats};
use u_flight_grid::{CoverageGridPlanner, GridConfig, GridPlan};
use u_flight_tour::{TourConfig, TourOptimizer, TourResult};

pub use mesh::load_ply_aabb;

/// Log level selected by the `--verbose` flag.
pub fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Sets up `env_logger`: warnings by default, info with `--verbose`.
///
/// `RUST_LOG` still overrides the level when set. Call once, at the start
/// of `main`.
pub fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Generates a serpentine survey trajectory over the bounds of a proxy mesh.
#[derive(Debug, Parser)]
#[command(name = "generate-grid-trajectory", version, about)]
pub struct GenerateGridArgs {
    /// Proxy mesh (PLY) whose bounds define the survey region
    #[arg(value_name = "PROXY_MESH")]
    pub proxy_mesh: PathBuf,

    /// Output trajectory file
    #[arg(value_name = "OUT_TRAJECTORY")]
    pub out_trajectory: PathBuf,

    /// Camera focal length, normalized to the sensor width
    #[arg(long, default_value_t = 0.86)]
    pub focal_length: f64,

    /// Maximum distance between the cameras and the surface
    #[arg(long, default_value_t = 80.0)]
    pub max_distance: f64,

    /// Overlap between consecutive images of a column, in percent
    #[arg(long, default_value_t = 80.0)]
    pub forward_overlap: f64,

    /// Overlap between neighboring columns, in percent
    #[arg(long, default_value_t = 60.0)]
    pub side_overlap: f64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateGridArgs {
    /// Planner configuration described by the flags.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new()
            .with_focal_length(self.focal_length)
            .with_max_distance(self.max_distance)
            .with_forward_overlap(self.forward_overlap)
            .with_side_overlap(self.side_overlap)
    }
}

/// Plans the grid and writes it to `args.out_trajectory`.
///
/// The configuration is checked before the mesh is read, so invalid flags
/// never produce an output file.
pub fn generate_grid_trajectory(args: &GenerateGridArgs) -> Result<GridPlan> {
    let config = args.grid_config();
    config.validate().context("invalid grid configuration")?;

    let aabb = load_ply_aabb(&args.proxy_mesh)
        .with_context(|| format!("failed to load proxy mesh {}", args.proxy_mesh.display()))?;

    let plan = CoverageGridPlanner::new(config)
        .plan(&aabb)
        .context("failed to plan grid")?;

    save_trajectory(&plan.trajectory, &args.out_trajectory).with_context(|| {
        format!(
            "failed to write trajectory {}",
            args.out_trajectory.display()
        )
    })?;

    info!(
        "Wrote {} columns x {} rows at altitude {:.2} to {}",
        plan.geometry.cols,
        plan.geometry.rows,
        plan.geometry.altitude,
        args.out_trajectory.display()
    );
    log_stats("Grid", &plan.trajectory);
    Ok(plan)
}

/// Reorders a trajectory to shorten its flight path.
#[derive(Debug, Parser)]
#[command(name = "shorten-trajectory", version, about)]
pub struct ShortenArgs {
    /// Input trajectory file
    #[arg(value_name = "IN_TRAJECTORY")]
    pub in_trajectory: PathBuf,

    /// Output trajectory file
    #[arg(value_name = "OUT_TRAJECTORY")]
    pub out_trajectory: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Shortens the trajectory in `args.in_trajectory` and writes the
/// reordered poses to `args.out_trajectory`.
pub fn shorten_trajectory(args: &ShortenArgs) -> Result<TourResult> {
    let trajectory = load_trajectory(&args.in_trajectory).with_context(|| {
        format!(
            "failed to read trajectory {}",
            args.in_trajectory.display()
        )
    })?;

    log_stats("Input", &trajectory);

    let positions = trajectory.positions();
    let order: Vec<usize> = (0..positions.len()).collect();
    let result = TourOptimizer::new(TourConfig::default())
        .run(&positions, &order)
        .context("failed to optimize trajectory")?;

    let shortened = trajectory.reordered(&result.order)?;
    save_trajectory(&shortened, &args.out_trajectory).with_context(|| {
        format!(
            "failed to write trajectory {}",
            args.out_trajectory.display()
        )
    })?;

    info!(
        "Path length {:.3} -> {:.3} ({} waypoints, {} ms)",
        result.initial_length,
        result.final_length,
        positions.len(),
        result.computation_time_ms
    );
    Ok(result)
}

/// Logs the summary of a trajectory at info level.
fn log_stats(label: &str, trajectory: &Trajectory) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }

    let TrajectoryStats {
        waypoints,
        path_length,
        bounds,
    } = trajectory.stats();

    match bounds {
        Some(b) => info!(
            "{}: {} waypoints, path length {:.3}, x [{:.2}, {:.2}] y [{:.2}, {:.2}] z [{:.2}, {:.2}]",
            label, waypoints, path_length, b.min.x, b.max.x, b.min.y, b.max.y, b.min.z, b.max.z
        ),
        None => info!("{}: empty trajectory", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_follows_verbose_flag() {
        assert_eq!(log_level(false), LevelFilter::Warn);
        assert_eq!(log_level(true), LevelFilter::Info);
    }

    #[test]
    fn test_verbose_flag_parsed() {
        let args = ShortenArgs::try_parse_from(["shorten-trajectory", "a", "b", "--verbose"])
            .unwrap();
        assert_eq!(log_level(args.verbose), LevelFilter::Info);
    }
}
