//! Serpentine coverage-grid planning.
//!
//! Waypoints are laid out in columns parallel to the y axis. Even columns
//! fly toward +y, odd columns toward -y, and consecutive columns are joined
//! by a half-circle turn of radius `spacing / 2` sampled at roughly the
//! row step. Every waypoint carries the same nadir orientation.

use std::f64::consts::PI;
use std::ops::Range;

use nalgebra::{Point2, Point3};
use rayon::prelude::*;

use u_flight_core::{nadir_orientation, Aabb3D, CameraPose, Result, Trajectory};

use crate::config::GridConfig;
use crate::footprint::GridGeometry;

/// Waypoint index ranges contributed by one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSegment {
    /// Column index, `0..cols`.
    pub column: usize,
    /// Scan waypoints of the column.
    pub scan: Range<usize>,
    /// Turn-arc waypoints following the column (empty after the last).
    pub arc: Range<usize>,
}

/// Result of grid planning.
#[derive(Debug, Clone)]
pub struct GridPlan {
    /// Derived grid dimensions.
    pub geometry: GridGeometry,
    /// Planned trajectory in flight order.
    pub trajectory: Trajectory,
    /// Per-column layout of the trajectory.
    pub segments: Vec<ColumnSegment>,
}

/// Plans boustrophedon survey trajectories over a rectangular region.
#[derive(Debug, Clone, Default)]
pub struct CoverageGridPlanner {
    config: GridConfig,
}

impl CoverageGridPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    /// Returns the planner configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Plans a trajectory covering the horizontal extent of `aabb`.
    ///
    /// Fails with `Error::InvalidConfig` before computing anything if the
    /// configuration or the bounds are invalid.
    pub fn plan(&self, aabb: &Aabb3D) -> Result<GridPlan> {
        let geometry = GridGeometry::derive(&self.config, aabb)?;
        log::debug!(
            "Grid geometry: altitude {:.3}, footprint {:.3} x {:.3}, velocity {:.3}, spacing {:.3}, {} cols x {} rows, {} arc samples",
            geometry.altitude,
            geometry.footprint_width,
            geometry.footprint_height,
            geometry.velocity,
            geometry.spacing,
            geometry.cols,
            geometry.rows,
            geometry.arc_samples
        );

        let layout = ColumnLayout::new(&geometry, aabb.center_xy());

        // Each column is independent; collect keeps column order.
        let columns: Vec<(Vec<Point3<f64>>, Vec<Point3<f64>>)> = (0..geometry.cols)
            .into_par_iter()
            .map(|i| {
                let arc = if i + 1 < geometry.cols {
                    layout.turn_arc(i)
                } else {
                    Vec::new()
                };
                (layout.column_scan(i), arc)
            })
            .collect();

        let orientation = nadir_orientation();
        let focal_length = self.config.focal_length;
        let mut trajectory = Trajectory::with_capacity(geometry.waypoint_count());
        let mut segments = Vec::with_capacity(columns.len());

        for (column, (scan, arc)) in columns.into_iter().enumerate() {
            let scan_start = trajectory.len();
            for p in scan {
                trajectory.push(CameraPose::from_position(orientation, p, focal_length));
            }
            let arc_start = trajectory.len();
            for p in arc {
                trajectory.push(CameraPose::from_position(orientation, p, focal_length));
            }
            segments.push(ColumnSegment {
                column,
                scan: scan_start..arc_start,
                arc: arc_start..trajectory.len(),
            });
        }

        log::info!(
            "Planned {} waypoints over {:.1} x {:.1} ({} columns)",
            trajectory.len(),
            aabb.width(),
            aabb.depth(),
            geometry.cols
        );

        Ok(GridPlan {
            geometry,
            trajectory,
            segments,
        })
    }
}

/// Plans a grid trajectory with the given configuration.
pub fn plan_grid_trajectory(aabb: &Aabb3D, config: &GridConfig) -> Result<Trajectory> {
    CoverageGridPlanner::new(config.clone())
        .plan(aabb)
        .map(|plan| plan.trajectory)
}

/// Scan direction of a column: `+1` toward +y for even columns, `-1` for odd.
pub fn column_direction(column: usize) -> f64 {
    if column % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Positions of columns and turns around the region center.
struct ColumnLayout {
    center: Point2<f64>,
    altitude: f64,
    velocity: f64,
    spacing: f64,
    half_cols: usize,
    rows: usize,
    half_rows: usize,
    arc_samples: usize,
}

impl ColumnLayout {
    fn new(geometry: &GridGeometry, center: Point2<f64>) -> Self {
        Self {
            center,
            altitude: geometry.altitude,
            velocity: geometry.velocity,
            spacing: geometry.spacing,
            half_cols: geometry.cols / 2,
            rows: geometry.rows,
            half_rows: geometry.rows / 2,
            arc_samples: geometry.arc_samples,
        }
    }

    fn column_x(&self, column: usize) -> f64 {
        self.center.x + self.spacing * (column as f64 - self.half_cols as f64)
    }

    /// Scan waypoints of a column in flight order.
    fn column_scan(&self, column: usize) -> Vec<Point3<f64>> {
        let x = self.column_x(column);
        let sign = column_direction(column);
        (0..self.rows)
            .map(|row| {
                let offset = row as f64 - self.half_rows as f64;
                Point3::new(x, self.center.y + sign * self.velocity * offset, self.altitude)
            })
            .collect()
    }

    /// Half-circle turn from the end of `column` toward `column + 1`.
    ///
    /// Angles are `k * pi / n` for `k in 0..n`; with `n = 0` the turn is empty.
    fn turn_arc(&self, column: usize) -> Vec<Point3<f64>> {
        if self.arc_samples == 0 {
            return Vec::new();
        }

        let x = self.column_x(column);
        let sign = column_direction(column);
        let radius = self.spacing / 2.0;
        let reach = self.half_rows as f64 * self.velocity;
        let step = PI / self.arc_samples as f64;

        (0..self.arc_samples)
            .map(|k| {
                let angle = step * k as f64;
                Point3::new(
                    x + radius - radius * angle.cos(),
                    self.center.y + sign * (reach + radius * angle.sin()),
                    self.altitude,
                )
            })
            .collect()
    }
}
