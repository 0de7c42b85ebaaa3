//! # U-Flight Grid
//!
//! Coverage-grid trajectory generation for aerial 3D-reconstruction surveys.
//!
//! Given the bounds of a proxy surface and the camera/overlap parameters,
//! the planner flies a boustrophedon (serpentine) pattern at a fixed
//! altitude with nadir-facing cameras:
//!
//! 1. **Footprint**: altitude, field of view and ground footprint
//! 2. **Step sizes**: row step (`velocity`) and column step (`spacing`) from
//!    the forward and side overlaps
//! 3. **Columns**: scan lines alternating direction by column parity
//! 4. **Turns**: half-circle arcs joining consecutive columns
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::Point3;
//! use u_flight_core::Aabb3D;
//! use u_flight_grid::{CoverageGridPlanner, GridConfig};
//!
//! let region = Aabb3D::new(Point3::new(0.0, 0.0, 0.0), Point3::new(200.0, 150.0, 20.0));
//! let config = GridConfig::new()
//!     .with_forward_overlap(80.0)
//!     .with_side_overlap(60.0);
//!
//! let plan = CoverageGridPlanner::new(config).plan(&region).unwrap();
//! assert_eq!(plan.geometry.cols, 7);
//! assert_eq!(plan.trajectory.len(), plan.geometry.waypoint_count());
//! ```

pub mod config;
pub mod footprint;
pub mod planner;

// Re-exports
pub use config::GridConfig;
pub use footprint::{arc_samples, FieldOfView, GridGeometry, MAX_WAYPOINTS, SENSOR_ASPECT};
pub use planner::{
    column_direction, plan_grid_trajectory, ColumnSegment, CoverageGridPlanner, GridPlan,
};
pub use u_flight_core::{Aabb3D, Error, Result, Trajectory};
