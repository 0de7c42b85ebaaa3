//! # U-Flight Core
//!
//! Shared types for the U-Flight aerial survey planner.
//!
//! The grid planner (`u-flight-grid`) and the tour optimizer
//! (`u-flight-tour`) never depend on each other; they exchange data only
//! through the [`Trajectory`] type defined here.
//!
//! ## Core Components
//!
//! - **Poses**: [`CameraPose`], [`nadir_orientation`]
//! - **Trajectories**: [`Trajectory`], [`TrajectoryStats`]
//! - **Bounds**: [`Aabb3D`]
//! - **Persistence**: [`io::save_trajectory`], [`io::load_trajectory`]
//!
//! ```rust
//! use nalgebra::Point3;
//! use u_flight_core::{CameraPose, Trajectory};
//!
//! let traj: Trajectory = [0.0, 30.0, 60.0]
//!     .iter()
//!     .map(|&x| CameraPose::nadir(Point3::new(x, 0.0, 72.0), 0.86))
//!     .collect();
//! assert!((traj.path_length() - 60.0).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod io;
pub mod pose;
pub mod trajectory;

// Re-exports
pub use error::{Error, Result};
pub use geometry::Aabb3D;
pub use pose::{nadir_orientation, CameraPose, NADIR_ROTATION, POSE_RECORD_LEN};
pub use trajectory::{path_length, validate_permutation, Trajectory, TrajectoryStats};
