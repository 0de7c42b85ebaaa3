//! # U-Flight Tour
//!
//! Shortens the flight path through a fixed set of camera positions.
//!
//! The optimizer is a local search over an open tour (no return to the
//! start). Candidate moves are restricted to each waypoint's `k` nearest
//! positions, found with an R*-tree, so one pass costs `O(n * k)`:
//!
//! - **2-opt**: reverse a segment so a waypoint meets a candidate neighbor
//! - **Or-opt**: move a short segment, possibly reversed, next to a candidate
//!
//! A move is applied only when it shortens the path by more than
//! [`TourConfig::min_gain`], so the path length never increases.
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::Point3;
//! use u_flight_tour::{ordered_length, TourOptimizer};
//!
//! let positions: Vec<Point3<f64>> = [0.0, 30.0, 10.0, 20.0]
//!     .iter()
//!     .map(|&x| Point3::new(x, 0.0, 50.0))
//!     .collect();
//! let order = vec![0, 1, 2, 3];
//!
//! let result = TourOptimizer::default().run(&positions, &order).unwrap();
//! assert!(result.final_length <= ordered_length(&positions, &order));
//! ```

pub mod config;
pub mod construct;
pub mod moves;
pub mod neighbors;
pub mod optimizer;
pub mod state;

// Re-exports
pub use config::TourConfig;
pub use construct::nearest_neighbor_order;
pub use moves::{default_moves, OrOpt, TourMove, TwoOpt};
pub use neighbors::NeighborLists;
pub use optimizer::{optimize, optimize_tour, ordered_length, TourOptimizer, TourResult};
pub use state::TourState;
pub use u_flight_core::{Error, Result};
