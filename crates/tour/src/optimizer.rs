//! Tour optimizer and public API.

use std::time::Instant;

use nalgebra::Point3;

use u_flight_core::{path_length, validate_permutation, Error, Result};

use crate::config::TourConfig;
use crate::construct::nearest_neighbor_order;
use crate::moves::{default_moves, TourMove};
use crate::neighbors::NeighborLists;
use crate::state::TourState;

/// Result of tour optimization.
#[derive(Debug, Clone)]
pub struct TourResult {
    /// Visiting order: a permutation of the input indices.
    pub order: Vec<usize>,

    /// Path length of the input order.
    pub initial_length: f64,

    /// Path length of the returned order (never above `initial_length`).
    pub final_length: f64,

    /// Number of improvement passes run.
    pub passes: usize,

    /// Number of moves applied.
    pub moves_applied: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl TourResult {
    fn unchanged(order: &[usize], length: f64) -> Self {
        Self {
            order: order.to_vec(),
            initial_length: length,
            final_length: length,
            passes: 0,
            moves_applied: 0,
            computation_time_ms: 0,
        }
    }

    /// Absolute length reduction.
    pub fn improvement(&self) -> f64 {
        self.initial_length - self.final_length
    }

    /// Length reduction relative to the input (0.0 to 1.0).
    pub fn improvement_ratio(&self) -> f64 {
        if self.initial_length > 0.0 {
            self.improvement() / self.initial_length
        } else {
            0.0
        }
    }
}

/// Shortens open tours with a neighbor-limited local search.
///
/// Moves are pluggable through [`TourMove`]; the default set is 2-opt
/// followed by Or-opt. Passes repeat until a full pass applies no move or
/// the pass budget runs out.
pub struct TourOptimizer {
    config: TourConfig,
    moves: Vec<Box<dyn TourMove>>,
}

impl TourOptimizer {
    /// Creates an optimizer with the default move set.
    pub fn new(config: TourConfig) -> Self {
        let moves = default_moves(config.or_opt_max_segment);
        Self { config, moves }
    }

    /// Creates an optimizer with a custom move set.
    pub fn with_moves(config: TourConfig, moves: Vec<Box<dyn TourMove>>) -> Self {
        Self { config, moves }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Names of the configured moves, in application order.
    pub fn move_names(&self) -> Vec<&'static str> {
        self.moves.iter().map(|m| m.name()).collect()
    }

    /// Optimizes `order`, a permutation of `0..positions.len()`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPermutation` if `order` is not a permutation
    /// - `Error::NonFinitePosition` if a position has NaN or infinite coordinates
    pub fn run(&self, positions: &[Point3<f64>], order: &[usize]) -> Result<TourResult> {
        validate_permutation(order, positions.len())?;
        if let Some(i) = positions
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(Error::NonFinitePosition(i));
        }

        let start = Instant::now();
        let initial_length = ordered_length(positions, order);

        if positions.len() <= 1 || self.config.max_passes == 0 || self.moves.is_empty() {
            return Ok(TourResult::unchanged(order, initial_length));
        }

        let neighbors = NeighborLists::build(positions, self.config.neighbor_count);
        let mut state = TourState::new(positions, order.to_vec());

        if self.config.nearest_neighbor_seed {
            let seed = nearest_neighbor_order(positions, &neighbors, order[0]);
            let seed_length = ordered_length(positions, &seed);
            if seed_length < initial_length - self.config.min_gain {
                log::debug!(
                    "Nearest-neighbor seed: {:.3} -> {:.3}",
                    initial_length,
                    seed_length
                );
                state = TourState::new(positions, seed);
            }
        }

        let mut passes = 0;
        let mut moves_applied = 0;
        while passes < self.config.max_passes {
            passes += 1;
            let mut applied = 0;
            for mv in &self.moves {
                let n = mv.improve_pass(&mut state, &neighbors, self.config.min_gain);
                log::trace!("pass {} {}: {} moves", passes, mv.name(), n);
                applied += n;
            }
            moves_applied += applied;
            log::debug!(
                "Pass {}: {} moves, length {:.3}",
                passes,
                applied,
                state.length()
            );
            if applied == 0 {
                break;
            }
        }

        let mut final_order = state.into_order();
        let mut final_length = ordered_length(positions, &final_order);
        if final_length > initial_length {
            // Accumulated rounding can undo a marginal gain.
            final_order = order.to_vec();
            final_length = initial_length;
        }

        let result = TourResult {
            order: final_order,
            initial_length,
            final_length,
            passes,
            moves_applied,
            computation_time_ms: start.elapsed().as_millis() as u64,
        };
        log::info!(
            "Tour of {} waypoints: {:.3} -> {:.3} ({:.1}% shorter, {} moves, {} passes)",
            positions.len(),
            result.initial_length,
            result.final_length,
            result.improvement_ratio() * 100.0,
            result.moves_applied,
            result.passes
        );
        Ok(result)
    }

    /// Optimizes `order`, returning it unchanged when the input is malformed.
    pub fn optimize(&self, positions: &[Point3<f64>], order: &[usize]) -> Vec<usize> {
        match self.run(positions, order) {
            Ok(result) => result.order,
            Err(err) => {
                log::warn!("Tour optimization skipped: {}", err);
                order.to_vec()
            }
        }
    }
}

impl Default for TourOptimizer {
    fn default() -> Self {
        Self::new(TourConfig::default())
    }
}

/// Optimizes an initial order using `k` candidate neighbors per position.
pub fn optimize(positions: &[Point3<f64>], order: &[usize], k: usize) -> Vec<usize> {
    TourOptimizer::new(TourConfig::new().with_neighbor_count(k)).optimize(positions, order)
}

/// Optimizes the identity order `0..positions.len()`.
pub fn optimize_tour(positions: &[Point3<f64>], k: usize) -> Vec<usize> {
    let order: Vec<usize> = (0..positions.len()).collect();
    optimize(positions, &order, k)
}

/// Open-path length of `positions` visited in `order`.
pub fn ordered_length(positions: &[Point3<f64>], order: &[usize]) -> f64 {
    let visited: Vec<Point3<f64>> = order.iter().map(|&i| positions[i]).collect();
    path_length(&visited)
}
