//! Configuration for tour optimization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of the neighbor-limited local search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TourConfig {
    /// Number of nearest positions kept as move candidates per position.
    /// Default: 64.
    pub neighbor_count: usize,

    /// Maximum number of improvement passes over all moves.
    /// Set to 0 to return the input order unchanged.
    pub max_passes: usize,

    /// Minimum length reduction for a move to be applied.
    pub min_gain: f64,

    /// Longest segment relocated by Or-opt moves.
    pub or_opt_max_segment: usize,

    /// Also try a greedy nearest-neighbor tour from the first waypoint and
    /// keep it when it is shorter than the input order.
    pub nearest_neighbor_seed: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 64,
            max_passes: 1000,
            min_gain: 1e-9,
            or_opt_max_segment: 3,
            nearest_neighbor_seed: false,
        }
    }
}

impl TourConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidate list size (at least 1).
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k.max(1);
        self
    }

    /// Sets the pass budget.
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    /// Sets the minimum accepted gain.
    pub fn with_min_gain(mut self, gain: f64) -> Self {
        self.min_gain = gain.max(0.0);
        self
    }

    /// Sets the longest Or-opt segment (at least 1).
    pub fn with_or_opt_max_segment(mut self, len: usize) -> Self {
        self.or_opt_max_segment = len.max(1);
        self
    }

    /// Enables or disables the nearest-neighbor seed tour.
    pub fn with_nearest_neighbor_seed(mut self, enabled: bool) -> Self {
        self.nearest_neighbor_seed = enabled;
        self
    }
}
