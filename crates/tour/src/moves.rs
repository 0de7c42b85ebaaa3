//! Local-search moves.
//!
//! Every move evaluates its gain in constant time from the edges it
//! removes and adds, and is applied only when the tour gets strictly
//! shorter by more than `min_gain`. Total length is therefore
//! non-increasing after every applied move.
//!
//! # Moves
//!
//! - [`TwoOpt`]: reverses a segment so that a node becomes adjacent to one
//!   of its candidate neighbors
//! - [`OrOpt`]: relocates a short segment next to a candidate neighbor of
//!   one of its endpoints, optionally reversed

use crate::neighbors::NeighborLists;
use crate::state::TourState;

/// A tour improvement move applied over candidate neighbor lists.
pub trait TourMove: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs one pass over all nodes, applying every improving move found.
    ///
    /// Returns the number of applied moves.
    fn improve_pass(
        &self,
        state: &mut TourState<'_>,
        neighbors: &NeighborLists,
        min_gain: f64,
    ) -> usize;
}

/// Segment reversal (2-opt) restricted to candidate pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl TourMove for TwoOpt {
    fn name(&self) -> &'static str {
        "2-opt"
    }

    fn improve_pass(
        &self,
        state: &mut TourState<'_>,
        neighbors: &NeighborLists,
        min_gain: f64,
    ) -> usize {
        let mut applied = 0;

        for a in 0..state.len() {
            for &c in neighbors.of(a) {
                let i = state.slot_of(a);
                let j = state.slot_of(c);

                // Reverse the stretch between a and c so the two become adjacent.
                let (start, end) = if j > i + 1 {
                    (i + 1, j)
                } else if j + 1 < i {
                    (j, i - 1)
                } else {
                    continue;
                };

                if state.reversal_gain(start, end) > min_gain {
                    state.reverse(start, end);
                    applied += 1;
                }
            }
        }

        applied
    }
}

/// Segment relocation (Or-opt) for segments of up to `max_segment` nodes.
#[derive(Debug, Clone, Copy)]
pub struct OrOpt {
    /// Longest relocated segment.
    pub max_segment: usize,
}

impl Default for OrOpt {
    fn default() -> Self {
        Self { max_segment: 3 }
    }
}

impl OrOpt {
    /// Creates an Or-opt move for segments of up to `max_segment` nodes.
    pub fn new(max_segment: usize) -> Self {
        Self {
            max_segment: max_segment.max(1),
        }
    }
}

/// Best relocation found for one segment.
#[derive(Debug, Clone, Copy)]
struct Relocation {
    gain: f64,
    after: Option<usize>,
    reversed: bool,
}

impl TourMove for OrOpt {
    fn name(&self) -> &'static str {
        "or-opt"
    }

    fn improve_pass(
        &self,
        state: &mut TourState<'_>,
        neighbors: &NeighborLists,
        min_gain: f64,
    ) -> usize {
        let n = state.len();
        let mut applied = 0;

        for a in 0..n {
            for len in 1..=self.max_segment.min(n.saturating_sub(1)) {
                let start = state.slot_of(a);
                let end = start + len - 1;
                if end >= n {
                    break;
                }

                if let Some(best) = best_relocation(state, neighbors, start, end) {
                    if best.gain > min_gain {
                        state.relocate(start, end, best.after, best.reversed);
                        applied += 1;
                        break;
                    }
                }
            }
        }

        applied
    }
}

/// Finds the most improving place to move slots `start..=end`.
fn best_relocation(
    state: &TourState<'_>,
    neighbors: &NeighborLists,
    start: usize,
    end: usize,
) -> Option<Relocation> {
    let first = state.node(start);
    let last = state.node(end);
    let before = state.prev(start);
    let after = state.next(end);

    // Length saved by cutting the segment out and closing the gap.
    let removal = state.gap(before, Some(first)) + state.gap(Some(last), after)
        - state.gap(before, after);

    let mut best: Option<Relocation> = None;
    let mut consider = |u: Option<usize>, w: Option<usize>| {
        if u == before && w == after {
            return;
        }
        let base = state.gap(u, w);
        let forward = state.gap(u, Some(first)) + state.gap(Some(last), w) - base;
        let backward = state.gap(u, Some(last)) + state.gap(Some(first), w) - base;
        let (cost, reversed) = if backward < forward {
            (backward, true)
        } else {
            (forward, false)
        };
        let gain = removal - cost;
        if best.map_or(true, |b| gain > b.gain) {
            best = Some(Relocation {
                gain,
                after: u,
                reversed,
            });
        }
    };

    for &endpoint in &[first, last] {
        for &c in neighbors.of(endpoint) {
            let p = state.slot_of(c);
            if (start..=end).contains(&p) {
                continue;
            }

            // Neighbors of c once the segment has been cut out.
            let pred = if p == end + 1 {
                before
            } else {
                state.prev(p)
            };
            let succ = if p + 1 == start {
                after
            } else {
                state.next(p)
            };

            consider(Some(c), succ);
            consider(pred, Some(c));
        }
    }

    best
}

/// Default move set: 2-opt followed by Or-opt.
pub fn default_moves(or_opt_max_segment: usize) -> Vec<Box<dyn TourMove>> {
    vec![Box::new(TwoOpt), Box::new(OrOpt::new(or_opt_max_segment))]
}
