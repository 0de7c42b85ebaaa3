//! Mutable tour with constant-time position lookup.

use nalgebra::Point3;

/// An open tour over a fixed set of positions.
///
/// `order[slot]` is the node visited at `slot`; `slot_of[node]` is its inverse.
#[derive(Debug, Clone)]
pub struct TourState<'a> {
    points: &'a [Point3<f64>],
    order: Vec<usize>,
    slot_of: Vec<usize>,
}

impl<'a> TourState<'a> {
    /// Creates a tour from a permutation of `0..points.len()`.
    pub fn new(points: &'a [Point3<f64>], order: Vec<usize>) -> Self {
        let mut state = Self {
            points,
            slot_of: vec![0; order.len()],
            order,
        };
        state.reindex(0, state.order.len());
        state
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node visited at `slot`.
    pub fn node(&self, slot: usize) -> usize {
        self.order[slot]
    }

    /// Slot at which `node` is visited.
    pub fn slot_of(&self, node: usize) -> usize {
        self.slot_of[node]
    }

    /// Node before `slot`, if any.
    pub fn prev(&self, slot: usize) -> Option<usize> {
        slot.checked_sub(1).map(|s| self.order[s])
    }

    /// Node after `slot`, if any.
    pub fn next(&self, slot: usize) -> Option<usize> {
        self.order.get(slot + 1).copied()
    }

    /// Current visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the state, returning the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Distance between two nodes.
    pub fn dist(&self, a: usize, b: usize) -> f64 {
        nalgebra::distance(&self.points[a], &self.points[b])
    }

    /// Distance between two optional nodes; a missing endpoint costs nothing.
    pub fn gap(&self, a: Option<usize>, b: Option<usize>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.dist(a, b),
            _ => 0.0,
        }
    }

    /// Total open-path length.
    pub fn length(&self) -> f64 {
        self.order
            .windows(2)
            .map(|w| self.dist(w[0], w[1]))
            .sum()
    }

    /// Length reduction obtained by reversing slots `start..=end`.
    pub fn reversal_gain(&self, start: usize, end: usize) -> f64 {
        let before = self.prev(start);
        let after = self.next(end);
        let first = self.order[start];
        let last = self.order[end];

        let removed = self.gap(before, Some(first)) + self.gap(Some(last), after);
        let added = self.gap(before, Some(last)) + self.gap(Some(first), after);
        removed - added
    }

    /// Reverses slots `start..=end`.
    pub fn reverse(&mut self, start: usize, end: usize) {
        self.order[start..=end].reverse();
        self.reindex(start, end + 1);
    }

    /// Moves slots `start..=end` directly after node `after` (or to the
    /// front when `None`), optionally reversing the segment.
    ///
    /// `after` must not lie inside the moved segment.
    pub fn relocate(&mut self, start: usize, end: usize, after: Option<usize>, reversed: bool) {
        let mut segment: Vec<usize> = self.order.drain(start..=end).collect();
        if reversed {
            segment.reverse();
        }

        let at = match after {
            Some(node) => self
                .order
                .iter()
                .position(|&n| n == node)
                .map_or(0, |p| p + 1),
            None => 0,
        };
        self.order.splice(at..at, segment);
        self.reindex(0, self.order.len());
    }

    fn reindex(&mut self, from: usize, to: usize) {
        for slot in from..to {
            self.slot_of[self.order[slot]] = slot;
        }
    }
}
