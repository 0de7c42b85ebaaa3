//! Candidate neighbor lists for move generation.
//!
//! Restricting moves to the `k` nearest positions of each waypoint bounds
//! a pass to `O(n * k)` candidate evaluations instead of `O(n^2)`.

use nalgebra::Point3;
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// The `k` nearest other positions of every position.
#[derive(Debug, Clone)]
pub struct NeighborLists {
    lists: Vec<Vec<usize>>,
}

impl NeighborLists {
    /// Builds the lists using an R*-tree.
    ///
    /// Each list holds `min(k, n - 1)` indices sorted by ascending distance,
    /// ties broken by index.
    pub fn build(points: &[Point3<f64>], k: usize) -> Self {
        let k = k.min(points.len().saturating_sub(1));
        if k == 0 {
            return Self {
                lists: vec![Vec::new(); points.len()],
            };
        }

        let entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint::new([p.x, p.y, p.z], i))
            .collect();
        let tree = RTree::bulk_load(entries);

        let lists = points
            .par_iter()
            .enumerate()
            .map(|(i, p)| nearest(&tree, points, i, p, k))
            .collect();

        Self { lists }
    }

    /// Candidates of a position, nearest first.
    pub fn of(&self, index: usize) -> &[usize] {
        &self.lists[index]
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if there are no positions.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn nearest(
    tree: &RTree<IndexedPoint>,
    points: &[Point3<f64>],
    index: usize,
    query: &Point3<f64>,
    k: usize,
) -> Vec<usize> {
    let mut found: Vec<(f64, usize)> = Vec::with_capacity(k + 1);

    for entry in tree.nearest_neighbor_iter(&[query.x, query.y, query.z]) {
        if entry.data == index {
            continue;
        }
        let d2 = (points[entry.data] - query).norm_squared();
        // Keep collecting past k while distances tie so the cut is stable.
        if found.len() >= k && found.last().map_or(true, |&(last, _)| d2 > last) {
            break;
        }
        found.push((d2, entry.data));
    }

    found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    found.truncate(k);
    found.into_iter().map(|(_, j)| j).collect()
}
