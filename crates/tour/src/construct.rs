//! Greedy nearest-neighbor tour construction.

use nalgebra::Point3;

use crate::neighbors::NeighborLists;

/// Builds a tour starting at `start` that always flies to the closest
/// unvisited waypoint.
///
/// Candidate lists are checked first; when every candidate has already been
/// visited the remaining waypoints are scanned directly.
pub fn nearest_neighbor_order(
    points: &[Point3<f64>],
    neighbors: &NeighborLists,
    start: usize,
) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let next = neighbors
            .of(current)
            .iter()
            .copied()
            .find(|&c| !visited[c])
            .or_else(|| closest_unvisited(points, &visited, current));

        match next {
            Some(c) => {
                visited[c] = true;
                order.push(c);
                current = c;
            }
            None => break,
        }
    }

    order
}

fn closest_unvisited(points: &[Point3<f64>], visited: &[bool], from: usize) -> Option<usize> {
    let origin = &points[from];
    (0..points.len())
        .filter(|&i| !visited[i])
        .min_by(|&a, &b| {
            let da = (points[a] - origin).norm_squared();
            let db = (points[b] - origin).norm_squared();
            da.total_cmp(&db).then(a.cmp(&b))
        })
}
