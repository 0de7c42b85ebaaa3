//! Ordered camera pose sequences.

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::geometry::Aabb3D;
use crate::pose::CameraPose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A flight trajectory: camera poses in flight order.
///
/// Coverage does not depend on the order, but path length does.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    poses: Vec<CameraPose>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    pub fn new() -> Self {
        Self { poses: Vec::new() }
    }

    /// Creates an empty trajectory with room for `capacity` poses.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            poses: Vec::with_capacity(capacity),
        }
    }

    /// Appends a pose at the end of the flight.
    pub fn push(&mut self, pose: CameraPose) {
        self.poses.push(pose);
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if the trajectory has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Poses in flight order.
    pub fn poses(&self) -> &[CameraPose] {
        &self.poses
    }

    /// Iterates over poses in flight order.
    pub fn iter(&self) -> std::slice::Iter<'_, CameraPose> {
        self.poses.iter()
    }

    /// World positions of all waypoints in flight order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.poses.iter().map(CameraPose::position).collect()
    }

    /// Total flight distance: sum of distances between consecutive waypoints.
    pub fn path_length(&self) -> f64 {
        path_length(&self.positions())
    }

    /// Builds a new trajectory visiting the poses in the given order.
    ///
    /// Each pose keeps its orientation, focal length and position; only the
    /// sequence changes. `order` must be a permutation of `0..len()`.
    pub fn reordered(&self, order: &[usize]) -> Result<Trajectory> {
        validate_permutation(order, self.poses.len())?;
        Ok(order.iter().map(|&i| self.poses[i]).collect())
    }

    /// Waypoint count, path length and bounds in one pass over the positions.
    pub fn stats(&self) -> TrajectoryStats {
        let positions = self.positions();
        TrajectoryStats {
            waypoints: positions.len(),
            path_length: path_length(&positions),
            bounds: Aabb3D::from_points(positions.iter().copied()),
        }
    }
}

impl FromIterator<CameraPose> for Trajectory {
    fn from_iter<I: IntoIterator<Item = CameraPose>>(iter: I) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Trajectory {
    type Item = CameraPose;
    type IntoIter = std::vec::IntoIter<CameraPose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a CameraPose;
    type IntoIter = std::slice::Iter<'a, CameraPose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

/// Summary of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrajectoryStats {
    /// Number of waypoints.
    pub waypoints: usize,
    /// Total flight distance.
    pub path_length: f64,
    /// Bounds of the waypoint positions.
    pub bounds: Option<Aabb3D>,
}

/// Sum of Euclidean distances between consecutive points.
pub fn path_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|w| nalgebra::distance(&w[0], &w[1]))
        .sum()
}

/// Checks that `order` is a permutation of `0..n`.
pub fn validate_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::InvalidPermutation(format!(
            "expected {} indices, got {}",
            n,
            order.len()
        )));
    }

    let mut seen = vec![false; n];
    for &i in order {
        if i >= n {
            return Err(Error::InvalidPermutation(format!(
                "index {} out of range for {} waypoints",
                i, n
            )));
        }
        if std::mem::replace(&mut seen[i], true) {
            return Err(Error::InvalidPermutation(format!("index {} appears twice", i)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_trajectory(xs: &[f64]) -> Trajectory {
        xs.iter()
            .map(|&x| CameraPose::nadir(Point3::new(x, 0.0, 50.0), 0.86))
            .collect()
    }

    #[test]
    fn test_path_length() {
        let traj = line_trajectory(&[0.0, 10.0, 4.0]);
        assert!((traj.path_length() - 16.0).abs() < 1e-12);
        assert_eq!(line_trajectory(&[]).path_length(), 0.0);
        assert_eq!(line_trajectory(&[5.0]).path_length(), 0.0);
    }

    #[test]
    fn test_reordered_preserves_poses() {
        let traj = line_trajectory(&[0.0, 10.0, 4.0]);
        let reordered = traj.reordered(&[0, 2, 1]).expect("valid permutation");

        assert_eq!(reordered.len(), 3);
        assert_eq!(reordered.poses()[1], traj.poses()[2]);
        assert!((reordered.path_length() - 10.0).abs() < 1e-12);
        // Source is untouched.
        assert!((traj.path_length() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_reordered_rejects_bad_permutations() {
        let traj = line_trajectory(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            traj.reordered(&[0, 1]),
            Err(Error::InvalidPermutation(_))
        ));
        assert!(matches!(
            traj.reordered(&[0, 1, 3]),
            Err(Error::InvalidPermutation(_))
        ));
        assert!(matches!(
            traj.reordered(&[0, 1, 1]),
            Err(Error::InvalidPermutation(_))
        ));
    }

    #[test]
    fn test_stats() {
        let traj = line_trajectory(&[-2.0, 8.0]);
        let stats = traj.stats();
        assert_eq!(stats.waypoints, 2);
        assert!((stats.path_length - 10.0).abs() < 1e-12);
        let bounds = stats.bounds.expect("non-empty");
        assert!((bounds.width() - 10.0).abs() < 1e-12);
        assert!((bounds.min.z - 50.0).abs() < 1e-12);

        assert!(Trajectory::new().stats().bounds.is_none());
    }
}
