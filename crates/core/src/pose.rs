//! Camera pose of a single survey waypoint.

use nalgebra::{Matrix3, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of scalar values in a flattened pose record.
pub const POSE_RECORD_LEN: usize = 13;

/// Row-major rotation of a camera looking straight down (world -Z).
///
/// The camera x axis follows world x, its y and z axes are flipped.
pub const NADIR_ROTATION: [f64; 9] = [1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0];

/// Returns the nadir orientation as a matrix.
pub fn nadir_orientation() -> Matrix3<f64> {
    Matrix3::from_row_slice(&NADIR_ROTATION)
}

/// A camera pose: world-to-camera rotation, translation and focal length.
///
/// The translation follows the `x_cam = R * x_world + t` convention, so a
/// camera at world position `c` has `t = -R * c`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraPose {
    /// World-to-camera rotation.
    pub orientation: Matrix3<f64>,
    /// Translation in camera space.
    pub translation: Vector3<f64>,
    /// Focal length, normalized to the image width.
    pub focal_length: f64,
}

impl CameraPose {
    /// Creates a pose from its raw components.
    pub fn new(orientation: Matrix3<f64>, translation: Vector3<f64>, focal_length: f64) -> Self {
        Self {
            orientation,
            translation,
            focal_length,
        }
    }

    /// Creates a pose located at a world position.
    pub fn from_position(
        orientation: Matrix3<f64>,
        position: Point3<f64>,
        focal_length: f64,
    ) -> Self {
        Self {
            orientation,
            translation: -(orientation * position.coords),
            focal_length,
        }
    }

    /// Creates a nadir-facing pose at a world position.
    pub fn nadir(position: Point3<f64>, focal_length: f64) -> Self {
        Self::from_position(nadir_orientation(), position, focal_length)
    }

    /// Returns the camera center in world coordinates.
    pub fn position(&self) -> Point3<f64> {
        Point3::from(-(self.orientation.transpose() * self.translation))
    }

    /// Returns true if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.orientation.iter().all(|v| v.is_finite())
            && self.translation.iter().all(|v| v.is_finite())
            && self.focal_length.is_finite()
    }

    /// Flattens the pose into rotation (row-major), translation and focal length.
    pub fn to_record(&self) -> [f64; POSE_RECORD_LEN] {
        let mut record = [0.0; POSE_RECORD_LEN];
        for r in 0..3 {
            for c in 0..3 {
                record[r * 3 + c] = self.orientation[(r, c)];
            }
        }
        record[9..12].copy_from_slice(self.translation.as_slice());
        record[12] = self.focal_length;
        record
    }

    /// Rebuilds a pose from a flattened record.
    pub fn from_record(record: &[f64; POSE_RECORD_LEN]) -> Self {
        Self {
            orientation: Matrix3::from_row_slice(&record[0..9]),
            translation: Vector3::new(record[9], record[10], record[11]),
            focal_length: record[12],
        }
    }
}
