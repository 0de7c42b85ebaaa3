//! Camera footprint and grid dimensions derived from a survey configuration.
//!
//! All quantities follow in closed form from the focal length, the flight
//! altitude and the overlap percentages:
//!
//! ```text
//! altitude = max_distance * altitude_margin
//! hfov     = 2 * atan2(1,   2f)        (3:2 sensor)
//! vfov     = 2 * atan2(2/3, 2f)
//! width    = 2 * altitude * tan(hfov / 2)
//! height   = 2 * altitude * tan(vfov / 2)
//! velocity = height * (1 - forward_overlap / 100)
//! spacing  = width  * (1 - side_overlap / 100)
//! cols     = ceil(aabb_width / spacing) + 1
//! rows     = ceil(aabb_depth / velocity) + 2
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::PI;

use u_flight_core::{Aabb3D, Error, Result};

use crate::config::GridConfig;

/// Sensor height relative to its width.
pub const SENSOR_ASPECT: f64 = 2.0 / 3.0;

/// Largest grid the planner will lay out, counting scan and turn waypoints.
pub const MAX_WAYPOINTS: usize = 10_000_000;

/// Field of view of a camera with the fixed 3:2 sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldOfView {
    /// Full horizontal angle in radians.
    pub horizontal: f64,
    /// Full vertical angle in radians.
    pub vertical: f64,
}

impl FieldOfView {
    /// Computes the field of view for a normalized focal length.
    pub fn from_focal_length(focal_length: f64) -> Self {
        Self {
            horizontal: 2.0 * 1.0f64.atan2(2.0 * focal_length),
            vertical: 2.0 * SENSOR_ASPECT.atan2(2.0 * focal_length),
        }
    }

    /// Ground footprint `(width, height)` seen from `altitude`.
    pub fn footprint(&self, altitude: f64) -> (f64, f64) {
        (
            2.0 * altitude * (self.horizontal / 2.0).tan(),
            2.0 * altitude * (self.vertical / 2.0).tan(),
        )
    }
}

/// Derived survey grid: altitude, step sizes and grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridGeometry {
    /// Flight altitude above the survey plane.
    pub altitude: f64,
    /// Camera field of view.
    pub fov: FieldOfView,
    /// Footprint extent across the flight direction.
    pub footprint_width: f64,
    /// Footprint extent along the flight direction.
    pub footprint_height: f64,
    /// Distance between consecutive waypoints within a column.
    pub velocity: f64,
    /// Distance between adjacent columns.
    pub spacing: f64,
    /// Number of scan columns.
    pub cols: usize,
    /// Number of waypoints per column.
    pub rows: usize,
    /// Number of waypoints on each turn arc.
    pub arc_samples: usize,
}

impl GridGeometry {
    /// Derives the grid for a region.
    ///
    /// The configuration is validated before any geometry is computed.
    pub fn derive(config: &GridConfig, aabb: &Aabb3D) -> Result<Self> {
        config.validate()?;
        if !aabb.is_valid() {
            return Err(Error::InvalidConfig(format!(
                "survey bounds must be finite and ordered, got {:?}",
                aabb
            )));
        }

        let altitude = config.max_distance * config.altitude_margin;
        let fov = FieldOfView::from_focal_length(config.focal_length);
        let (footprint_width, footprint_height) = fov.footprint(altitude);

        let velocity = footprint_height * (1.0 - config.forward_overlap / 100.0);
        let spacing = footprint_width * (1.0 - config.side_overlap / 100.0);

        if !(velocity.is_finite() && velocity > 0.0 && spacing.is_finite() && spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "degenerate step sizes: velocity {}, spacing {}",
                velocity, spacing
            )));
        }

        // Sized in f64 first: huge regions would saturate a usize cast.
        let cols = (aabb.width() / spacing).ceil() + 1.0;
        let rows = (aabb.depth() / velocity).ceil() + 2.0;
        let arcs = arc_samples(spacing, velocity);
        let estimate = cols * rows + (cols - 1.0) * arcs as f64;
        if !estimate.is_finite() || estimate > MAX_WAYPOINTS as f64 {
            return Err(Error::InvalidConfig(format!(
                "grid of {:.0} x {:.0} columns and rows exceeds {} waypoints",
                cols, rows, MAX_WAYPOINTS
            )));
        }

        let (cols, rows) = (cols as usize, rows as usize);
        if checked_waypoint_count(cols, rows, arcs).map_or(true, |n| n > MAX_WAYPOINTS) {
            return Err(Error::InvalidConfig(format!(
                "grid of {} x {} exceeds {} waypoints",
                cols, rows, MAX_WAYPOINTS
            )));
        }

        Ok(Self {
            altitude,
            fov,
            footprint_width,
            footprint_height,
            velocity,
            spacing,
            cols,
            rows,
            arc_samples: arcs,
        })
    }

    /// Radius of the half-circle turn between columns.
    pub fn turn_radius(&self) -> f64 {
        self.spacing / 2.0
    }

    /// Angle between consecutive turn-arc waypoints, or `None` without arcs.
    pub fn arc_angle_step(&self) -> Option<f64> {
        (self.arc_samples > 0).then(|| PI / self.arc_samples as f64)
    }

    /// Total number of waypoints in the planned trajectory.
    ///
    /// Saturates at `usize::MAX`; a derived geometry never exceeds
    /// [`MAX_WAYPOINTS`].
    pub fn waypoint_count(&self) -> usize {
        checked_waypoint_count(self.cols, self.rows, self.arc_samples).unwrap_or(usize::MAX)
    }
}

fn checked_waypoint_count(cols: usize, rows: usize, arc_samples: usize) -> Option<usize> {
    let scan = cols.checked_mul(rows)?;
    let turns = cols.saturating_sub(1).checked_mul(arc_samples)?;
    scan.checked_add(turns)
}

/// Number of turn-arc waypoints matching the row sampling density.
///
/// The half circle of diameter `spacing` is sampled every `velocity`; a
/// half circle shorter than one step yields zero samples.
pub fn arc_samples(spacing: f64, velocity: f64) -> usize {
    let half_circumference = PI * spacing / 2.0;
    (half_circumference / velocity).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn region(width: f64, depth: f64) -> Aabb3D {
        Aabb3D::new(Point3::new(0.0, 0.0, 0.0), Point3::new(width, depth, 10.0))
    }

    #[test]
    fn test_field_of_view() {
        let fov = FieldOfView::from_focal_length(0.5);
        // atan2(1, 1) = 45 degrees half-angle.
        assert!((fov.horizontal - PI / 2.0).abs() < 1e-12);
        let (w, h) = fov.footprint(10.0);
        assert!((w - 20.0).abs() < 1e-9);
        assert!((h - 20.0 * SENSOR_ASPECT).abs() < 1e-9);
    }

    #[test]
    fn test_reference_survey() {
        // 200 x 150 region, f = 0.86, D = 80, 80% forward / 60% side overlap.
        let geom = GridGeometry::derive(&GridConfig::default(), &region(200.0, 150.0))
            .expect("valid configuration");

        assert_relative_eq!(geom.altitude, 72.0, epsilon = 1e-9);
        // width = 2 * 72 / (2 * 0.86), height = width * 2 / 3
        assert_relative_eq!(geom.footprint_width, 72.0 / 0.86, epsilon = 1e-9);
        assert_relative_eq!(geom.footprint_height, 48.0 / 0.86, epsilon = 1e-9);
        assert_relative_eq!(geom.velocity, 19.2 / 1.72, epsilon = 1e-9);
        assert_relative_eq!(geom.spacing, 57.6 / 1.72, epsilon = 1e-9);
        // ceil(5.97) + 1, ceil(13.4375) + 2
        assert_eq!(geom.cols, 7);
        assert_eq!(geom.rows, 16);
        // floor(1.5 * pi)
        assert_eq!(geom.arc_samples, 4);
        assert_eq!(geom.waypoint_count(), 7 * 16 + 6 * 4);
    }

    #[test]
    fn test_degenerate_region() {
        let geom = GridGeometry::derive(&GridConfig::default(), &region(0.0, 0.0))
            .expect("a point region is still plannable");
        assert_eq!(geom.cols, 1);
        assert_eq!(geom.rows, 2);
        assert_eq!(geom.waypoint_count(), 2);
    }

    #[test]
    fn test_arc_samples_guard() {
        // Half circle shorter than one step: no arc waypoints.
        assert_eq!(arc_samples(1.0, 10.0), 0);
        assert_eq!(arc_samples(20.0, 10.0), 3);
    }

    #[test]
    fn test_no_arc_step_without_samples() {
        let config = GridConfig::new()
            .with_forward_overlap(0.0)
            .with_side_overlap(95.0);
        let geom = GridGeometry::derive(&config, &region(50.0, 50.0)).expect("valid");
        assert_eq!(geom.arc_samples, 0);
        assert!(geom.arc_angle_step().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig::new().with_forward_overlap(100.0);
        assert!(matches!(
            GridGeometry::derive(&config, &region(100.0, 100.0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_region_rejected() {
        let aabb = Aabb3D::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1e300, 1e300, 1.0));
        assert!(matches!(
            GridGeometry::derive(&GridConfig::default(), &aabb),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_waypoint_limit() {
        // About 300 x 900 waypoints: fine.
        let geom = GridGeometry::derive(&GridConfig::default(), &region(1e4, 1e4))
            .expect("within the waypoint limit");
        assert!(geom.waypoint_count() <= MAX_WAYPOINTS);

        // About 3000 x 9000 waypoints: too many.
        assert!(matches!(
            GridGeometry::derive(&GridConfig::default(), &region(1e5, 1e5)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_waypoint_count_saturates() {
        let mut geom = GridGeometry::derive(&GridConfig::default(), &region(200.0, 150.0))
            .expect("valid configuration");
        geom.cols = usize::MAX;
        geom.rows = 2;
        assert_eq!(geom.waypoint_count(), usize::MAX);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let aabb = Aabb3D::new(Point3::new(0.0, 0.0, 0.0), Point3::new(f64::NAN, 1.0, 1.0));
        assert!(GridGeometry::derive(&GridConfig::default(), &aabb).is_err());
    }
}
