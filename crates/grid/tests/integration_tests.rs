//! Integration tests for u-flight-grid.

use nalgebra::{Point2, Point3};
use u_flight_core::{nadir_orientation, Aabb3D, Error};
use u_flight_grid::{CoverageGridPlanner, GridConfig, GridPlan};

const EPS: f64 = 1e-9;

fn region(min: (f64, f64), max: (f64, f64)) -> Aabb3D {
    Aabb3D::new(Point3::new(min.0, min.1, -3.0), Point3::new(max.0, max.1, 12.0))
}

fn plan(config: GridConfig, aabb: &Aabb3D) -> GridPlan {
    CoverageGridPlanner::new(config)
        .plan(aabb)
        .expect("configuration should be valid")
}

fn xy(p: &Point3<f64>) -> Point2<f64> {
    Point2::new(p.x, p.y)
}

mod derivation_tests {
    use super::*;

    #[test]
    fn test_reference_dimensions() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (200.0, 150.0)));
        let g = result.geometry;

        assert!((g.altitude - 72.0).abs() < EPS);
        assert!((g.velocity - 11.162_790_697_674_4).abs() < 1e-9);
        assert!((g.spacing - 33.488_372_093_023_3).abs() < 1e-9);
        assert_eq!(g.cols, 7);
        assert_eq!(g.rows, 16);
    }

    #[test]
    fn test_counts_match_closed_form() {
        let configs = [
            GridConfig::default(),
            GridConfig::new().with_focal_length(1.5).with_max_distance(40.0),
            GridConfig::new().with_forward_overlap(50.0).with_side_overlap(20.0),
            GridConfig::new().with_forward_overlap(0.0).with_side_overlap(0.0),
        ];
        let aabb = region((-120.0, 30.0), (260.0, 410.0));

        for config in configs {
            let result = plan(config, &aabb);
            let g = result.geometry;
            let cols = (aabb.width() / g.spacing).ceil() as usize + 1;
            let rows = (aabb.depth() / g.velocity).ceil() as usize + 2;
            assert_eq!(g.cols, cols);
            assert_eq!(g.rows, rows);
            assert_eq!(result.trajectory.len(), cols * rows + (cols - 1) * g.arc_samples);
        }
    }
}

mod layout_tests {
    use super::*;

    #[test]
    fn test_row_step_is_velocity() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (300.0, 180.0)));
        let positions = result.trajectory.positions();

        for seg in &result.segments {
            for w in positions[seg.scan.clone()].windows(2) {
                let d = (xy(&w[1]) - xy(&w[0])).norm();
                assert!((d - result.geometry.velocity).abs() < 1e-9);
                assert!((w[1].x - w[0].x).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_column_step_is_spacing() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (300.0, 180.0)));
        let positions = result.trajectory.positions();

        for pair in result.segments.windows(2) {
            let a = positions[pair[0].scan.start].x;
            let b = positions[pair[1].scan.start].x;
            assert!((b - a - result.geometry.spacing).abs() < 1e-9);
        }
    }

    #[test]
    fn test_turn_junctions_are_continuous() {
        // 19 rows (odd) and 16 rows (even).
        for depth in [180.0, 150.0] {
            check_turn_junctions(&plan(GridConfig::default(), &region((0.0, 0.0), (300.0, depth))));
        }
    }

    fn check_turn_junctions(result: &GridPlan) {
        let g = result.geometry;
        let positions = result.trajectory.positions();
        let step = g.arc_angle_step().expect("reference survey has turn arcs");
        // Chord between adjacent arc samples.
        let chord = 2.0 * g.turn_radius() * (step / 2.0).sin();

        for pair in result.segments.windows(2) {
            let (cur, next) = (&pair[0], &pair[1]);
            let last_row = xy(&positions[cur.scan.end - 1]);
            let arc_first = xy(&positions[cur.arc.start]);
            let arc_last = xy(&positions[cur.arc.end - 1]);
            let next_first = xy(&positions[next.scan.start]);

            // The arc starts at half_rows * velocity from the center line, one
            // row step past the last scan row when rows is even and on it when
            // odd, so the gap is bounded by velocity rather than the chord.
            let expected_gap = if g.rows % 2 == 0 { g.velocity } else { 0.0 };
            assert!(((arc_first - last_row).norm() - expected_gap).abs() < 1e-9);
            for w in positions[cur.arc.clone()].windows(2) {
                assert!(((xy(&w[1]) - xy(&w[0])).norm() - chord).abs() < 1e-9);
            }
            assert!((next_first - arc_last).norm() <= chord + EPS);
        }
    }

    #[test]
    fn test_no_arcs_when_turn_is_short() {
        let config = GridConfig::new()
            .with_forward_overlap(0.0)
            .with_side_overlap(95.0);
        let result = plan(config, &region((0.0, 0.0), (40.0, 40.0)));

        assert_eq!(result.geometry.arc_samples, 0);
        assert!(result.segments.iter().all(|s| s.arc.is_empty()));
        assert_eq!(
            result.trajectory.len(),
            result.geometry.cols * result.geometry.rows
        );
    }

    #[test]
    fn test_covers_region() {
        let aabb = region((-75.0, 20.0), (125.0, 170.0));
        let result = plan(GridConfig::default(), &aabb);
        let g = result.geometry;
        let stats = result.trajectory.stats();
        assert_eq!(stats.waypoints, g.waypoint_count());
        let flown = stats.bounds.expect("non-empty trajectory");

        // Footprints centered on the outer scan lines reach past the region.
        assert!(flown.min.x - g.footprint_width / 2.0 <= aabb.min.x);
        assert!(flown.max.x + g.footprint_width / 2.0 >= aabb.max.x);
        assert!(flown.min.y <= aabb.min.y);
        assert!(flown.max.y >= aabb.max.y);
        assert!((flown.min.z - g.altitude).abs() < EPS);
        assert!((flown.max.z - g.altitude).abs() < EPS);
    }
}

mod pose_tests {
    use super::*;

    #[test]
    fn test_orientation_identical_everywhere() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (200.0, 150.0)));
        let expected = nadir_orientation();

        for pose in &result.trajectory {
            assert_eq!(pose.orientation, expected);
            assert_eq!(pose.focal_length, 0.86);
        }
    }

    #[test]
    fn test_constant_altitude() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (200.0, 150.0)));
        for p in result.trajectory.positions() {
            assert!((p.z - 72.0).abs() < EPS);
        }
    }

    #[test]
    fn test_translation_matches_position() {
        let result = plan(GridConfig::default(), &region((0.0, 0.0), (100.0, 100.0)));
        for pose in &result.trajectory {
            let position = pose.position();
            let expected = -(pose.orientation * position.coords);
            assert!((pose.translation - expected).norm() < 1e-9);
        }
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_rejects_full_overlap() {
        let aabb = region((0.0, 0.0), (100.0, 100.0));
        for config in [
            GridConfig::new().with_forward_overlap(100.0),
            GridConfig::new().with_side_overlap(100.0),
            GridConfig::new().with_focal_length(-0.86),
            GridConfig::new().with_max_distance(0.0),
        ] {
            let result = CoverageGridPlanner::new(config).plan(&aabb);
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_oversized_region_is_an_error() {
        for max in [1e300, f64::MAX] {
            let aabb = Aabb3D::new(Point3::new(0.0, 0.0, 0.0), Point3::new(max, max, 1.0));
            let result = CoverageGridPlanner::new(GridConfig::default()).plan(&aabb);
            assert!(matches!(result, Err(Error::InvalidConfig(_))));
        }
    }
}
