//! Axis-aligned bounds of a survey region.

use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D AABB (Axis-Aligned Bounding Box) of the region to survey.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3D {
    /// Minimum corner (x, y, z)
    pub min: Point3<f64>,
    /// Maximum corner (x, y, z)
    pub max: Point3<f64>,
}

impl Aabb3D {
    /// Creates a new AABB from its corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of a point set.
    ///
    /// Returns `None` if the set is empty or any coordinate is non-finite.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        if !is_finite(&first) {
            return None;
        }

        let mut aabb = Self::new(first, first);
        for p in iter {
            if !is_finite(&p) {
                return None;
            }
            aabb.min = aabb.min.inf(&p);
            aabb.max = aabb.max.sup(&p);
        }
        Some(aabb)
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along the y axis.
    pub fn depth(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along the z axis.
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Center of the box projected onto the horizontal plane.
    pub fn center_xy(&self) -> Point2<f64> {
        Point2::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.depth() / 2.0,
        )
    }

    /// Returns true if both corners are finite and ordered.
    pub fn is_valid(&self) -> bool {
        is_finite(&self.min)
            && is_finite(&self.max)
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }
}

fn is_finite(p: &Point3<f64>) -> bool {
    p.iter().all(|c| c.is_finite())
}
