//! Configuration for coverage-grid planning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use u_flight_core::{Error, Result};

/// Camera and overlap parameters for a grid survey.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Camera focal length, normalized to the image width.
    pub focal_length: f64,

    /// Maximum distance between camera and surface.
    pub max_distance: f64,

    /// Image overlap along the flight direction, in percent `[0, 100)`.
    pub forward_overlap: f64,

    /// Image overlap between adjacent scan columns, in percent `[0, 100)`.
    pub side_overlap: f64,

    /// Fraction of `max_distance` used as flight altitude.
    /// Default: 0.9 (10% safety margin).
    pub altitude_margin: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            focal_length: 0.86,
            max_distance: 80.0,
            forward_overlap: 80.0,
            side_overlap: 60.0,
            altitude_margin: 0.9,
        }
    }
}

impl GridConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the focal length.
    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Sets the maximum stand-off distance.
    pub fn with_max_distance(mut self, distance: f64) -> Self {
        self.max_distance = distance;
        self
    }

    /// Sets the forward overlap percentage.
    pub fn with_forward_overlap(mut self, percent: f64) -> Self {
        self.forward_overlap = percent;
        self
    }

    /// Sets the side overlap percentage.
    pub fn with_side_overlap(mut self, percent: f64) -> Self {
        self.side_overlap = percent;
        self
    }

    /// Sets the altitude margin.
    pub fn with_altitude_margin(mut self, margin: f64) -> Self {
        self.altitude_margin = margin;
        self
    }

    /// Checks every parameter; out-of-range values are reported, never clamped.
    pub fn validate(&self) -> Result<()> {
        check_overlap("forward_overlap", self.forward_overlap)?;
        check_overlap("side_overlap", self.side_overlap)?;

        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "focal_length must be positive, got {}",
                self.focal_length
            )));
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if !(self.altitude_margin > 0.0 && self.altitude_margin <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "altitude_margin must be in (0, 1], got {}",
                self.altitude_margin
            )));
        }
        Ok(())
    }
}

fn check_overlap(name: &str, percent: f64) -> Result<()> {
    if (0.0..100.0).contains(&percent) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be in [0, 100), got {}",
            name, percent
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.focal_length, 0.86);
        assert_eq!(config.max_distance, 80.0);
        assert_eq!(config.forward_overlap, 80.0);
        assert_eq!(config.side_overlap, 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GridConfig::new()
            .with_focal_length(1.2)
            .with_max_distance(120.0)
            .with_forward_overlap(70.0)
            .with_side_overlap(50.0);

        assert_eq!(config.focal_length, 1.2);
        assert_eq!(config.max_distance, 120.0);
        assert_eq!(config.forward_overlap, 70.0);
        assert_eq!(config.side_overlap, 50.0);
    }

    #[test]
    fn test_full_overlap_rejected() {
        let forward = GridConfig::new().with_forward_overlap(100.0);
        assert!(matches!(forward.validate(), Err(Error::InvalidConfig(_))));

        let side = GridConfig::new().with_side_overlap(100.0);
        assert!(matches!(side.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_or_nan_rejected() {
        assert!(GridConfig::new().with_forward_overlap(-1.0).validate().is_err());
        assert!(GridConfig::new().with_side_overlap(f64::NAN).validate().is_err());
        assert!(GridConfig::new().with_focal_length(0.0).validate().is_err());
        assert!(GridConfig::new().with_focal_length(f64::INFINITY).validate().is_err());
        assert!(GridConfig::new().with_max_distance(-5.0).validate().is_err());
        assert!(GridConfig::new().with_altitude_margin(0.0).validate().is_err());
        assert!(GridConfig::new().with_altitude_margin(1.5).validate().is_err());
    }

    #[test]
    fn test_zero_overlap_allowed() {
        let config = GridConfig::new()
            .with_forward_overlap(0.0)
            .with_side_overlap(0.0);
        assert!(config.validate().is_ok());
    }
}
