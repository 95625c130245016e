//! Configuration constants and settings for the optimizer.

use serde::{Deserialize, Serialize};

use crate::error::{OptimError, Result};

/// Minimum margin on each side of the web, in mm.
pub const MIN_SIDE_MARGIN_MM: f64 = 8.0;

/// Maximum margin on each side of the web, in mm.
pub const MAX_SIDE_MARGIN_MM: f64 = 15.0;

/// Gap between two adjacent label lanes, in mm.
pub const LANE_GAP_MM: f64 = 4.0;

/// Web widths are stocked in steps of this many mm.
pub const LAIZE_ROUNDING_MM: f64 = 10.0;

/// Lane search ceiling (exclusive). A safety bound, not a press limit.
pub const MAX_LANES: u32 = 100;

/// Maximum web width offered by default, in mm.
pub const DEFAULT_MAX_LAIZE_MM: f64 = 330.0;

/// Lower bound of the optimal waste-per-label band, in mm.
pub const OPTIMAL_WASTE_MIN_MM: f64 = 3.0;

/// Upper bound of the optimal waste-per-label band, in mm.
pub const OPTIMAL_WASTE_MAX_MM: f64 = 8.0;

/// Lower bound of the acceptable waste-per-label band, in mm.
pub const ACCEPTABLE_WASTE_MIN_MM: f64 = 1.5;

/// Waste per label above which a cylinder is inefficient, in mm.
pub const INEFFICIENT_WASTE_ABOVE_MM: f64 = 20.0;

/// Gear tooth pitch of the press cylinders (1/8 inch), in mm.
pub const TOOTH_PITCH_MM: f64 = 3.175;

/// Tolerance between a cylinder's circumference and `teeth × pitch`, in mm.
pub const TOOTH_PITCH_TOLERANCE_MM: f64 = 0.5;

/// Sentinel used by operators to mean "every machine".
pub const ALL_MACHINES_KEY: &str = "all";

/// Display name used when no single machine is selected.
pub const ALL_MACHINES_LABEL: &str = "Toutes les Machines";

/// Known presses: (key, display name).
pub const MACHINES: &[(&str, &str)] = &[
    ("bobst1", "Bobst 01"),
    ("bobst2", "Bobst 02"),
    ("indien", "Indien"),
];

/// Look up the display name of a machine key.
pub fn machine_name(key: &str) -> Option<&'static str> {
    MACHINES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Check if a machine key is one of the known presses.
pub fn is_known_machine(key: &str) -> bool {
    machine_name(key).is_some()
}

/// Constraints used by the laize optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaizeConfig {
    /// Minimum margin on each side, in mm.
    pub min_side_margin: f64,
    /// Maximum margin on each side, in mm.
    pub max_side_margin: f64,
    /// Gap between lanes, in mm.
    pub gap: f64,
    /// Rounding step for the web width, in mm.
    pub rounding: f64,
    /// Lane search ceiling (exclusive).
    pub max_lanes: u32,
}

impl Default for LaizeConfig {
    fn default() -> Self {
        Self {
            min_side_margin: MIN_SIDE_MARGIN_MM,
            max_side_margin: MAX_SIDE_MARGIN_MM,
            gap: LANE_GAP_MM,
            rounding: LAIZE_ROUNDING_MM,
            max_lanes: MAX_LANES,
        }
    }
}

impl LaizeConfig {
    /// Smallest total margin (both sides) a layout may have.
    pub fn min_total_margin(&self) -> f64 {
        self.min_side_margin * 2.0
    }

    /// Round a width up to the next stocked web width.
    pub fn round_up(&self, width: f64) -> f64 {
        (width / self.rounding).ceil() * self.rounding
    }

    /// Reject constraints the lane search cannot work with.
    pub fn check(&self) -> Result<()> {
        if !float_cmp::is_positive(self.min_side_margin) {
            return Err(OptimError::invalid(
                "min_side_margin",
                self.min_side_margin,
                "must be a positive number",
            ));
        }
        if !(self.max_side_margin.is_finite() && self.max_side_margin >= self.min_side_margin) {
            return Err(OptimError::invalid(
                "max_side_margin",
                self.max_side_margin,
                "must not be below the minimum side margin",
            ));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(OptimError::invalid("gap", self.gap, "must be zero or positive"));
        }
        if !float_cmp::is_positive(self.rounding) {
            return Err(OptimError::invalid(
                "rounding",
                self.rounding,
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    /// Check if two floats are within `tolerance` of each other.
    #[inline]
    pub fn within(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    /// Check if a value is finite and strictly positive.
    #[inline]
    pub fn is_positive(a: f64) -> bool {
        a.is_finite() && a > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_name_lookup() {
        assert_eq!(machine_name("bobst1"), Some("Bobst 01"));
        assert_eq!(machine_name("indien"), Some("Indien"));
        assert_eq!(machine_name("all"), None);
        assert!(!is_known_machine("heidelberg"));
    }

    #[test]
    fn test_laize_config_round_up() {
        let config = LaizeConfig::default();
        assert_eq!(config.round_up(116.0), 120.0);
        assert_eq!(config.round_up(220.0), 220.0);
        assert_eq!(config.round_up(324.0), 330.0);
        assert_eq!(config.min_total_margin(), 16.0);
    }

    #[test]
    fn test_laize_config_check() {
        assert!(LaizeConfig::default().check().is_ok());

        let no_gap = LaizeConfig {
            gap: 0.0,
            ..LaizeConfig::default()
        };
        assert!(no_gap.check().is_ok());

        let bad = [
            LaizeConfig {
                min_side_margin: 0.0,
                ..LaizeConfig::default()
            },
            LaizeConfig {
                max_side_margin: 5.0,
                ..LaizeConfig::default()
            },
            LaizeConfig {
                gap: -1.0,
                ..LaizeConfig::default()
            },
            LaizeConfig {
                rounding: f64::NAN,
                ..LaizeConfig::default()
            },
        ];
        for config in bad {
            let err = config.check().unwrap_err();
            assert!(matches!(err, OptimError::InvalidInput { .. }), "{:?}", config);
        }
    }

    #[test]
    fn test_float_cmp() {
        assert!(float_cmp::within(254.0, 80.0 * TOOTH_PITCH_MM, TOOTH_PITCH_TOLERANCE_MM));
        assert!(float_cmp::is_positive(0.01));
        assert!(!float_cmp::is_positive(0.0));
        assert!(!float_cmp::is_positive(f64::NAN));
        assert!(!float_cmp::is_positive(f64::INFINITY));
    }
}
