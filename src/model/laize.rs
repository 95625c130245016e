//! Multi-lane layout across the web width.

use serde::{Deserialize, Serialize};

/// Lanes printed side by side on a stocked web width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaizeLayout {
    /// Number of label lanes (poses).
    pub lanes: u32,
    /// Web width in mm, a multiple of the rounding step.
    pub total_width: f64,
    /// Margin left on each side, in mm.
    pub side_margin: f64,
}

impl LaizeLayout {
    /// Create a new layout.
    pub fn new(lanes: u32, total_width: f64, side_margin: f64) -> Self {
        Self {
            lanes,
            total_width,
            side_margin,
        }
    }
}
