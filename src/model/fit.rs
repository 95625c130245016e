//! Fit of a label width around a cylinder, and its waste classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    ACCEPTABLE_WASTE_MIN_MM, INEFFICIENT_WASTE_ABOVE_MM, OPTIMAL_WASTE_MAX_MM,
    OPTIMAL_WASTE_MIN_MM,
};
use crate::model::Cylinder;

/// Waste classification of a fit, in display/sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FitBand {
    /// Waste per label within [3, 8] mm.
    Optimal = 1,
    /// Waste per label within [1.5, 3) mm.
    Acceptable = 2,
    /// Waste per label below 1.5 mm or above 20 mm.
    Inefficient = 3,
    /// Anything else (8 < K <= 20).
    Other = 4,
}

impl FitBand {
    /// Classify a waste-per-label value.
    pub fn classify(waste_per_label: f64) -> Self {
        let k = waste_per_label;
        if (OPTIMAL_WASTE_MIN_MM..=OPTIMAL_WASTE_MAX_MM).contains(&k) {
            FitBand::Optimal
        } else if (ACCEPTABLE_WASTE_MIN_MM..OPTIMAL_WASTE_MIN_MM).contains(&k) {
            FitBand::Acceptable
        } else if k > INEFFICIENT_WASTE_ABOVE_MM || k < ACCEPTABLE_WASTE_MIN_MM {
            FitBand::Inefficient
        } else {
            FitBand::Other
        }
    }

    /// Sort group, 1 (best) to 4.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Legend shown next to the results table.
    pub fn label(self) -> &'static str {
        match self {
            FitBand::Optimal => "Optimal (3-8mm)",
            FitBand::Acceptable => "Acceptable (1.5-3mm)",
            FitBand::Inefficient => "Inefficace (<1.5 ou >20mm)",
            FitBand::Other => "Autre",
        }
    }

    /// All bands in display order.
    pub fn all() -> [FitBand; 4] {
        [
            FitBand::Optimal,
            FitBand::Acceptable,
            FitBand::Inefficient,
            FitBand::Other,
        ]
    }
}

impl fmt::Display for FitBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitBand::Optimal => "optimal",
            FitBand::Acceptable => "acceptable",
            FitBand::Inefficient => "inefficient",
            FitBand::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// How many labels of a given width fit around one cylinder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Cylinder name.
    pub name: String,
    /// Cylinder circumference in mm.
    pub circumference: f64,
    /// Whole labels per revolution (I).
    pub labels_per_revolution: u64,
    /// Circumference covered by those labels (J).
    pub used_width: f64,
    /// Leftover circumference per revolution.
    pub waste_per_revolution: f64,
    /// Leftover per label (K); zero when no label fits.
    pub waste_per_label: f64,
}

impl FitResult {
    /// Fit labels of `label_width` mm around `cylinder`.
    ///
    /// `label_width` must be positive; callers validate it beforehand.
    pub fn compute(cylinder: &Cylinder, label_width: f64) -> Self {
        let circumference = cylinder.circumference;
        let labels = if label_width > 0.0 {
            (circumference / label_width).floor() as u64
        } else {
            0
        };
        let used_width = labels as f64 * label_width;
        // Rounding can leave a tiny negative remainder when the width divides exactly.
        let waste_per_revolution = (circumference - used_width).max(0.0);
        let waste_per_label = if labels > 0 {
            waste_per_revolution / labels as f64
        } else {
            0.0
        };

        Self {
            name: cylinder.name.clone(),
            circumference,
            labels_per_revolution: labels,
            used_width,
            waste_per_revolution,
            waste_per_label,
        }
    }

    /// Waste classification of this fit.
    pub fn band(&self) -> FitBand {
        FitBand::classify(self.waste_per_label)
    }

    /// Check if this fit can be recommended.
    pub fn is_optimal(&self) -> bool {
        self.labels_per_revolution > 0 && self.band() == FitBand::Optimal
    }
}

/// Ranked fits plus the recommended one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// All fits, best band first, then ascending waste per label.
    pub ranked: Vec<FitResult>,
    /// Smallest optimal-band fit, if any.
    pub optimal: Option<FitResult>,
}

impl Selection {
    /// Find a ranked fit by cylinder name.
    pub fn find(&self, name: &str) -> Option<&FitResult> {
        self.ranked
            .iter()
            .find(|fit| crate::model::names_match(&fit.name, name))
    }

    /// Check if any cylinder was evaluated.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
