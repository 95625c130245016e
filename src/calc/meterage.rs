//! Linear meterage: material length needed for a label quantity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::float_cmp;
use crate::error::{OptimError, Result};

/// Message shown when no cylinder circumference is given.
pub const MSG_CYLINDER_REQUIRED: &str = "Veuillez sélectionner un cylindre.";

/// Message shown when the labels per revolution are missing or invalid.
pub const MSG_INVALID_LABELS_PER_REVOLUTION: &str = "Total d'étiquettes par tour invalide.";

/// Message shown when the desired quantity is missing or invalid.
pub const MSG_INVALID_QUANTITY: &str = "Quantité souhaitée invalide.";

/// Material needed to print a quantity of labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meterage {
    /// Cylinder revolutions (fractional).
    pub revolutions: f64,
    /// Web length in mm.
    pub length_mm: f64,
    /// Web length in metres.
    pub length_m: f64,
}

impl Meterage {
    fn from_inputs(quantity: u64, labels_per_revolution: u64, circumference: f64) -> Self {
        let revolutions = quantity as f64 / labels_per_revolution as f64;
        let length_mm = revolutions * circumference;
        Self {
            revolutions,
            length_mm,
            length_m: length_mm / 1000.0,
        }
    }
}

/// Compute the web length for `quantity` labels when each revolution of a
/// cylinder of `circumference` mm prints `labels_per_revolution` labels.
///
/// Every invalid input is reported at once, in one `Validation` error.
pub fn compute_meterage(
    quantity: u64,
    labels_per_revolution: u64,
    circumference: f64,
) -> Result<Meterage> {
    let mut errors = Vec::new();
    if !float_cmp::is_positive(circumference) {
        errors.push(MSG_CYLINDER_REQUIRED);
    }
    if labels_per_revolution == 0 {
        errors.push(MSG_INVALID_LABELS_PER_REVOLUTION);
    }
    if quantity == 0 {
        errors.push(MSG_INVALID_QUANTITY);
    }
    if !errors.is_empty() {
        return Err(OptimError::Validation(errors.join(" ")));
    }

    let meterage = Meterage::from_inputs(quantity, labels_per_revolution, circumference);
    debug!(
        "{} labels at {}/rev on {} mm: {:.2} revolutions, {:.2} m",
        quantity, labels_per_revolution, circumference, meterage.revolutions, meterage.length_m
    );
    Ok(meterage)
}

/// Parse raw form fields and compute the meterage.
///
/// Fields are checked in form order (cylinder, labels per revolution,
/// quantity) and all failures are reported together.
pub fn validate_meterage_inputs(
    quantity: &str,
    labels_per_revolution: &str,
    circumference: &str,
) -> Result<Meterage> {
    let circumference = circumference
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|c| float_cmp::is_positive(*c));
    let labels = labels_per_revolution
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0);
    let quantity = quantity.trim().parse::<u64>().ok().filter(|n| *n > 0);

    compute_meterage(
        quantity.unwrap_or(0),
        labels.unwrap_or(0),
        circumference.unwrap_or(0.0),
    )
}

/// Meterage chained from other calculators' outputs.
///
/// Any missing or non-positive input suppresses the result.
pub fn derive_meterage(
    quantity: Option<u64>,
    labels_per_revolution: Option<u64>,
    circumference: Option<f64>,
) -> Option<f64> {
    let quantity = quantity.filter(|q| *q > 0)?;
    let labels = labels_per_revolution.filter(|n| *n > 0)?;
    let circumference = circumference.filter(|c| float_cmp::is_positive(*c))?;
    Some(Meterage::from_inputs(quantity, labels, circumference).length_m)
}
