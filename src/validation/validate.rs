//! Validation of operator input and cylinder records.

use std::collections::BTreeSet;

use crate::config::{float_cmp, is_known_machine, TOOTH_PITCH_TOLERANCE_MM};
use crate::error::{OptimError, Result};
use crate::model::{names_match, Cylinder};

/// Message shown when a cylinder form has an empty field.
pub const MSG_FIELDS_REQUIRED: &str = "Tous les champs sont requis.";

/// Message shown when a cylinder is not assigned to any press.
pub const MSG_MACHINE_REQUIRED: &str = "Veuillez assigner le cylindre à au moins une machine.";

/// Message shown when a cylinder's dimension or tooth count is not positive.
pub const MSG_POSITIVE_DIMENSIONS: &str =
    "Les dimensions et le nombre de dents doivent être des nombres positifs.";

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }

    /// Turn a failed result into an error, joining its messages.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.passed {
            Ok(self.warnings)
        } else {
            Err(OptimError::Validation(self.errors.join(" ")))
        }
    }
}

/// Parse a strictly positive real number typed by the operator.
pub fn parse_positive_f64(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| OptimError::invalid(field, raw, "not a number"))?;
    if !float_cmp::is_positive(value) {
        return Err(OptimError::invalid(field, raw, "must be a positive number"));
    }
    Ok(value)
}

/// Parse a real number typed by the operator that may be zero.
pub fn parse_non_negative_f64(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| OptimError::invalid(field, raw, "not a number"))?;
    if !(value.is_finite() && value >= 0.0) {
        return Err(OptimError::invalid(field, raw, "must be zero or positive"));
    }
    Ok(value)
}

/// Parse a strictly positive integer typed by the operator.
pub fn parse_positive_u64(field: &str, raw: &str) -> Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| OptimError::invalid(field, raw, "not a whole number"))?;
    if value == 0 {
        return Err(OptimError::invalid(field, raw, "must be a positive number"));
    }
    Ok(value)
}

/// Parse a strictly positive `u32` typed by the operator.
pub fn parse_positive_u32(field: &str, raw: &str) -> Result<u32> {
    let value = parse_positive_u64(field, raw)?;
    u32::try_from(value).map_err(|_| OptimError::invalid(field, raw, "value too large"))
}

/// Check an already-typed positive real.
pub fn require_positive(field: &str, value: f64) -> Result<f64> {
    if float_cmp::is_positive(value) {
        Ok(value)
    } else {
        Err(OptimError::invalid(field, value, "must be a positive number"))
    }
}

/// Validate a single cylinder record.
pub fn validate_cylinder(cylinder: &Cylinder) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let label = if cylinder.name.trim().is_empty() {
        "<sans nom>"
    } else {
        cylinder.name.as_str()
    };

    if cylinder.name.trim().is_empty() {
        result.add_error("Cylinder name is empty");
    }

    if cylinder.reference_code.trim().is_empty() {
        result.add_error(format!("Cylinder {}: reference code is empty", label));
    }

    if !float_cmp::is_positive(cylinder.circumference) || cylinder.tooth_count == 0 {
        result.add_error(format!(
            "Cylinder {}: invalid dimensions ({} mm, {} teeth)",
            label, cylinder.circumference, cylinder.tooth_count
        ));
    } else if !float_cmp::within(
        cylinder.circumference,
        cylinder.nominal_circumference(),
        TOOTH_PITCH_TOLERANCE_MM,
    ) {
        result.add_warning(format!(
            "Cylinder {}: circumference {:.2} mm does not match {} teeth ({:.2} mm)",
            label,
            cylinder.circumference,
            cylinder.tooth_count,
            cylinder.nominal_circumference()
        ));
    }

    if cylinder.machines.is_empty() {
        result.add_error(format!("Cylinder {}: not assigned to any machine", label));
    }

    for key in &cylinder.machines {
        if !is_known_machine(key) {
            result.add_warning(format!("Cylinder {}: unknown machine '{}'", label, key));
        }
    }

    result
}

/// Validate a full catalog, including name uniqueness.
pub fn validate_catalog(cylinders: &[Cylinder]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for cylinder in cylinders {
        result.merge(validate_cylinder(cylinder));
    }

    for (i, a) in cylinders.iter().enumerate() {
        if cylinders[..i].iter().any(|b| names_match(&a.name, &b.name)) {
            result.add_error(format!("Duplicate cylinder name: {}", a.name));
        }
    }

    result
}

/// Raw cylinder form fields, as typed by the operator.
#[derive(Debug, Clone, Default)]
pub struct CylinderDraft {
    pub name: String,
    pub circumference: String,
    pub tooth_count: String,
    pub reference_code: String,
    pub machines: Vec<String>,
}

impl CylinderDraft {
    /// Prefill a draft from an existing cylinder (edit form).
    pub fn from_cylinder(cylinder: &Cylinder) -> Self {
        Self {
            name: cylinder.name.clone(),
            circumference: cylinder.circumference.to_string(),
            tooth_count: cylinder.tooth_count.to_string(),
            reference_code: cylinder.reference_code.clone(),
            machines: cylinder.machines.iter().cloned().collect(),
        }
    }

    /// Convert the form into a cylinder, with the form's error messages.
    pub fn into_cylinder(self) -> Result<Cylinder> {
        let required = [
            &self.name,
            &self.circumference,
            &self.tooth_count,
            &self.reference_code,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(OptimError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }

        let machines: BTreeSet<String> = self
            .machines
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if machines.is_empty() {
            return Err(OptimError::Validation(MSG_MACHINE_REQUIRED.to_string()));
        }

        let circumference = parse_positive_f64("circumference", &self.circumference);
        let tooth_count = parse_positive_u32("tooth_count", &self.tooth_count);
        let (circumference, tooth_count) = match (circumference, tooth_count) {
            (Ok(c), Ok(t)) => (c, t),
            _ => return Err(OptimError::Validation(MSG_POSITIVE_DIMENSIONS.to_string())),
        };

        Ok(Cylinder {
            name: self.name,
            circumference,
            tooth_count,
            reference_code: self.reference_code,
            machines,
        })
    }
}
