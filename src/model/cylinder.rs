//! Rotary print cylinder definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::TOOTH_PITCH_MM;

/// A rotary print cylinder available on one or more presses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cylinder {
    /// Unique display name (compared case-insensitively).
    pub name: String,
    /// Developed circumference in mm (the "A" dimension).
    pub circumference: f64,
    /// Number of gear teeth (the "B" value).
    pub tooth_count: u32,
    /// Workshop reference code (the "C" value), e.g. `Z128`.
    pub reference_code: String,
    /// Keys of the presses this cylinder can be mounted on.
    pub machines: BTreeSet<String>,
}

impl Cylinder {
    /// Create a new cylinder with no machine assignment.
    pub fn new(
        name: impl Into<String>,
        circumference: f64,
        tooth_count: u32,
        reference_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            circumference,
            tooth_count,
            reference_code: reference_code.into(),
            machines: BTreeSet::new(),
        }
    }

    /// Assign the cylinder to a press.
    pub fn with_machine(mut self, key: impl Into<String>) -> Self {
        self.machines.insert(key.into());
        self
    }

    /// Check if the cylinder can be mounted on the given press.
    pub fn runs_on(&self, machine_key: &str) -> bool {
        self.machines.contains(machine_key)
    }

    /// Check if this cylinder is identified by `name`.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Circumference implied by the tooth count.
    pub fn nominal_circumference(&self) -> f64 {
        self.tooth_count as f64 * TOOTH_PITCH_MM
    }
}

/// Case-insensitive comparison of cylinder names.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
