//! Press selection used to narrow the cylinder catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{machine_name, ALL_MACHINES_KEY, ALL_MACHINES_LABEL};

/// Which presses the operator is working with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineFilter {
    /// Every press.
    #[default]
    All,
    /// A single press, by key.
    Machine(String),
}

impl MachineFilter {
    /// Parse a filter key; `"all"` and the empty string select every press.
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == ALL_MACHINES_KEY {
            MachineFilter::All
        } else {
            MachineFilter::Machine(key.to_string())
        }
    }

    /// The key as typed by the operator.
    pub fn key(&self) -> &str {
        match self {
            MachineFilter::All => ALL_MACHINES_KEY,
            MachineFilter::Machine(key) => key,
        }
    }

    /// Display name; unknown keys fall back to the all-machines label.
    pub fn display_name(&self) -> &'static str {
        match self {
            MachineFilter::All => ALL_MACHINES_LABEL,
            MachineFilter::Machine(key) => machine_name(key).unwrap_or(ALL_MACHINES_LABEL),
        }
    }

    /// Check if a cylinder's machine set passes this filter.
    pub fn accepts<'a>(&self, mut machines: impl Iterator<Item = &'a String>) -> bool {
        match self {
            MachineFilter::All => true,
            MachineFilter::Machine(key) => machines.any(|m| m == key),
        }
    }
}

impl From<String> for MachineFilter {
    fn from(s: String) -> Self {
        MachineFilter::parse(&s)
    }
}

impl From<MachineFilter> for String {
    fn from(filter: MachineFilter) -> Self {
        filter.key().to_string()
    }
}

impl fmt::Display for MachineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
