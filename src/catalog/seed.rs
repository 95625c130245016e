//! Workshop cylinder list shipped with the tool.

use crate::error::Result;
use crate::model::Cylinder;

/// The seed catalog, as JSON.
pub const SEED_JSON: &str = include_str!("../../data/cylinders.json");

/// Parse the seed catalog, in file order.
pub fn seed_cylinders() -> Result<Vec<Cylinder>> {
    Ok(serde_json::from_str(SEED_JSON)?)
}
