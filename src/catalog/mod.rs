//! Cylinder catalog and its built-in seed data.

mod seed;
mod store;

pub use seed::{seed_cylinders, SEED_JSON};
pub use store::CylinderCatalog;
