//! Data model types for cylinder and laize optimization.

mod cylinder;
mod fit;
mod laize;
mod machine;

pub use cylinder::{names_match, Cylinder};
pub use fit::{FitBand, FitResult, Selection};
pub use laize::LaizeLayout;
pub use machine::MachineFilter;
