//! Calculators: cylinder selection, laize optimization, linear meterage.

mod laize;
mod meterage;
mod selector;

pub use laize::{optimize_laize, optimize_laize_with};
pub use meterage::{compute_meterage, derive_meterage, validate_meterage_inputs, Meterage};
pub use selector::{rank_fits, select_cylinder};
