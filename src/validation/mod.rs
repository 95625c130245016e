//! Input parsing and record validation.

mod validate;

pub use validate::*;
