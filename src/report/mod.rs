//! Study report: snapshot state and text rendering.

mod format;
mod render;
mod state;

pub use format::{format_decimal_fr, format_grouped};
pub use render::{render_optimal, render_report, render_selection};
pub use state::{ReportEvent, ReportInputs, ReportState};
