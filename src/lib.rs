//! label-optim - Cylinder, laize and meterage optimizer for rotary label presses.
//!
//! Given a label size and a catalog of print cylinders, this library picks the
//! cylinder that wastes the least material around its circumference, lays out
//! as many lanes as fit across the web, and derives the linear web length a
//! production run needs.
//!
//! # Example
//!
//! ```no_run
//! use label_optim_rs::{run_study, render_report, CylinderCatalog, StudyRequest};
//!
//! let catalog = CylinderCatalog::seed().unwrap();
//! let request = StudyRequest {
//!     label_width: "55".to_string(),
//!     label_length: "100".to_string(),
//!     quantity: "10000".to_string(),
//!     ..StudyRequest::default()
//! };
//! let workbench = run_study(catalog, &request).unwrap();
//! println!("{}", render_report(workbench.report(), None));
//! ```

pub mod calc;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod validation;
pub mod workbench;

use serde::{Deserialize, Serialize};

// Re-exports for convenience
pub use calc::{compute_meterage, optimize_laize, optimize_laize_with, select_cylinder, Meterage};
pub use catalog::CylinderCatalog;
pub use config::{LaizeConfig, DEFAULT_MAX_LAIZE_MM};
pub use error::{ErrorCode, OptimError, Result};
pub use model::{Cylinder, FitBand, FitResult, LaizeLayout, MachineFilter, Selection};
pub use report::{render_optimal, render_report, render_selection, ReportState};
pub use validation::{validate_catalog, validate_cylinder, ValidationResult};
pub use workbench::Workbench;

/// Raw inputs of a complete production study, as an operator would type them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRequest {
    pub study_name: String,
    pub label_width: String,
    /// Empty skips the laize calculation.
    pub label_length: String,
    pub max_width: String,
    /// Machine key, empty or `all` for every machine.
    pub machine: String,
    /// Empty skips the meterage.
    pub quantity: String,
}

impl Default for StudyRequest {
    fn default() -> Self {
        Self {
            study_name: String::new(),
            label_width: String::new(),
            label_length: String::new(),
            max_width: DEFAULT_MAX_LAIZE_MM.to_string(),
            machine: String::new(),
            quantity: String::new(),
        }
    }
}

/// Run a full study over a catalog.
///
/// This is the main high-level function that performs the whole pipeline:
/// 1. Apply the machine filter
/// 2. Select the cylinder for the label width
/// 3. Compute the laize when a label length is given
/// 4. Set the quantity so the report derives the meterage
///
/// The returned workbench holds the ranked cylinders and the report.
pub fn run_study(catalog: CylinderCatalog, request: &StudyRequest) -> Result<Workbench> {
    run_study_with(catalog, request, LaizeConfig::default())
}

/// Run a full study with custom laize margins and gap.
pub fn run_study_with(
    catalog: CylinderCatalog,
    request: &StudyRequest,
    laize_config: LaizeConfig,
) -> Result<Workbench> {
    laize_config.check()?;
    let mut workbench = Workbench::new(catalog).with_laize_config(laize_config);

    workbench.set_study_name(&request.study_name);
    workbench.set_machine_filter(MachineFilter::parse(&request.machine))?;
    workbench.calculate(&request.label_width)?;

    match workbench.selection().optimal.as_ref() {
        Some(fit) => tracing::info!("Recommended cylinder: {}", fit.name),
        None => tracing::warn!("No cylinder in the optimal band"),
    }

    if !request.label_length.trim().is_empty() {
        if workbench
            .compute_laize(&request.label_length, &request.max_width)?
            .is_none()
        {
            tracing::warn!(
                "No laize fits {} mm labels within {} mm",
                request.label_length.trim(),
                request.max_width.trim()
            );
        }
    }

    if !request.quantity.trim().is_empty() {
        validation::parse_positive_u64("quantity", &request.quantity)?;
        workbench.set_quantity(&request.quantity);
    }

    Ok(workbench)
}
