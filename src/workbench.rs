//! Operator session: catalog, current calculation and report.
//!
//! Every catalog or filter change re-runs the cylinder selection with the
//! stored label width once a calculation has happened, so the ranked list
//! and the report never show results computed against a stale catalog.

use tracing::{debug, info};

use crate::calc::{optimize_laize_with, select_cylinder};
use crate::catalog::CylinderCatalog;
use crate::config::LaizeConfig;
use crate::error::{OptimError, Result};
use crate::model::{Cylinder, FitResult, LaizeLayout, MachineFilter, Selection};
use crate::report::{ReportEvent, ReportState};
use crate::validation::parse_positive_f64;

/// Label width of the last successful calculation.
#[derive(Debug, Clone, PartialEq)]
struct LabelWidth {
    raw: String,
    value: f64,
}

/// A single operator's working session.
#[derive(Debug, Clone)]
pub struct Workbench {
    catalog: CylinderCatalog,
    machine_filter: MachineFilter,
    laize_config: LaizeConfig,
    label_width: Option<LabelWidth>,
    selection: Selection,
    manual_pick: Option<FitResult>,
    report: ReportState,
}

impl Workbench {
    /// Start a session over a catalog.
    pub fn new(catalog: CylinderCatalog) -> Self {
        Self {
            catalog,
            machine_filter: MachineFilter::All,
            laize_config: LaizeConfig::default(),
            label_width: None,
            selection: Selection::default(),
            manual_pick: None,
            report: ReportState::new(),
        }
    }

    /// Use custom laize constraints.
    pub fn with_laize_config(mut self, config: LaizeConfig) -> Self {
        self.laize_config = config;
        self
    }

    pub fn catalog(&self) -> &CylinderCatalog {
        &self.catalog
    }

    pub fn machine_filter(&self) -> &MachineFilter {
        &self.machine_filter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn report(&self) -> &ReportState {
        &self.report
    }

    /// The cylinder retained for the report: the operator's pick, else the
    /// recommended one.
    pub fn active_cylinder(&self) -> Option<&FitResult> {
        self.manual_pick
            .as_ref()
            .or(self.selection.optimal.as_ref())
    }

    /// Run the cylinder calculation for a label width typed by the operator.
    ///
    /// An invalid width clears the ranked list and leaves the report as is.
    pub fn calculate(&mut self, raw_label_width: &str) -> Result<&Selection> {
        let value = match parse_positive_f64("label_width", raw_label_width) {
            Ok(value) => value,
            Err(e) => {
                self.label_width = None;
                self.selection = Selection::default();
                self.manual_pick = None;
                return Err(e);
            }
        };

        self.label_width = Some(LabelWidth {
            raw: raw_label_width.trim().to_string(),
            value,
        });
        self.run_selection()?;
        Ok(&self.selection)
    }

    /// Change the machine filter, re-running the calculation if one exists.
    pub fn set_machine_filter(&mut self, filter: MachineFilter) -> Result<()> {
        debug!("Machine filter set to {}", filter);
        self.machine_filter = filter.clone();
        self.report = self.report.apply(ReportEvent::MachineFilterChanged(filter));
        self.run_selection()
    }

    /// Add a cylinder, or replace `original_name` when editing.
    pub fn save_cylinder(&mut self, cylinder: Cylinder, original_name: Option<&str>) -> Result<()> {
        match original_name {
            Some(original) => self.catalog.update(original, cylinder)?,
            None => self.catalog.add(cylinder)?,
        }
        self.run_selection()
    }

    /// Delete a cylinder. Deleting an unknown name is not an error.
    pub fn delete_cylinder(&mut self, name: &str) -> Result<bool> {
        let removed = self.catalog.remove(name);
        self.run_selection()?;
        Ok(removed)
    }

    /// Retain a row of the ranked list for the report.
    pub fn select_cylinder(&mut self, name: &str) -> Result<()> {
        let fit = self
            .selection
            .find(name)
            .cloned()
            .ok_or_else(|| OptimError::NotFound {
                name: name.to_string(),
            })?;
        let cylinder = self.catalog.get(&fit.name).cloned();

        info!("Cylinder {} retained for the report", fit.name);
        self.manual_pick = Some(fit.clone());
        self.report = self
            .report
            .apply(ReportEvent::CylinderSelected { fit, cylinder });
        Ok(())
    }

    /// Run the laize calculation for raw operator input.
    ///
    /// Invalid input clears the laize from the report and is returned.
    pub fn compute_laize(
        &mut self,
        raw_label_length: &str,
        raw_max_width: &str,
    ) -> Result<Option<LaizeLayout>> {
        let parsed = parse_positive_f64("label_length", raw_label_length).and_then(|length| {
            parse_positive_f64("max_width", raw_max_width).map(|max| (length, max))
        });

        let layout = match parsed {
            Ok((length, max_width)) => optimize_laize_with(&self.laize_config, length, max_width),
            Err(e) => Err(e),
        };

        let event_layout = layout.as_ref().ok().copied().flatten();
        self.report = self.report.apply(ReportEvent::LaizeComputed {
            layout: event_layout,
            label_length: raw_label_length.trim().to_string(),
        });
        layout
    }

    /// Update the desired quantity used for the report meterage.
    pub fn set_quantity(&mut self, raw_quantity: &str) {
        self.report = self
            .report
            .apply(ReportEvent::QuantityChanged(raw_quantity.trim().to_string()));
    }

    /// Name the study.
    pub fn set_study_name(&mut self, name: &str) {
        self.report = self
            .report
            .apply(ReportEvent::StudyNamed(name.to_string()));
    }

    /// Re-run the selection with the stored width. Does nothing until a
    /// calculation has succeeded.
    fn run_selection(&mut self) -> Result<()> {
        let Some(width) = self.label_width.clone() else {
            return Ok(());
        };

        let candidates = self.catalog.filter_by_machine(&self.machine_filter);
        self.selection = select_cylinder(width.value, &candidates)?;
        self.manual_pick = None;

        let optimal = self.selection.optimal.clone();
        let cylinder = optimal
            .as_ref()
            .and_then(|fit| self.catalog.get(&fit.name))
            .cloned();

        self.report = self.report.apply(ReportEvent::SelectionComputed {
            optimal,
            cylinder,
            label_width: width.raw,
            machine_filter: self.machine_filter.clone(),
        });
        Ok(())
    }
}
