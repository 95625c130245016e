//! Report snapshot and the events that update it.
//!
//! `ReportState` is immutable: every event produces a new snapshot, and the
//! meterage is recomputed from scratch each time from whatever inputs the
//! snapshot holds. A missing input always yields no meterage rather than a
//! partial value.

use serde::{Deserialize, Serialize};

use crate::calc::derive_meterage;
use crate::model::{Cylinder, FitResult, LaizeLayout, MachineFilter};

/// Raw operator inputs echoed in the report, as typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportInputs {
    pub label_width: String,
    pub label_length: String,
    pub machine_filter: MachineFilter,
    pub desired_quantity: String,
    pub study_name: String,
}

/// Something the operator did that affects the report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    /// A cylinder calculation ran; the recommended pick becomes the report
    /// cylinder and the desired quantity is reset.
    SelectionComputed {
        optimal: Option<FitResult>,
        cylinder: Option<Cylinder>,
        label_width: String,
        machine_filter: MachineFilter,
    },
    /// The operator picked a row of the ranked list.
    CylinderSelected {
        fit: FitResult,
        cylinder: Option<Cylinder>,
    },
    /// A laize calculation ran (or failed, with `layout: None`).
    LaizeComputed {
        layout: Option<LaizeLayout>,
        label_length: String,
    },
    /// The desired quantity field changed.
    QuantityChanged(String),
    /// The study name changed.
    StudyNamed(String),
    /// The machine filter changed.
    MachineFilterChanged(MachineFilter),
}

/// Latest calculator outputs plus the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportState {
    cylinder_fit: Option<FitResult>,
    cylinder: Option<Cylinder>,
    laize: Option<LaizeLayout>,
    meterage_m: Option<f64>,
    inputs: ReportInputs,
}

impl ReportState {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the snapshot that follows `event`.
    pub fn apply(&self, event: ReportEvent) -> Self {
        let mut next = self.clone();

        match event {
            ReportEvent::SelectionComputed {
                optimal,
                cylinder,
                label_width,
                machine_filter,
            } => {
                next.cylinder_fit = optimal;
                next.cylinder = cylinder;
                next.inputs.label_width = label_width;
                next.inputs.machine_filter = machine_filter;
                next.inputs.desired_quantity.clear();
            }
            ReportEvent::CylinderSelected { fit, cylinder } => {
                next.cylinder_fit = Some(fit);
                next.cylinder = cylinder;
            }
            ReportEvent::LaizeComputed {
                layout,
                label_length,
            } => {
                next.laize = layout;
                next.inputs.label_length = label_length;
            }
            ReportEvent::QuantityChanged(quantity) => {
                next.inputs.desired_quantity = quantity;
            }
            ReportEvent::StudyNamed(name) => {
                next.inputs.study_name = name;
            }
            ReportEvent::MachineFilterChanged(filter) => {
                next.inputs.machine_filter = filter;
            }
        }

        next.meterage_m = next.derived_meterage();
        next
    }

    /// Fit of the report cylinder.
    pub fn cylinder_fit(&self) -> Option<&FitResult> {
        self.cylinder_fit.as_ref()
    }

    /// Catalog record of the report cylinder.
    pub fn cylinder(&self) -> Option<&Cylinder> {
        self.cylinder.as_ref()
    }

    /// Latest laize layout.
    pub fn laize(&self) -> Option<&LaizeLayout> {
        self.laize.as_ref()
    }

    /// Web length in metres, when every input is present.
    pub fn meterage(&self) -> Option<f64> {
        self.meterage_m
    }

    /// Raw input echoes.
    pub fn inputs(&self) -> &ReportInputs {
        &self.inputs
    }

    /// Check if there is anything to report.
    pub fn has_data(&self) -> bool {
        self.cylinder_fit.is_some() || self.laize.is_some()
    }

    /// Labels printed per cylinder revolution across every lane.
    pub fn total_labels_per_revolution(&self) -> Option<u64> {
        let fit = self.cylinder_fit.as_ref()?;
        let laize = self.laize.as_ref()?;
        fit.labels_per_revolution.checked_mul(u64::from(laize.lanes))
    }

    /// Desired quantity, when it is a positive whole number.
    pub fn desired_quantity(&self) -> Option<u64> {
        self.inputs
            .desired_quantity
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|q| *q > 0)
    }

    fn derived_meterage(&self) -> Option<f64> {
        derive_meterage(
            self.desired_quantity(),
            self.total_labels_per_revolution(),
            self.cylinder.as_ref().map(|c| c.circumference),
        )
    }
}
