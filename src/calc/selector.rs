//! Cylinder selection for a given label width.

use tracing::debug;

use crate::error::Result;
use crate::model::{Cylinder, FitResult, Selection};
use crate::validation::require_positive;

/// Fit `label_width` around every candidate, rank the fits and pick the
/// recommended cylinder.
///
/// The recommended cylinder is the one with the smallest waste per label
/// inside the optimal band; the first one encountered wins a tie. Cylinders
/// too small for a single label are never recommended.
pub fn select_cylinder(label_width: f64, cylinders: &[Cylinder]) -> Result<Selection> {
    let label_width = require_positive("label_width", label_width)?;

    let mut optimal: Option<FitResult> = None;
    let mut fits = Vec::with_capacity(cylinders.len());

    for cylinder in cylinders {
        let fit = FitResult::compute(cylinder, label_width);

        let better = optimal
            .as_ref()
            .map_or(true, |best| fit.waste_per_label < best.waste_per_label);
        if fit.is_optimal() && better {
            optimal = Some(fit.clone());
        }

        fits.push(fit);
    }

    let ranked = rank_fits(fits);

    match &optimal {
        Some(fit) => debug!(
            "Label width {} mm: {} cylinder(s), optimal {} (K={:.3})",
            label_width,
            ranked.len(),
            fit.name,
            fit.waste_per_label
        ),
        None => debug!(
            "Label width {} mm: {} cylinder(s), no optimal cylinder",
            label_width,
            ranked.len()
        ),
    }

    Ok(Selection { ranked, optimal })
}

/// Sort fits by band, then by ascending waste per label. Stable.
pub fn rank_fits(mut fits: Vec<FitResult>) -> Vec<FitResult> {
    fits.sort_by(|a, b| {
        a.band()
            .rank()
            .cmp(&b.band().rank())
            .then(a.waste_per_label.total_cmp(&b.waste_per_label))
    });
    fits
}
