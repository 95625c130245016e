//! Laize (web width) optimization.

use tracing::debug;

use crate::config::LaizeConfig;
use crate::error::Result;
use crate::model::LaizeLayout;
use crate::validation::require_positive;

/// Find the layout with the most lanes that fits within `max_width`, using
/// the default margins and gap.
pub fn optimize_laize(label_length: f64, max_width: f64) -> Result<Option<LaizeLayout>> {
    optimize_laize_with(&LaizeConfig::default(), label_length, max_width)
}

/// Find the layout with the most lanes that fits within `max_width`.
///
/// Lanes are tried from one upwards. For each count the web is rounded up
/// to the next stocked width that leaves at least the minimum margin on both
/// sides. The search stops as soon as that width exceeds `max_width`, since
/// widths only grow with more lanes. A count is kept when its side margin
/// also stays under the maximum; the last one kept wins.
pub fn optimize_laize_with(
    config: &LaizeConfig,
    label_length: f64,
    max_width: f64,
) -> Result<Option<LaizeLayout>> {
    config.check()?;
    let label_length = require_positive("label_length", label_length)?;
    let max_width = require_positive("max_width", max_width)?;

    let mut best: Option<LaizeLayout> = None;

    for lanes in 1..config.max_lanes {
        let gaps = lanes.saturating_sub(1) as f64 * config.gap;
        let base_width = lanes as f64 * label_length + gaps;
        let rounded = config.round_up(base_width + config.min_total_margin());

        if rounded > max_width {
            break;
        }

        let side_margin = (rounded - base_width) / 2.0;
        if side_margin >= config.min_side_margin && side_margin <= config.max_side_margin {
            best = Some(LaizeLayout::new(lanes, rounded, side_margin));
        }
    }

    match &best {
        Some(layout) => debug!(
            "Label length {} mm, max laize {} mm: {} lane(s) on {} mm (margin {} mm)",
            label_length, max_width, layout.lanes, layout.total_width, layout.side_margin
        ),
        None => debug!(
            "Label length {} mm, max laize {} mm: no layout",
            label_length, max_width
        ),
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_layout() {
        // n=1 -> 120 mm (margin 10), n=2 -> 220 mm (margin 8),
        // n=3 -> 330 mm (margin 11), n=4 -> 430 mm > 330, stop.
        let layout = optimize_laize(100.0, 330.0).unwrap();
        assert_eq!(layout, Some(LaizeLayout::new(3, 330.0, 11.0)));
    }

    #[test]
    fn test_keeps_scanning_past_first_hit() {
        let layout = optimize_laize(100.0, 250.0).unwrap().unwrap();
        assert_eq!(layout.lanes, 2);
        assert_eq!(layout.total_width, 220.0);
        assert_eq!(layout.side_margin, 8.0);
    }

    #[test]
    fn test_first_lane_too_wide() {
        // 100 + 16 = 116 -> 120 mm > 110 mm
        assert_eq!(optimize_laize(100.0, 110.0).unwrap(), None);
    }

    #[test]
    fn test_margins_never_exceed_band() {
        for length in [20.0, 33.3, 45.0, 58.5, 72.0, 99.0, 150.0] {
            if let Some(layout) = optimize_laize(length, 330.0).unwrap() {
                assert!(layout.side_margin >= 8.0 && layout.side_margin <= 15.0);
                assert!(layout.total_width <= 330.0);
                assert_eq!(layout.total_width % 10.0, 0.0);
                let printed = layout.lanes as f64 * length + (layout.lanes - 1) as f64 * 4.0;
                assert!((layout.total_width - 2.0 * layout.side_margin - printed).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_small_labels_many_lanes() {
        // 20 mm labels: base = 24n - 4, rounded = ceil((24n + 12) / 10) * 10
        // n=13: base 308, min 324 -> 330, margin 11 -> best under 330
        let layout = optimize_laize(20.0, 330.0).unwrap().unwrap();
        assert_eq!(layout.lanes, 13);
        assert_eq!(layout.total_width, 330.0);
        assert_eq!(layout.side_margin, 11.0);
    }

    #[test]
    fn test_custom_config() {
        let config = LaizeConfig {
            gap: 0.0,
            ..LaizeConfig::default()
        };
        // 100 mm labels, no gap: n=3 -> base 300, min 316 -> 320, margin 10
        let layout = optimize_laize_with(&config, 100.0, 330.0).unwrap().unwrap();
        assert_eq!(layout, LaizeLayout::new(3, 320.0, 10.0));
    }

    #[test]
    fn test_lane_ceiling() {
        let config = LaizeConfig {
            max_lanes: 3,
            ..LaizeConfig::default()
        };
        let layout = optimize_laize_with(&config, 100.0, 330.0).unwrap().unwrap();
        assert_eq!(layout.lanes, 2);
    }

    #[test]
    fn test_rejects_inverted_margins() {
        let config = LaizeConfig {
            min_side_margin: 12.0,
            max_side_margin: 10.0,
            ..LaizeConfig::default()
        };
        let err = optimize_laize_with(&config, 100.0, 330.0).unwrap_err();
        assert!(matches!(err, OptimError::InvalidInput { ref field, .. } if field == "max_side_margin"));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            optimize_laize(0.0, 330.0),
            Err(OptimError::InvalidInput { .. })
        ));
        assert!(matches!(
            optimize_laize(100.0, -1.0),
            Err(OptimError::InvalidInput { .. })
        ));
    }
}
