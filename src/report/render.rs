//! Plain-text rendering of the study report and the ranked cylinder table.

use std::fmt::Write;

use crate::model::{names_match, FitResult, Selection};

use super::format::{format_decimal_fr, format_grouped};
use super::state::ReportState;

/// Render the study report.
///
/// `generated_at` is printed under the study name when given; the caller
/// chooses the clock and its formatting.
pub fn render_report(report: &ReportState, generated_at: Option<&str>) -> String {
    let mut output = String::new();

    if !report.has_data() {
        writeln!(output, "Rapport d'Étude").unwrap();
        writeln!(output, "Lancez un calcul pour voir le rapport de synthèse ici.").unwrap();
        return output;
    }

    let inputs = report.inputs();
    let study_name = inputs.study_name.trim();

    // Header
    writeln!(output, "Rapport d'Étude de Production").unwrap();
    writeln!(
        output,
        "{}",
        if study_name.is_empty() {
            "Nouvelle Étude"
        } else {
            study_name
        }
    )
    .unwrap();
    if let Some(stamp) = generated_at {
        writeln!(output, "{}", stamp).unwrap();
    }
    writeln!(output).unwrap();

    // Parameters
    writeln!(output, "Paramètres").unwrap();
    writeln!(output, "  Largeur Étiquette : {}", mm_or_dash(&inputs.label_width)).unwrap();
    writeln!(output, "  Longueur Étiquette : {}", mm_or_dash(&inputs.label_length)).unwrap();
    writeln!(output, "  Machine : {}", inputs.machine_filter.display_name()).unwrap();
    if !inputs.desired_quantity.trim().is_empty() {
        writeln!(output, "  Quantité Cible : {} étq.", quantity_text(report)).unwrap();
    }
    writeln!(output).unwrap();

    // Results
    let fit = report.cylinder_fit();
    let laize = report.laize();
    writeln!(output, "Résultats").unwrap();
    match report.cylinder() {
        Some(cyl) => writeln!(
            output,
            "  Cylindre : {} ({:.2} mm)",
            cyl.reference_code, cyl.circumference
        )
        .unwrap(),
        None => writeln!(output, "  Cylindre : -").unwrap(),
    }
    match fit {
        Some(fit) => writeln!(
            output,
            "  Poses / Cylindre : {} poses",
            fit.labels_per_revolution
        )
        .unwrap(),
        None => writeln!(output, "  Poses / Cylindre : -").unwrap(),
    }
    match laize {
        Some(layout) => {
            writeln!(output, "  Laize : {} mm", layout.total_width).unwrap();
            writeln!(output, "  Poses / Laize : {} poses", layout.lanes).unwrap();
        }
        None => {
            writeln!(output, "  Laize : -").unwrap();
            writeln!(output, "  Poses / Laize : -").unwrap();
        }
    }

    // Totals
    let total = report.total_labels_per_revolution();
    if let (Some(total), Some(fit), Some(layout)) = (total, fit, laize) {
        writeln!(output).unwrap();
        writeln!(output, "Total par Tour de Cylindre : {} étiquettes", total).unwrap();
        writeln!(
            output,
            "  ({} poses cylindre × {} poses laize)",
            fit.labels_per_revolution, layout.lanes
        )
        .unwrap();
    }
    if let Some(metres) = report.meterage() {
        if total.is_none() {
            writeln!(output).unwrap();
        }
        writeln!(
            output,
            "Métrage Linéaire Requis : {} m",
            format_decimal_fr(metres, 2)
        )
        .unwrap();
    }
    writeln!(output).unwrap();

    // Conclusion
    let reference = report
        .cylinder()
        .map(|c| c.reference_code.as_str())
        .unwrap_or("N/A");
    let width = laize
        .map(|l| l.total_width.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut conclusion = format!(
        "La configuration recommandée est le cylindre {} et une laize de {} mm.",
        reference, width
    );
    if let Some(total) = total {
        write!(
            conclusion,
            " Cela permet de produire {} étiquettes par tour de cylindre.",
            total
        )
        .unwrap();
    }
    if let Some(metres) = report.meterage() {
        write!(
            conclusion,
            " Pour produire {} étiquettes, il faudra {} mètres de matière.",
            quantity_text(report),
            format_decimal_fr(metres, 2)
        )
        .unwrap();
    }

    writeln!(output, "Conclusion").unwrap();
    writeln!(output, "  {}", conclusion).unwrap();

    output
}

/// Render the recommendation banner shown above the ranked table.
pub fn render_optimal(optimal: Option<&FitResult>) -> String {
    match optimal {
        Some(fit) => format!(
            "Cylindre Optimal Recommandé\nUtilisez le cylindre {} ({:.2} mm) avec une chute (K) de {:.3} mm.\n",
            fit.name, fit.circumference, fit.waste_per_label
        ),
        None => "Aucun Cylindre Optimal Trouvé\n\
                 Aucun cylindre ne correspond aux critères (chute entre 3 et 8mm). \
                 Veuillez vérifier le tableau ci-dessous.\n"
            .to_string(),
    }
}

/// Render the ranked fits as a table.
///
/// The recommended row is marked `*`, the row retained for the report `>`.
pub fn render_selection(selection: &Selection, retained: Option<&str>) -> String {
    let mut output = String::new();

    if selection.is_empty() {
        return output;
    }

    let recommended = selection.optimal.as_ref().map(|f| f.name.as_str());
    let name_width = selection
        .ranked
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Cylindre (A)".len());

    writeln!(output, "Détail des Calculs").unwrap();
    writeln!(
        output,
        "   {:<name_width$}  {:>10}  {:>19}  {:>20}  {:>23}  Classe",
        "Cylindre (A)",
        "Dév. (mm)",
        "Nbr. Étiquettes (I)",
        "Largeur Utilisée (J)",
        "Chute par Étiquette (K)",
    )
    .unwrap();

    for fit in &selection.ranked {
        let is_recommended = recommended.map_or(false, |name| name == fit.name);
        let is_retained = retained.map_or(false, |name| names_match(name, &fit.name));
        let marker = format!(
            "{}{}",
            if is_retained { '>' } else { ' ' },
            if is_recommended { '*' } else { ' ' }
        );

        writeln!(
            output,
            "{} {:<name_width$}  {:>10.2}  {:>19}  {:>17.3} mm  {:>20.3} mm  {}",
            marker,
            fit.name,
            fit.circumference,
            fit.labels_per_revolution,
            fit.used_width,
            fit.waste_per_label,
            fit.band().label(),
        )
        .unwrap();
    }

    output
}

fn mm_or_dash(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        "-".to_string()
    } else {
        format!("{} mm", raw)
    }
}

fn quantity_text(report: &ReportState) -> String {
    match report.desired_quantity() {
        Some(quantity) => format_grouped(quantity),
        None => report.inputs().desired_quantity.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cylinder, LaizeLayout};
    use crate::report::ReportEvent;
    use pretty_assertions::assert_eq;

    fn z128() -> Cylinder {
        Cylinder::new("Cylindre 128 Dents (Z128)", 406.4, 128, "Z128").with_machine("indien")
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_report(&ReportState::new(), None);
        assert_eq!(
            text,
            "Rapport d'Étude\nLancez un calcul pour voir le rapport de synthèse ici.\n"
        );
    }

    #[test]
    fn test_render_laize_only() {
        let state = ReportState::new().apply(ReportEvent::LaizeComputed {
            layout: Some(LaizeLayout::new(3, 330.0, 11.0)),
            label_length: "100".to_string(),
        });
        let text = render_report(&state, Some("16 octobre 2026 à 09:15"));
        assert!(text.contains("Nouvelle Étude\n16 octobre 2026 à 09:15\n"));
        assert!(text.contains("  Largeur Étiquette : -\n"));
        assert!(text.contains("  Longueur Étiquette : 100 mm\n"));
        assert!(text.contains("  Cylindre : -\n"));
        assert!(text.contains("  Laize : 330 mm\n"));
        assert!(!text.contains("Total par Tour"));
        assert!(text.contains("le cylindre N/A et une laize de 330 mm."));
    }

    #[test]
    fn test_render_grouped_quantity() {
        let cyl = z128();
        let state = ReportState::new()
            .apply(ReportEvent::CylinderSelected {
                fit: FitResult::compute(&cyl, 55.0),
                cylinder: Some(cyl),
            })
            .apply(ReportEvent::LaizeComputed {
                layout: Some(LaizeLayout::new(3, 330.0, 11.0)),
                label_length: "100".to_string(),
            })
            .apply(ReportEvent::QuantityChanged("10000".to_string()));
        let text = render_report(&state, None);
        assert!(text.contains("  Quantité Cible : 10\u{202F}000 étq.\n"));
        assert!(text.contains("Métrage Linéaire Requis : 193,52 m\n"));
        assert!(text.contains("Pour produire 10\u{202F}000 étiquettes, il faudra 193,52 mètres de matière."));
    }

    #[test]
    fn test_render_optimal_banner() {
        let fit = FitResult::compute(&z128(), 55.0);
        let text = render_optimal(Some(&fit));
        assert_eq!(
            text,
            "Cylindre Optimal Recommandé\nUtilisez le cylindre Cylindre 128 Dents (Z128) (406.40 mm) avec une chute (K) de 3.057 mm.\n"
        );
        assert!(render_optimal(None).starts_with("Aucun Cylindre Optimal Trouvé\n"));
        assert!(render_optimal(None).contains("(chute entre 3 et 8mm). Veuillez"));
    }

    #[test]
    fn test_render_selection_markers() {
        let z80 = Cylinder::new("Cylindre 80 Dents (Z80)", 254.0, 80, "Z80").with_machine("indien");
        let z128 = z128();
        let selection = crate::calc::select_cylinder(55.0, &[z80, z128]).unwrap();
        let table = render_selection(&selection, Some("cylindre 80 dents (z80)"));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Détail des Calculs");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with(" * Cylindre 128 Dents (Z128)"));
        assert!(lines[2].contains("Optimal (3-8mm)"));
        assert!(lines[3].starts_with(">  Cylindre 80 Dents (Z80)"));
        // 254 / 55 = 4 labels, 220 mm used, K = 8.5 (between the bands)
        assert!(lines[3].contains("220.000 mm"));
        assert!(lines[3].contains("8.500 mm"));
        assert!(lines[3].ends_with("Autre"));
    }

    #[test]
    fn test_render_selection_empty() {
        assert_eq!(render_selection(&Selection::default(), None), "");
    }
}
