//! Mutable, name-unique cylinder catalog.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{OptimError, Result};
use crate::model::{names_match, Cylinder, MachineFilter};
use crate::validation::{validate_catalog, validate_cylinder};

use super::seed::seed_cylinders;

/// Cylinders available in the workshop, sorted by ascending circumference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CylinderCatalog {
    cylinders: Vec<Cylinder>,
}

impl CylinderCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, rejecting invalid or duplicate ones.
    pub fn from_cylinders(cylinders: Vec<Cylinder>) -> Result<Self> {
        for (i, cylinder) in cylinders.iter().enumerate() {
            if cylinders[..i].iter().any(|c| c.is_named(&cylinder.name)) {
                return Err(OptimError::DuplicateName {
                    name: cylinder.name.clone(),
                });
            }
        }

        let warnings = validate_catalog(&cylinders).into_result()?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let mut catalog = Self { cylinders };
        catalog.sort();
        Ok(catalog)
    }

    /// The built-in workshop catalog.
    pub fn seed() -> Result<Self> {
        Self::from_cylinders(seed_cylinders()?)
    }

    /// Parse a catalog from a JSON array of cylinders.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cylinders: Vec<Cylinder> = serde_json::from_str(json)?;
        Self::from_cylinders(cylinders)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OptimError::CatalogLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let catalog = Self::from_json_str(&content).map_err(|e| match e {
            OptimError::Json(err) => OptimError::CatalogLoad {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
            other => other,
        })?;

        info!(
            "Loaded {} cylinder(s) from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Serialize the catalog as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.cylinders)?)
    }

    /// Add a cylinder. Fails if the name is already used.
    pub fn add(&mut self, cylinder: Cylinder) -> Result<()> {
        if self.contains(&cylinder.name) {
            return Err(OptimError::DuplicateName {
                name: cylinder.name,
            });
        }
        Self::check(&cylinder)?;

        info!("Adding cylinder {}", cylinder.name);
        self.cylinders.push(cylinder);
        self.sort();
        Ok(())
    }

    /// Replace the cylinder named `original_name`.
    ///
    /// Renaming onto a name held by another cylinder fails with
    /// `DuplicateName` and leaves the catalog unchanged.
    pub fn update(&mut self, original_name: &str, cylinder: Cylinder) -> Result<()> {
        let index = self
            .position(original_name)
            .ok_or_else(|| OptimError::NotFound {
                name: original_name.to_string(),
            })?;

        let renamed = !names_match(original_name, &cylinder.name);
        if renamed && self.contains(&cylinder.name) {
            return Err(OptimError::DuplicateName {
                name: cylinder.name,
            });
        }
        Self::check(&cylinder)?;

        info!("Updating cylinder {}", original_name);
        self.cylinders[index] = cylinder;
        self.sort();
        Ok(())
    }

    /// Remove a cylinder by name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                let removed = self.cylinders.remove(index);
                info!("Removed cylinder {}", removed.name);
                true
            }
            None => {
                debug!("No cylinder named {} to remove", name);
                false
            }
        }
    }

    /// Cylinders mountable on the filtered presses, in catalog order.
    pub fn filter_by_machine(&self, filter: &MachineFilter) -> Vec<Cylinder> {
        let selected: Vec<Cylinder> = self
            .cylinders
            .iter()
            .filter(|c| filter.accepts(c.machines.iter()))
            .cloned()
            .collect();
        debug!(
            "Machine filter {}: {} of {} cylinder(s)",
            filter,
            selected.len(),
            self.cylinders.len()
        );
        selected
    }

    /// Find a cylinder by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Cylinder> {
        self.cylinders.iter().find(|c| c.is_named(name))
    }

    /// Check if a cylinder with this name exists (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of cylinders.
    pub fn len(&self) -> usize {
        self.cylinders.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.cylinders.is_empty()
    }

    /// Iterate cylinders by ascending circumference.
    pub fn iter(&self) -> impl Iterator<Item = &Cylinder> {
        self.cylinders.iter()
    }

    /// All cylinders by ascending circumference.
    pub fn as_slice(&self) -> &[Cylinder] {
        &self.cylinders
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.cylinders.iter().position(|c| c.is_named(name))
    }

    fn check(cylinder: &Cylinder) -> Result<()> {
        let warnings = validate_cylinder(cylinder).into_result()?;
        for warning in &warnings {
            warn!("{}", warning);
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.cylinders
            .sort_by(|a, b| a.circumference.total_cmp(&b.circumference));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    fn cyl(name: &str, circumference: f64, teeth: u32, machine: &str) -> Cylinder {
        Cylinder::new(name, circumference, teeth, name).with_machine(machine)
    }

    fn small_catalog() -> CylinderCatalog {
        CylinderCatalog::from_cylinders(vec![
            cyl("Z96", 304.8, 96, "indien"),
            cyl("Z80", 254.0, 80, "indien"),
            cyl("Z112", 355.6, 112, "bobst1"),
        ])
        .expect("Valid catalog")
    }

    fn names(catalog: &CylinderCatalog) -> Vec<&str> {
        catalog.iter().map(|c| c.name.as_str()).collect()
    }

    // ==================== construction tests ====================

    #[test]
    fn test_from_cylinders_sorts_by_circumference() {
        let catalog = small_catalog();
        assert_eq!(names(&catalog), vec!["Z80", "Z96", "Z112"]);
    }

    #[test]
    fn test_from_cylinders_rejects_duplicates() {
        let result = CylinderCatalog::from_cylinders(vec![
            cyl("Z80", 254.0, 80, "indien"),
            cyl("z80", 254.0, 80, "bobst1"),
        ]);
        let err = result.unwrap_err();
        assert!(matches!(err, OptimError::DuplicateName { ref name } if name == "z80"));
        assert_eq!(err.code(), ErrorCode::DuplicateName);
    }

    #[test]
    fn test_load_file_with_duplicate_names() {
        let json = r#"[
            {"name": "Z80", "circumference": 254.0, "tooth_count": 80, "reference_code": "Z80", "machines": ["indien"]},
            {"name": "z80", "circumference": 254.0, "tooth_count": 80, "reference_code": "Z80", "machines": ["bobst1"]}
        ]"#;
        let err = CylinderCatalog::from_json_str(json).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateName);
    }

    #[test]
    fn test_seed_catalog_sorted() {
        let catalog = CylinderCatalog::seed().unwrap();
        assert_eq!(catalog.len(), 13);
        let circumferences: Vec<f64> = catalog.iter().map(|c| c.circumference).collect();
        assert!(circumferences.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(catalog.as_slice()[0].reference_code, "Z80");
        assert_eq!(catalog.as_slice()[12].reference_code, "Z192");
    }

    // ==================== add tests ====================

    #[test]
    fn test_add_inserts_in_order() {
        let mut catalog = small_catalog();
        catalog.add(cyl("Z88", 279.4, 88, "indien")).unwrap();
        assert_eq!(names(&catalog), vec!["Z80", "Z88", "Z96", "Z112"]);
    }

    #[test]
    fn test_add_duplicate_name_case_insensitive() {
        let mut catalog = small_catalog();
        let before = catalog.clone();
        let err = catalog.add(cyl("z80", 260.0, 82, "bobst1")).unwrap_err();
        assert!(matches!(err, OptimError::DuplicateName { ref name } if name == "z80"));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_add_invalid_cylinder_rejected() {
        let mut catalog = small_catalog();
        let err = catalog
            .add(Cylinder::new("Z1", 3.175, 1, "Z1"))
            .unwrap_err();
        assert!(matches!(err, OptimError::Validation(_)));
        assert_eq!(catalog.len(), 3);
    }

    // ==================== update tests ====================

    #[test]
    fn test_update_same_name_replaces() {
        let mut catalog = small_catalog();
        let edited = cyl("Z96", 304.8, 96, "bobst2");
        catalog.update("z96", edited).unwrap();
        let stored = catalog.get("Z96").unwrap();
        assert!(stored.runs_on("bobst2"));
        assert!(!stored.runs_on("indien"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_update_case_only_rename_allowed() {
        let mut catalog = small_catalog();
        catalog.update("Z96", cyl("z96", 304.8, 96, "indien")).unwrap();
        assert_eq!(names(&catalog), vec!["Z80", "z96", "Z112"]);
    }

    #[test]
    fn test_update_rename_collision() {
        let mut catalog = small_catalog();
        let before = catalog.clone();
        let err = catalog
            .update("Z96", cyl("Z112", 304.8, 96, "indien"))
            .unwrap_err();
        assert!(matches!(err, OptimError::DuplicateName { .. }));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_resorts() {
        let mut catalog = small_catalog();
        catalog
            .update("Z80", cyl("Z128", 406.4, 128, "indien"))
            .unwrap();
        assert_eq!(names(&catalog), vec!["Z96", "Z112", "Z128"]);
    }

    #[test]
    fn test_update_missing_original() {
        let mut catalog = small_catalog();
        let err = catalog
            .update("Z999", cyl("Z999", 317.5, 100, "bobst2"))
            .unwrap_err();
        assert!(matches!(err, OptimError::NotFound { .. }));
    }

    // ==================== remove tests ====================

    #[test]
    fn test_remove_existing() {
        let mut catalog = small_catalog();
        assert!(catalog.remove("z96"));
        assert_eq!(names(&catalog), vec!["Z80", "Z112"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut catalog = small_catalog();
        assert!(!catalog.remove("Z999"));
        assert_eq!(catalog.len(), 3);
    }

    // ==================== filter tests ====================

    #[test]
    fn test_filter_by_machine() {
        let catalog = small_catalog();
        let all = catalog.filter_by_machine(&MachineFilter::All);
        assert_eq!(all.len(), 3);

        let indien = catalog.filter_by_machine(&MachineFilter::parse("indien"));
        let indien_names: Vec<&str> = indien.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(indien_names, vec!["Z80", "Z96"]);

        let none = catalog.filter_by_machine(&MachineFilter::parse("bobst2"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_seed_filter_counts() {
        let catalog = CylinderCatalog::seed().unwrap();
        assert_eq!(catalog.filter_by_machine(&MachineFilter::parse("indien")).len(), 5);
        assert_eq!(catalog.filter_by_machine(&MachineFilter::parse("bobst1")).len(), 5);
        assert_eq!(catalog.filter_by_machine(&MachineFilter::parse("bobst2")).len(), 5);
    }

    // ==================== JSON tests ====================

    #[test]
    fn test_json_round_trip() {
        let catalog = small_catalog();
        let json = catalog.to_json_string().unwrap();
        let back = CylinderCatalog::from_json_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CylinderCatalog::load(Path::new("/nonexistent/cylinders.json")).unwrap_err();
        assert!(matches!(err, OptimError::CatalogLoad { .. }));
    }
}
