//! Read-only plant dataset
//!
//! Loaded once at startup from the bundled `plants.json` and shared behind an
//! `Arc`. Nothing in the crate mutates a `Catalog` after construction; views
//! derive filtered slices or translated copies.

use rustc_hash::FxHashMap;
use std::path::Path;

use crate::error::{read_data_file, CatalogError};
use crate::model::PlantRecord;

pub struct Catalog {
    /// Plants in dataset order (the tie-break order for sorting)
    plants: Vec<PlantRecord>,
    /// id -> position in `plants`
    by_id: FxHashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(plants: Vec<PlantRecord>) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::default();
        by_id.reserve(plants.len());

        for (idx, plant) in plants.iter().enumerate() {
            if by_id.insert(plant.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(plant.id));
            }
        }

        Ok(Self { plants, by_id })
    }

    /// Parse a JSON array of plant records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let plants: Vec<PlantRecord> = serde_json::from_str(json)?;
        Self::new(plants)
    }

    /// Load the dataset file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let start = std::time::Instant::now();

        let catalog = Self::from_json_str(&read_data_file(path)?)?;

        tracing::info!(
            "Loaded {} plants from {} in {:?}",
            catalog.len(),
            path.display(),
            start.elapsed()
        );
        Ok(catalog)
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn get(&self, id: u32) -> Option<&PlantRecord> {
        self.by_id.get(&id).map(|&idx| &self.plants[idx])
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Distinct plant types in first-seen order (type filter options).
    pub fn plant_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for plant in &self.plants {
            if !types.contains(&plant.plant_type.as_str()) {
                types.push(&plant.plant_type);
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::plant;

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![
            plant(4, "Audumbar", "Ficus racemosa", "Moraceae", "Tree", "India"),
            plant(9, "Neem", "Azadirachta indica", "Meliaceae", "Tree", "India"),
        ])
        .unwrap();

        assert_eq!(catalog.get(9).map(|p| p.common_name.as_str()), Some("Neem"));
        assert!(catalog.get(1).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(vec![
            plant(1, "Palas", "Butea monosperma", "Fabaceae", "Tree", "India"),
            plant(1, "Pimpal", "Ficus religiosa", "Moraceae", "Tree", "India"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_plant_types_first_seen_order() {
        let catalog = Catalog::new(vec![
            plant(1, "Tulsi", "Ocimum tenuiflorum", "Lamiaceae", "Herb", "India"),
            plant(2, "Neem", "Azadirachta indica", "Meliaceae", "Tree", "India"),
            plant(3, "Mint", "Mentha", "Lamiaceae", "Herb", "Europe"),
        ])
        .unwrap();
        assert_eq!(catalog.plant_types(), vec!["Herb", "Tree"]);
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/plants.json");
        let catalog = Catalog::load(path).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.get(1).is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Catalog::load("/nonexistent/plants.json");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
