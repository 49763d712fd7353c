//! Stop catalog: the read-only table of stops and their nearest washrooms.
//!
//! The catalog is built once at start-up from a CSV dataset (or the
//! built-in sample) and shared by reference for the rest of the process.
//! Records live in a flat vector; lookups by id and by normalized name go
//! through index maps into that vector.

mod error;
mod loader;

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{StopId, StopRecord};
use crate::text::normalize;

pub use error::CatalogError;
pub use loader::REQUIRED_COLUMNS;

/// The five Delhi stops shipped for demos and for running without a dataset.
const SAMPLE_CSV: &str = include_str!("sample.csv");

/// Immutable collection of stop records with id and name indexes.
#[derive(Debug)]
pub struct StopCatalog {
    records: Vec<StopRecord>,
    by_id: HashMap<StopId, usize>,
    by_name: HashMap<String, Vec<usize>>,
    has_ratings: bool,
}

impl StopCatalog {
    /// Build a catalog from already-validated records.
    ///
    /// Fails if the list is empty, a name is blank, or a stop_id repeats.
    pub fn from_records(records: Vec<StopRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CatalogError::InvalidRecord {
                    row: idx + 1,
                    reason: "stop_name must not be empty".to_string(),
                });
            }

            if by_id.insert(record.stop_id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateStopId(record.stop_id.clone()));
            }

            by_name.entry(normalize(&record.name)).or_default().push(idx);
        }

        let has_ratings = records.iter().any(|r| r.washroom.rating.is_some());

        Ok(Self {
            records,
            by_id,
            by_name,
            has_ratings,
        })
    }

    /// Load a catalog from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = loader::load_path(path)?;
        tracing::info!(path = %path.display(), stops = catalog.len(), "loaded stop catalog");
        Ok(catalog)
    }

    /// Load a catalog from CSV held in memory or any other reader.
    pub fn from_csv_reader(source: impl std::io::Read) -> Result<Self, CatalogError> {
        loader::load_reader(source)
    }

    /// The built-in sample catalog of five Delhi bus stands.
    pub fn sample() -> Result<Self, CatalogError> {
        loader::load_reader(SAMPLE_CSV.as_bytes())
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &StopId) -> Option<&StopRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Stops whose normalized name equals the normalized form of `name`.
    pub fn find_by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a StopRecord> + 'a {
        self.by_name
            .get(&normalize(name))
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }

    /// All records in load order.
    pub fn records(&self) -> &[StopRecord] {
        &self.records
    }

    /// Iterate over all records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, StopRecord> {
        self.records.iter()
    }

    /// True if any washroom carries a review rating.
    pub fn has_ratings(&self) -> bool {
        self.has_ratings
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a StopCatalog {
    type Item = &'a StopRecord;
    type IntoIter = std::slice::Iter<'a, StopRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Record builders shared by tests across the crate.

    use crate::domain::{Coordinate, StopId, StopRecord, Washroom, WashroomId};

    /// Build a stop record with the washroom placed next to the stop.
    pub fn record(id: &str, name: &str, washroom_id: &str, distance: f64) -> StopRecord {
        StopRecord {
            stop_id: StopId::parse(id).unwrap(),
            name: name.to_string(),
            location: Coordinate::new(28.6315, 77.2167).unwrap(),
            washroom: Washroom {
                id: WashroomId::parse(washroom_id).unwrap(),
                location: Coordinate::new(28.6320, 77.2170).unwrap(),
                address: format!("{name} Washroom"),
                rating: None,
            },
            distance_meters: distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;

    #[test]
    fn indexes_by_id_and_name() {
        let catalog = StopCatalog::from_records(vec![
            record("S1", "Connaught Place", "W1", 150.0),
            record("S2", "Karol Bagh", "W2", 200.0),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&StopId::parse("S2").unwrap()).unwrap().name,
            "Karol Bagh"
        );

        let found: Vec<_> = catalog.find_by_name("CONNAUGHT place!").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stop_id.as_str(), "S1");

        assert_eq!(catalog.find_by_name("Hauz Khas").count(), 0);
    }

    #[test]
    fn same_name_different_ids_are_both_indexed() {
        let catalog = StopCatalog::from_records(vec![
            record("S1", "Sector 5", "W1", 150.0),
            record("S2", "Sector 5", "W2", 90.0),
        ])
        .unwrap();

        assert_eq!(catalog.find_by_name("sector 5").count(), 2);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = StopCatalog::from_records(vec![
            record("S1", "Connaught Place", "W1", 150.0),
            record("S1", "Karol Bagh", "W2", 200.0),
        ])
        .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateStopId(_)));
    }

    #[test]
    fn rejects_blank_name() {
        let err = StopCatalog::from_records(vec![record("S1", " ", "W1", 150.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            StopCatalog::from_records(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn sample_catalog_loads() {
        let catalog = StopCatalog::sample().unwrap();
        assert_eq!(catalog.len(), 5);

        let names: Vec<_> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Arjun Nagar",
                "Karol Bagh",
                "Connaught Place",
                "Lajpat Nagar",
                "Hauz Khas"
            ]
        );

        let cp = catalog.find_by_name("connaught place").next().unwrap();
        assert_eq!(cp.washroom.id.as_str(), "PTU-15_003");
        assert_eq!(cp.distance_meters, 100.0);
    }
}
