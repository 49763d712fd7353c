//! CSV dataset loading.
//!
//! The dataset is a table of stops joined with their nearest washroom.
//! Columns are matched by header name; extra columns are ignored.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Coordinate, StopId, StopRecord, Washroom, WashroomId};

use super::StopCatalog;
use super::error::CatalogError;

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "stop_id",
    "stop_lat",
    "stop_lon",
    "stop_name",
    "nearest_washroom_id",
    "washroom_latitude",
    "washroom_longitude",
    "distance",
    "washroom_address",
];

/// One row of the dataset as it appears on disk.
#[derive(Debug, Deserialize)]
struct StopRow {
    stop_id: String,
    stop_lat: f64,
    stop_lon: f64,
    stop_name: String,
    nearest_washroom_id: String,
    washroom_latitude: f64,
    washroom_longitude: f64,
    distance: f64,
    washroom_address: String,
    #[serde(default)]
    washroom_rating: Option<f64>,
}

impl StopRow {
    /// Validate and convert into a domain record.
    fn into_record(self, row: usize) -> Result<StopRecord, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidRecord { row, reason };

        let stop_id = StopId::parse(&self.stop_id).map_err(|e| invalid(e.to_string()))?;

        let name = self.stop_name.trim().to_string();
        if name.is_empty() {
            return Err(invalid("stop_name must not be empty".to_string()));
        }

        let location = Coordinate::new(self.stop_lat, self.stop_lon)
            .map_err(|e| invalid(format!("stop {e}")))?;

        let washroom_id =
            WashroomId::parse(&self.nearest_washroom_id).map_err(|e| invalid(e.to_string()))?;

        let washroom_location = Coordinate::new(self.washroom_latitude, self.washroom_longitude)
            .map_err(|e| invalid(format!("washroom {e}")))?;

        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(invalid(format!(
                "distance must be a non-negative number, got {}",
                self.distance
            )));
        }

        if let Some(rating) = self.washroom_rating {
            if !rating.is_finite() {
                return Err(invalid("washroom_rating must be a finite number".to_string()));
            }
        }

        Ok(StopRecord {
            stop_id,
            name,
            location,
            washroom: Washroom {
                id: washroom_id,
                location: washroom_location,
                address: self.washroom_address.trim().to_string(),
                rating: self.washroom_rating,
            },
            distance_meters: self.distance,
        })
    }
}

/// Load a catalog from a CSV file on disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<StopCatalog, CatalogError> {
    let file = std::fs::File::open(path.as_ref())?;
    load_reader(file)
}

/// Load a catalog from any CSV source.
pub fn load_reader(source: impl Read) -> Result<StopCatalog, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<StopRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|e| CatalogError::InvalidRecord {
            row,
            reason: e.to_string(),
        })?;
        records.push(raw.into_record(row)?);
    }

    StopCatalog::from_records(records)
}
