//! Stop and washroom records.

use super::{Coordinate, StopId, WashroomId};

/// A public washroom facility.
#[derive(Debug, Clone, PartialEq)]
pub struct Washroom {
    /// Facility identifier.
    pub id: WashroomId,

    /// Where the facility is.
    pub location: Coordinate,

    /// Street address for display.
    pub address: String,

    /// Optional review score. Only consulted when reviews are enabled.
    pub rating: Option<f64>,
}

/// A transit stop together with its precomputed nearest washroom.
///
/// Records are validated when the catalog is loaded and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    /// Unique stop key.
    pub stop_id: StopId,

    /// Display name of the stop (never empty).
    pub name: String,

    /// Location of the stop.
    pub location: Coordinate,

    /// The nearest recorded washroom.
    pub washroom: Washroom,

    /// Distance from the stop to the washroom, in meters.
    pub distance_meters: f64,
}
