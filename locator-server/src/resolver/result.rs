//! Query outcomes.
//!
//! Every query ends in a [`QueryResult`]. Per-query failures (nothing to
//! extract, no stop close enough by name, washroom too far) are ordinary
//! values rather than errors, so callers render them like any answer.

use std::fmt;

use crate::domain::{Coordinate, StopId, WashroomId};

/// A washroom found for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct WashroomFound {
    pub stop_id: StopId,
    pub stop_name: String,
    pub stop_location: Coordinate,
    pub washroom_id: WashroomId,
    pub washroom_address: String,
    pub washroom_location: Coordinate,
    /// Distance from stop to washroom, in meters.
    pub distance: f64,
    pub directions_link: String,
    /// Score of the stop-name match that selected this stop.
    pub match_score: u8,
}

impl WashroomFound {
    /// Human-readable summary.
    pub fn message(&self) -> String {
        format!("Found washroom near {}.", self.stop_name)
    }
}

/// Why a query produced no washroom.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFailure {
    /// No place name could be pulled out of the text.
    NoLocation,

    /// Candidates were found but none matched a stop well enough.
    NoMatch {
        /// Top-ranked candidate, as written.
        candidate: String,
        /// Best score reached by any candidate.
        best_score: u8,
    },

    /// A stop matched but its nearest washroom is too far away.
    DistanceExceeded {
        stop_name: String,
        distance: f64,
        max_distance: f64,
    },
}

impl QueryFailure {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            QueryFailure::NoLocation => "no_location",
            QueryFailure::NoMatch { .. } => "no_match",
            QueryFailure::DistanceExceeded { .. } => "distance_exceeded",
        }
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::NoLocation => {
                f.write_str("No location could be identified in your query.")
            }
            QueryFailure::NoMatch { candidate, .. } => {
                write!(f, "No matching stop found for '{candidate}'.")
            }
            QueryFailure::DistanceExceeded {
                distance,
                max_distance,
                ..
            } => write!(
                f,
                "Nearest washroom is {distance}m away, exceeding the maximum of {max_distance}m."
            ),
        }
    }
}

/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Found(WashroomFound),
    Failed(QueryFailure),
}

impl QueryResult {
    /// True if a washroom was found.
    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Found(_))
    }

    /// Human-readable message for either outcome.
    pub fn message(&self) -> String {
        match self {
            QueryResult::Found(found) => found.message(),
            QueryResult::Failed(failure) => failure.to_string(),
        }
    }

    /// The found washroom, if any.
    pub fn found(&self) -> Option<&WashroomFound> {
        match self {
            QueryResult::Found(found) => Some(found),
            QueryResult::Failed(_) => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&QueryFailure> {
        match self {
            QueryResult::Found(_) => None,
            QueryResult::Failed(failure) => Some(failure),
        }
    }
}
