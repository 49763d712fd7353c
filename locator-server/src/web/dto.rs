//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::matcher::ScoredStop;
use crate::resolver::{QueryFailure, QueryResult};

/// Request to locate a washroom.
#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    /// Free-text query, e.g. "toilet near Karol Bagh"
    pub query: String,
}

/// Outcome of a locate request.
///
/// Flat so clients can check `success` and read fields directly. Fields
/// that do not apply to the outcome are omitted.
#[derive(Debug, Serialize, PartialEq)]
pub struct QueryResponse {
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    /// Failure code: `no_location`, `no_match` or `distance_exceeded`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_lon: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub washroom_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub washroom_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub washroom_lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub washroom_lon: Option<f64>,

    /// Stop to washroom, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Walking directions URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_link: Option<String>,
}

/// Query parameters for stop search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search text
    pub q: String,

    /// Maximum results (default 10, at most 50)
    pub limit: Option<usize>,
}

/// A stop in search results.
#[derive(Debug, Serialize, PartialEq)]
pub struct StopSearchResult {
    pub stop_id: String,
    pub name: String,
    pub score: u8,
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopSearchResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl QueryResponse {
    /// Create from a resolver result.
    pub fn from_result(result: &QueryResult) -> Self {
        let mut response = Self {
            success: result.is_success(),
            message: result.message(),
            reason: result.failure().map(QueryFailure::code),
            stop_id: None,
            stop_name: None,
            stop_lat: None,
            stop_lon: None,
            washroom_id: None,
            washroom_address: None,
            washroom_lat: None,
            washroom_lon: None,
            distance: None,
            directions_link: None,
        };

        if let Some(found) = result.found() {
            response.stop_id = Some(found.stop_id.to_string());
            response.stop_name = Some(found.stop_name.clone());
            response.stop_lat = Some(found.stop_location.lat());
            response.stop_lon = Some(found.stop_location.lon());
            response.washroom_id = Some(found.washroom_id.to_string());
            response.washroom_address = Some(found.washroom_address.clone());
            response.washroom_lat = Some(found.washroom_location.lat());
            response.washroom_lon = Some(found.washroom_location.lon());
            response.distance = Some(found.distance);
            response.directions_link = Some(found.directions_link.clone());
        }

        response
    }
}

impl StopSearchResult {
    /// Create from a scored stop.
    pub fn from_scored(scored: &ScoredStop<'_>) -> Self {
        Self {
            stop_id: scored.stop.stop_id.to_string(),
            name: scored.stop.name.clone(),
            score: scored.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StopId, WashroomId};
    use crate::resolver::WashroomFound;

    fn found() -> QueryResult {
        QueryResult::Found(WashroomFound {
            stop_id: StopId::parse("BS002").unwrap(),
            stop_name: "Karol Bagh".into(),
            stop_location: Coordinate::new(28.6519, 77.1909).unwrap(),
            washroom_id: WashroomId::parse("PTU-16_002").unwrap(),
            washroom_address: "Karol Bagh Market".into(),
            washroom_location: Coordinate::new(28.6529, 77.1919).unwrap(),
            distance: 200.0,
            directions_link: "https://maps.example.org/?x=1".into(),
            match_score: 100,
        })
    }

    #[test]
    fn success_response_carries_fields() {
        let response = QueryResponse::from_result(&found());

        assert!(response.success);
        assert_eq!(response.message, "Found washroom near Karol Bagh.");
        assert_eq!(response.reason, None);
        assert_eq!(response.stop_id.as_deref(), Some("BS002"));
        assert_eq!(response.washroom_id.as_deref(), Some("PTU-16_002"));
        assert_eq!(response.stop_lat, Some(28.6519));
        assert_eq!(response.washroom_lon, Some(77.1919));
        assert_eq!(response.distance, Some(200.0));
    }

    #[test]
    fn failure_omits_washroom_fields() {
        let result = QueryResult::Failed(QueryFailure::NoLocation);
        let json = serde_json::to_value(QueryResponse::from_result(&result)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "No location could be identified in your query.",
                "reason": "no_location",
            })
        );
    }

    #[test]
    fn success_json_has_no_reason() {
        let json = serde_json::to_value(QueryResponse::from_result(&found())).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["directions_link"], "https://maps.example.org/?x=1");
        assert!(json.get("reason").is_none());
    }
}
