//! Map-directions link generation.
//!
//! Links open walking directions from the stop to the washroom in an
//! external map service. The base URL is configurable; coordinates are
//! appended as query parameters so the result is always a well-formed URL.

use url::Url;

use crate::domain::Coordinate;

/// Google Maps directions endpoint (URLs API).
pub const GOOGLE_MAPS_DIRECTIONS: &str = "https://www.google.com/maps/dir/";

/// Builds directions URLs against a fixed base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsLinks {
    base: Url,
}

impl DirectionsLinks {
    /// Create a link builder for the given base URL.
    ///
    /// Any query string on the base is replaced when links are built.
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    /// Link builder for Google Maps.
    pub fn google_maps() -> Result<Self, url::ParseError> {
        Self::parse(GOOGLE_MAPS_DIRECTIONS)
    }

    /// Walking directions from `origin` to `destination`.
    ///
    /// # Example
    ///
    /// ```
    /// use locator_server::domain::Coordinate;
    /// use locator_server::presentation::DirectionsLinks;
    ///
    /// let links = DirectionsLinks::google_maps().unwrap();
    /// let stop = Coordinate::new(28.6329, 77.2495).unwrap();
    /// let washroom = Coordinate::new(28.6339, 77.2505).unwrap();
    /// assert_eq!(
    ///     links.walking(stop, washroom),
    ///     "https://www.google.com/maps/dir/?api=1&origin=28.6329%2C77.2495&destination=28.6339%2C77.2505&travelmode=walking"
    /// );
    /// ```
    pub fn walking(&self, origin: Coordinate, destination: Coordinate) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("api", "1")
            .append_pair("origin", &origin.to_string())
            .append_pair("destination", &destination.to_string())
            .append_pair("travelmode", "walking");
        url.into()
    }
}
