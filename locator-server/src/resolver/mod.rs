//! Query resolution pipeline.
//!
//! Extract candidates from the text, match them against the stop catalog,
//! then check the matched stop's washroom distance. Each step is a pure
//! function of its inputs and the read-only catalog, so one resolver can
//! serve any number of concurrent queries.

mod config;
mod result;


use std::sync::Arc;

use crate::catalog::StopCatalog;
use crate::extract::LocationExtractor;
use crate::matcher::StopMatcher;
use crate::presentation::DirectionsLinks;

pub use config::{ConfigError, ResolverConfig};
pub use result::{QueryFailure, QueryResult, WashroomFound};

/// Resolves free-text queries to the nearest washroom.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    catalog: Arc<StopCatalog>,
    extractor: LocationExtractor,
    matcher: StopMatcher,
    links: DirectionsLinks,
    config: ResolverConfig,
}

impl QueryResolver {
    /// Create a resolver with the default matcher.
    ///
    /// Fails if the configuration is out of range.
    pub fn new(
        catalog: Arc<StopCatalog>,
        extractor: LocationExtractor,
        links: DirectionsLinks,
        config: ResolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            catalog,
            extractor,
            matcher: StopMatcher::default(),
            links,
            config,
        })
    }

    /// Replace the stop matcher (e.g. to use a different scorer).
    pub fn with_matcher(mut self, matcher: StopMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// The catalog queries are resolved against.
    pub fn catalog(&self) -> &StopCatalog {
        &self.catalog
    }

    /// The configuration used by [`process_query`](Self::process_query).
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The stop matcher.
    pub fn matcher(&self) -> &StopMatcher {
        &self.matcher
    }

    /// Resolve a query with the resolver's own configuration.
    pub fn process_query(&self, text: &str) -> QueryResult {
        // Own config was validated in `new`
        self.resolve(text, &self.config)
    }

    /// Resolve a query with an explicit configuration.
    ///
    /// Fails without looking at the query if the configuration is out of
    /// range.
    pub fn process_query_with(
        &self,
        text: &str,
        config: &ResolverConfig,
    ) -> Result<QueryResult, ConfigError> {
        config.validate()?;
        Ok(self.resolve(text, config))
    }

    fn resolve(&self, text: &str, config: &ResolverConfig) -> QueryResult {
        let candidates = self.extractor.extract(text);
        let Some(top) = candidates.first() else {
            tracing::debug!(query = text, "no location candidates");
            return QueryResult::Failed(QueryFailure::NoLocation);
        };

        let matcher = self.matcher.clone().with_reviews(config.consider_reviews);
        let matched = matcher.match_candidates(&candidates, &self.catalog, config.fuzzy_match_threshold);

        let Some(stop) = matched.stop else {
            tracing::debug!(
                query = text,
                candidate = %top.text,
                best_score = matched.score,
                "no stop above threshold"
            );
            return QueryResult::Failed(QueryFailure::NoMatch {
                candidate: top.text.clone(),
                best_score: matched.score,
            });
        };

        if stop.distance_meters > config.max_distance {
            tracing::debug!(
                stop = %stop.name,
                distance = stop.distance_meters,
                max_distance = config.max_distance,
                "washroom beyond max distance"
            );
            return QueryResult::Failed(QueryFailure::DistanceExceeded {
                stop_name: stop.name.clone(),
                distance: stop.distance_meters,
                max_distance: config.max_distance,
            });
        }

        QueryResult::Found(WashroomFound {
            stop_id: stop.stop_id.clone(),
            stop_name: stop.name.clone(),
            stop_location: stop.location,
            washroom_id: stop.washroom.id.clone(),
            washroom_address: stop.washroom.address.clone(),
            washroom_location: stop.washroom.location,
            distance: stop.distance_meters,
            directions_link: self.links.walking(stop.location, stop.washroom.location),
            match_score: matched.score,
        })
    }
}
