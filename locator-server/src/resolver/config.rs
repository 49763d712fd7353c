//! Query resolution configuration.

/// Errors in resolver configuration, reported at start-up.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Threshold outside 0..=100
    #[error("fuzzy_match_threshold must be within 0..100, got {0}")]
    ThresholdOutOfRange(u8),

    /// Max distance negative or not a number
    #[error("max_distance must be a non-negative number of meters, got {0}")]
    InvalidMaxDistance(f64),
}

/// Configuration parameters for query resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Minimum fuzzy match score (0..=100) a stop needs to be accepted.
    pub fuzzy_match_threshold: u8,

    /// Maximum accepted distance to the washroom (meters).
    /// A washroom exactly this far away is accepted.
    pub max_distance: f64,

    /// Use washroom ratings to break ties between equally good stops.
    /// No effect when the dataset has no ratings.
    pub consider_reviews: bool,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(fuzzy_match_threshold: u8, max_distance: f64, consider_reviews: bool) -> Self {
        Self {
            fuzzy_match_threshold,
            max_distance,
            consider_reviews,
        }
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuzzy_match_threshold > 100 {
            return Err(ConfigError::ThresholdOutOfRange(self.fuzzy_match_threshold));
        }

        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(ConfigError::InvalidMaxDistance(self.max_distance));
        }

        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: 70,
            max_distance: 2000.0,
            consider_reviews: false,
        }
    }
}
