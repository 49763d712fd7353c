//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::QueryResolver;

/// Shared application state.
///
/// The resolver holds the catalog and tagger, so cloning the state per
/// request only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    /// Query resolver
    pub resolver: Arc<QueryResolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: QueryResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
