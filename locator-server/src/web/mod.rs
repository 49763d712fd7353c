//! Web layer for the washroom locator.
//!
//! Provides HTTP endpoints for locating washrooms and searching stops.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
