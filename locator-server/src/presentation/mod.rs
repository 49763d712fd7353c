//! Presenting query results to people: map links and plain-text answers.

mod console;
mod directions;

pub use console::render_text;
pub use directions::{DirectionsLinks, GOOGLE_MAPS_DIRECTIONS};
