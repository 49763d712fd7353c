//! Domain types for the washroom locator.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod ids;
mod stop;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use ids::{InvalidId, StopId, WashroomId};
pub use stop::{StopRecord, Washroom};
