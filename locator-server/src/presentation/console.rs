//! Plain-text rendering for terminal output.

use std::fmt::Write;

use crate::resolver::QueryResult;

/// Render a result as a few lines of text.
///
/// A found washroom shows the stop, address, distance and directions
/// link; a failure shows only its message.
pub fn render_text(result: &QueryResult) -> String {
    let Some(found) = result.found() else {
        return result.message();
    };

    let mut out = found.message();
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "\n  Stop:       {} ({})\n  Washroom:   {} ({})\n  Distance:   {}m\n  Directions: {}",
        found.stop_name,
        found.stop_id,
        found.washroom_address,
        found.washroom_id,
        found.distance,
        found.directions_link,
    );
    out
}
