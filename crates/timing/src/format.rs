//! Duration formatting for log output.

use std::time::Duration;

/// Format a duration as `HH:MM:SS.mmm`.
///
/// The duration is rounded to millisecond precision before decomposition.
/// Hours widen past two digits as needed; the other fields are zero-padded
/// to fixed width.
pub fn format_duration(duration: Duration) -> String {
    // Round half-up to the nearest millisecond, then decompose.
    let total_ms = (duration.as_micros() + 500) / 1000;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}
