/// Format seconds as `m:ss`, flooring fractional seconds.
///
/// Negative or non-finite input formats as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Time left in the track, floored at zero.
pub fn remaining(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || !position.is_finite() {
        return 0.0;
    }
    (duration - position).max(0.0)
}
