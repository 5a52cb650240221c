//! Respawn countdown text

/// Format whole seconds as `Hh Mm Ss`, dropping leading zero units.
///
/// - 9 → `9s`
/// - 125 → `2m 05s`
/// - 3609 → `1h 00m 09s`
///
/// Negative input renders as `0s`.
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
