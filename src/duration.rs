/// Formats a millisecond duration for display.
///
/// `compact` drops the hour field for anything under an hour (`M:SS`);
/// otherwise the result is always `H:MM:SS`. Partial seconds are floored.
pub fn format_duration(duration_ms: u64, compact: bool) -> String {
    let total_seconds = duration_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if compact && hours == 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}
