use crate::time_values::TimeValues;

/// At or below this share of the starting time the clock face turns to a
/// warning colour.
pub const LOW_TIME_PERCENT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    Normal,
    Low,
}

/// `MM:SS`, or `MM:SS:T` once less than a minute is left. Hours and days
/// are folded into the minutes column.
pub fn format_clock(values: &TimeValues) -> String {
    let values = values.normalized();
    let minutes = values.total_minutes();
    if minutes < 1 {
        format!("{:02}:{:02}:{}", minutes, values.seconds, values.tenths)
    } else {
        format!("{:02}:{:02}", minutes, values.seconds)
    }
}

/// Remaining over initial, in percent, clamped to `[0, 100]`.
///
/// A zero initial duration reads as 0% rather than dividing by zero.
pub fn progress_percent(remaining_secs: f64, initial_secs: u64) -> f64 {
    if initial_secs == 0 {
        return 0.0;
    }
    (remaining_secs / initial_secs as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn progress_level(percent: f64) -> ProgressLevel {
    if percent <= LOW_TIME_PERCENT {
        ProgressLevel::Low
    } else {
        ProgressLevel::Normal
    }
}
