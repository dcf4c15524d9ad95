/// Broken-down time as shown on a clock face.
///
/// Values produced by a [`crate::countdown::Countdown`] are normalised. Values
/// produced by [`increment_time`] are not: `seconds` may exceed 59 until the
/// value is fed back into a countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeValues {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub tenths: u64,
}

const TENTHS_PER_SECOND: u64 = 10;
const TENTHS_PER_MINUTE: u64 = 60 * TENTHS_PER_SECOND;
const TENTHS_PER_HOUR: u64 = 60 * TENTHS_PER_MINUTE;
const TENTHS_PER_DAY: u64 = 24 * TENTHS_PER_HOUR;

impl TimeValues {
    pub fn from_tenths(total: u64) -> Self {
        Self {
            days: total / TENTHS_PER_DAY,
            hours: total % TENTHS_PER_DAY / TENTHS_PER_HOUR,
            minutes: total % TENTHS_PER_HOUR / TENTHS_PER_MINUTE,
            seconds: total % TENTHS_PER_MINUTE / TENTHS_PER_SECOND,
            tenths: total % TENTHS_PER_SECOND,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::from_tenths(secs.saturating_mul(TENTHS_PER_SECOND))
    }

    /// Total length in tenths. Works on un-normalised values too.
    pub fn total_tenths(&self) -> u64 {
        self.days * TENTHS_PER_DAY
            + self.hours * TENTHS_PER_HOUR
            + self.minutes * TENTHS_PER_MINUTE
            + self.seconds * TENTHS_PER_SECOND
            + self.tenths
    }

    pub fn total_secs(&self) -> u64 {
        self.total_tenths() / TENTHS_PER_SECOND
    }

    /// Minutes including folded hours and days, for clock faces that only
    /// have a minutes column.
    pub fn total_minutes(&self) -> u64 {
        self.total_tenths() / TENTHS_PER_MINUTE
    }

    pub fn normalized(&self) -> Self {
        Self::from_tenths(self.total_tenths())
    }

    pub fn is_zero(&self) -> bool {
        self.total_tenths() == 0
    }
}

/// Adds a per-move increment to the seconds column. No carry into minutes.
pub fn increment_time(values: TimeValues, increment_secs: u64) -> TimeValues {
    TimeValues {
        seconds: values.seconds + increment_secs,
        ..values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(seconds: u64) -> TimeValues {
        TimeValues {
            seconds,
            ..TimeValues::default()
        }
    }

    #[test]
    fn test_increment_time() {
        assert_eq!(increment_time(secs(30), 5), secs(35));
    }

    #[test]
    fn test_increment_time_over_a_minute() {
        // Stays at 62 seconds, not 1:02
        let incremented = increment_time(secs(57), 5);
        assert_eq!(incremented, secs(62));
        assert_eq!(incremented.minutes, 0);
    }

    #[test]
    fn test_increment_time_keeps_other_fields() {
        let values = TimeValues {
            days: 0,
            hours: 1,
            minutes: 4,
            seconds: 10,
            tenths: 7,
        };
        let incremented = increment_time(values, 2);
        assert_eq!(incremented.hours, 1);
        assert_eq!(incremented.minutes, 4);
        assert_eq!(incremented.seconds, 12);
        assert_eq!(incremented.tenths, 7);
    }

    #[test]
    fn test_increment_time_zero() {
        let values = TimeValues::from_secs(180);
        assert_eq!(increment_time(values, 0), values);
    }

    #[test]
    fn test_from_secs_normalises() {
        let values = TimeValues::from_secs(3600);
        assert_eq!(values.hours, 1);
        assert_eq!(values.minutes, 0);
        assert_eq!(values.seconds, 0);

        let values = TimeValues::from_secs(182);
        assert_eq!(values.minutes, 3);
        assert_eq!(values.seconds, 2);
    }

    #[test]
    fn test_total_tenths_of_unnormalised_value() {
        assert_eq!(secs(62).total_tenths(), 620);
        assert_eq!(secs(62).normalized(), TimeValues::from_secs(62));
        assert_eq!(secs(62).normalized().minutes, 1);
    }

    #[test]
    fn test_total_minutes_folds_hours() {
        assert_eq!(TimeValues::from_secs(3600).total_minutes(), 60);
        assert_eq!(TimeValues::from_tenths(599).total_minutes(), 0);
    }

    #[test]
    fn test_days_rollover() {
        let values = TimeValues::from_secs(24 * 3600 + 1);
        assert_eq!(values.days, 1);
        assert_eq!(values.hours, 0);
        assert_eq!(values.seconds, 1);
    }
}
