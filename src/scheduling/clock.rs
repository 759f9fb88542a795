use std::fmt;
use std::str::FromStr;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockTimeError {
    #[error("Invalid time format")]
    InvalidFormat,
    #[error("End time must be after start time")]
    EmptyRange,
    #[error("Day of week must be between 0 and 6")]
    InvalidDay,
}

/// Time of day held as minutes since midnight.
///
/// Accepts `H:MM` or `HH:MM` (hours 0-23) and always renders zero-padded, so
/// the stored text and the numeric value order the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < MINUTES_PER_HOUR {
            Some(Self(hour * MINUTES_PER_HOUR + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s.split_once(':').ok_or(ClockTimeError::InvalidFormat)?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty() || hour.len() > 2 || !all_digits(hour) {
            return Err(ClockTimeError::InvalidFormat);
        }
        if minute.len() != 2 || !all_digits(minute) {
            return Err(ClockTimeError::InvalidFormat);
        }

        let hour: u16 = hour.parse().map_err(|_| ClockTimeError::InvalidFormat)?;
        let minute: u16 = minute.parse().map_err(|_| ClockTimeError::InvalidFormat)?;

        ClockTime::from_hm(hour, minute).ok_or(ClockTimeError::InvalidFormat)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Half-open interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: ClockTime,
    end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, ClockTimeError> {
        if end <= start {
            return Err(ClockTimeError::EmptyRange);
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ClockTimeError> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// `s1 < e2 && s2 < e1`; touching ranges do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Day of the week, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    const NAMES: [&'static str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    pub fn new(day: i64) -> Result<Self, ClockTimeError> {
        u8::try_from(day)
            .ok()
            .filter(|d| (*d as usize) < Self::NAMES.len())
            .map(Self)
            .ok_or(ClockTimeError::InvalidDay)
    }

    pub fn index(self) -> i32 {
        i32::from(self.0)
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_padded_and_unpadded_hours() {
        assert_eq!(t("09:05").minutes(), 9 * 60 + 5);
        assert_eq!(t("9:05"), t("09:05"));
        assert_eq!(t("0:00").minutes(), 0);
        assert_eq!(t("23:59").minutes(), 23 * 60 + 59);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["24:00", "12:60", "12:5", "123:00", ":30", "12-30", "ab:cd", "", "1:000", " 9:00"] {
            assert_eq!(
                bad.parse::<ClockTime>(),
                Err(ClockTimeError::InvalidFormat),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn renders_zero_padded() {
        assert_eq!(t("7:30").to_string(), "07:30");
        assert_eq!(ClockTime::from_minutes(0).unwrap().to_string(), "00:00");
        assert!(ClockTime::from_minutes(24 * 60).is_none());
    }

    #[test]
    fn numeric_order_matches_clock_order() {
        // "9:00" sorts after "10:00" as text; the parsed values must not.
        assert!(t("9:00") < t("10:00"));
    }

    #[test]
    fn range_requires_end_after_start() {
        assert_eq!(TimeRange::parse("10:00", "10:00"), Err(ClockTimeError::EmptyRange));
        assert_eq!(TimeRange::parse("10:00", "09:00"), Err(ClockTimeError::EmptyRange));
        assert!(TimeRange::parse("10:00", "10:01").is_ok());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = TimeRange::parse("09:00", "10:00").unwrap();
        let touching = TimeRange::parse("10:00", "11:00").unwrap();
        let inside = TimeRange::parse("09:15", "09:45").unwrap();
        let around = TimeRange::parse("08:00", "12:00").unwrap();
        let tail = TimeRange::parse("09:59", "10:30").unwrap();

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&inside));
        assert!(a.overlaps(&around));
        assert!(around.overlaps(&a));
        assert!(a.overlaps(&tail));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn day_of_week_bounds() {
        assert_eq!(DayOfWeek::new(0).unwrap().name(), "Sunday");
        assert_eq!(DayOfWeek::new(6).unwrap().name(), "Saturday");
        assert_eq!(DayOfWeek::new(7), Err(ClockTimeError::InvalidDay));
        assert_eq!(DayOfWeek::new(-1), Err(ClockTimeError::InvalidDay));
    }
}
