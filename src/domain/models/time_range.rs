use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Half-open interval `[start, end)` in shop-local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: NaiveDateTime, duration: Duration) -> Self {
        Self { start, end: start + duration }
    }

    pub fn on_day(day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { start: day.and_time(start), end: day.and_time(end) }
    }

    /// The whole calendar day, midnight to midnight.
    pub fn whole_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN);
        Self { start, end: start + Duration::days(1) }
    }

    /// Shared boundaries do not count: back-to-back ranges never overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
