//! Calendar-day range over `created_at`.
//!
//! Both ends are whole days. The end day is inclusive, which in timestamp
//! terms means `created_at < end + 1 day`: an order at `end 23:59:59` matches,
//! one at `end + 1 00:00:00` does not.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

/// Error for a range whose start falls after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("start_date {start} is after end_date {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Optional `[start, end]` day range. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatedRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl CreatedRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateRange`] if both ends are given and `start` is after `end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, InvalidDateRange> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Inclusive lower bound: midnight UTC of the start day.
    #[must_use]
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.start.map(start_of_day)
    }

    /// Exclusive upper bound: midnight UTC of the day after the end day.
    ///
    /// `None` when there is no end day, or when the end day is the last
    /// representable date (nothing can be created after it).
    #[must_use]
    pub fn upper_bound_exclusive(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|end| end.checked_add_days(Days::new(1)))
            .map(start_of_day)
    }

    /// Whether `created_at` falls inside the range.
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        self.lower_bound().is_none_or(|lower| created_at >= lower)
            && self
                .upper_bound_exclusive()
                .is_none_or(|upper| created_at < upper)
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        day(y, m, d).and_hms_opt(h, min, s).unwrap().and_utc()
    }

    #[test]
    fn test_single_day_includes_last_second() {
        let range = CreatedRange::new(Some(day(2024, 3, 9)), Some(day(2024, 3, 9))).unwrap();

        assert!(range.contains(at(2024, 3, 9, 0, 0, 0)));
        assert!(range.contains(at(2024, 3, 9, 23, 59, 59)));
        assert!(!range.contains(at(2024, 3, 10, 0, 0, 0)));
        assert!(!range.contains(at(2024, 3, 8, 23, 59, 59)));
    }

    #[test]
    fn test_bounds() {
        let range = CreatedRange::new(Some(day(2024, 1, 1)), Some(day(2024, 1, 31))).unwrap();
        assert_eq!(range.lower_bound(), Some(at(2024, 1, 1, 0, 0, 0)));
        assert_eq!(range.upper_bound_exclusive(), Some(at(2024, 2, 1, 0, 0, 0)));
    }

    #[test]
    fn test_open_ended() {
        let range = CreatedRange::new(None, Some(day(2024, 1, 31))).unwrap();
        assert!(range.contains(at(1999, 1, 1, 0, 0, 0)));
        assert!(range.lower_bound().is_none());

        let range = CreatedRange::default();
        assert!(range.contains(at(2030, 6, 1, 12, 0, 0)));
        assert!(range.upper_bound_exclusive().is_none());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = CreatedRange::new(Some(day(2024, 2, 1)), Some(day(2024, 1, 1))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "start_date 2024-02-01 is after end_date 2024-01-01"
        );
    }
}
