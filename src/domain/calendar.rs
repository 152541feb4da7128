//! Month grid of the trip calendar.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::trip::Trip;
use crate::domain::types::{TripId, TripStatus, TypeConstraintError};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers; weeks start on Sunday.
pub const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Years accepted by [`YearMonth::new`].
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, TypeConstraintError> {
        if !YEAR_RANGE.contains(&year) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "year {year} is out of range"
            )));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("{year}-{month}")))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|first| first.pred_opt())
            .map_or(0, |last| last.day())
    }

    /// Number of blank cells before day 1 (0 for a month starting on Sunday).
    pub fn leading_blanks(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

/// Trip occurrence on a single calendar day.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalendarEvent {
    pub trip_id: TripId,
    pub name: String,
    pub status: TripStatus,
    pub is_start: bool,
    pub is_end: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub day_names: [&'static str; 7],
    pub prev: YearMonth,
    pub next: YearMonth,
    /// Leading `None` cells pad the first week, then one cell per day.
    pub cells: Vec<Option<CalendarDay>>,
}

impl CalendarMonth {
    /// Lays out `month` and attaches every trip whose date range covers a day.
    pub fn build(month: YearMonth, trips: &[Trip]) -> Self {
        let mut cells: Vec<Option<CalendarDay>> =
            (0..month.leading_blanks()).map(|_| None).collect();

        let dates = month
            .first_day()
            .iter_days()
            .take(month.days_in_month() as usize);
        for (day, date) in (1..).zip(dates) {
            let events = trips
                .iter()
                .filter(|trip| trip.covers(date))
                .map(|trip| CalendarEvent {
                    trip_id: trip.id,
                    name: trip.name.as_str().to_string(),
                    status: trip.status,
                    is_start: trip.start_date == Some(date),
                    is_end: trip.end_date.unwrap_or(date) == date,
                })
                .collect();
            cells.push(Some(CalendarDay { day, date, events }));
        }

        Self {
            year: month.year,
            month: month.month,
            month_name: month.name(),
            day_names: DAY_NAMES,
            prev: month.prev(),
            next: month.next(),
            cells,
        }
    }

    /// Days that have at least one trip.
    pub fn busy_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells
            .iter()
            .flatten()
            .filter(|day| !day.events.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::tests::{date, trip};

    #[test]
    fn month_arithmetic_wraps_years() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(jan.next(), YearMonth::new(2024, 2).unwrap());
        assert_eq!(YearMonth::new(2024, 12).unwrap().next().year, 2025);
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn years_outside_range_are_rejected() {
        assert!(YearMonth::new(0, 6).is_err());
        assert!(YearMonth::new(10_000, 1).is_err());
        assert!(YearMonth::new(NaiveDate::MAX.year(), 12).is_err());

        let last = YearMonth::new(9999, 12).unwrap();
        assert_eq!(last.days_in_month(), 31);
        let month = CalendarMonth::build(last, &[]);
        assert_eq!(month.cells.iter().flatten().count(), 31);
        assert_eq!(month.next, YearMonth { year: 10_000, month: 1 });
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 1).unwrap().days_in_month(), 31);
    }

    #[test]
    fn january_2024_starts_on_monday() {
        let month = CalendarMonth::build(YearMonth::new(2024, 1).unwrap(), &[]);
        assert_eq!(month.month_name, "January");
        assert!(month.cells[0].is_none());
        assert_eq!(month.cells[1].as_ref().unwrap().day, 1);
        assert_eq!(month.cells.len(), 1 + 31);
        assert_eq!(month.busy_days().count(), 0);
    }

    #[test]
    fn trips_are_placed_on_covered_days() {
        let mut t = trip(7, "Japan", TripStatus::Upcoming);
        t.start_date = Some(date("2024-01-30"));
        t.end_date = Some(date("2024-02-03"));

        let month = CalendarMonth::build(YearMonth::new(2024, 1).unwrap(), &[t]);
        let busy: Vec<_> = month.busy_days().collect();
        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0].day, 30);
        assert!(busy[0].events[0].is_start);
        assert!(!busy[1].events[0].is_end);

        let feb = CalendarMonth::build(YearMonth::new(2024, 2).unwrap(), &[]);
        assert_eq!(feb.cells.iter().take_while(|c| c.is_none()).count(), 4);
    }
}
