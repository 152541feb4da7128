//! Figures shown on the traveller's dashboard.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::trip::{TripDetails, TripSummary};
use crate::domain::types::TripStatus;

pub const UPCOMING_LIMIT: usize = 3;

/// Lifetime totals across every trip of a user.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct TravelStats {
    pub total_trips: usize,
    /// Sum of the durations of dated trips that left the draft stage.
    pub days_traveled: i64,
    /// Distinct countries of all stop cities.
    pub countries: usize,
    pub total_spent: f64,
}

impl TravelStats {
    pub fn from_trips(trips: &[TripDetails]) -> Self {
        let days_traveled = trips
            .iter()
            .filter(|d| d.trip.status != TripStatus::Draft)
            .filter_map(|d| d.duration_days)
            .sum();
        let countries: HashSet<&str> = trips
            .iter()
            .flat_map(|d| d.stops.iter().map(|s| s.city.country.as_str()))
            .collect();
        let total_spent: f64 = trips
            .iter()
            .flat_map(|d| d.expenses.iter().map(|e| e.amount.get()))
            .sum();

        Self {
            total_trips: trips.len(),
            days_traveled,
            countries: countries.len(),
            total_spent: (total_spent * 100.0).round() / 100.0,
        }
    }
}

/// Trips that have not started yet, soonest first. Undated trips count when
/// they are marked upcoming and are listed after the dated ones.
pub fn upcoming_trips(trips: &[TripSummary], today: NaiveDate, limit: usize) -> Vec<TripSummary> {
    let mut upcoming: Vec<TripSummary> = trips
        .iter()
        .filter(|s| match s.trip.start_date {
            Some(start) => start >= today && s.trip.status != TripStatus::Completed,
            None => s.trip.status == TripStatus::Upcoming,
        })
        .cloned()
        .collect();
    upcoming.sort_by_key(|s| (s.trip.start_date.is_none(), s.trip.start_date));
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::tests::{date, trip};

    fn summary(id: i32, status: TripStatus, start: Option<&str>) -> TripSummary {
        let mut t = trip(id, "trip", status);
        t.start_date = start.map(date);
        TripSummary::new(t, Vec::new())
    }

    #[test]
    fn picks_future_trips_in_start_order() {
        let today = date("2025-06-01");
        let trips = vec![
            summary(1, TripStatus::Upcoming, Some("2025-09-01")),
            summary(2, TripStatus::Completed, Some("2024-01-01")),
            summary(3, TripStatus::Upcoming, None),
            summary(4, TripStatus::Draft, Some("2025-07-01")),
            summary(5, TripStatus::Draft, None),
        ];
        let ids: Vec<i32> = upcoming_trips(&trips, today, UPCOMING_LIMIT)
            .iter()
            .map(|s| s.trip.id.get())
            .collect();
        assert_eq!(ids, [4, 1, 3]);
        assert_eq!(upcoming_trips(&trips, today, 1).len(), 1);
    }

    #[test]
    fn empty_user_has_zero_stats() {
        assert_eq!(TravelStats::from_trips(&[]), TravelStats::default());
    }
}
