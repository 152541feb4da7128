//! Trips and the list-level helpers used by the "My Trips" and dashboard views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::expense::TripExpense;
use crate::domain::itinerary::StopDetails;
use crate::domain::types::{
    Amount, ImageUrl, SanitizedText, ShareToken, TripId, TripName, TripStatus,
    TypeConstraintError, UserId,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub user_id: UserId,
    pub name: TripName,
    pub description: Option<SanitizedText>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<ImageUrl>,
    pub status: TripStatus,
    pub is_public: bool,
    pub share_token: Option<ShareToken>,
    pub estimated_budget: Amount,
}

impl Trip {
    /// Number of days between start and end (`end - start`), when both are set.
    pub fn duration_days(&self) -> Option<i64> {
        duration_days(self.start_date, self.end_date)
    }

    /// Whether `day` falls within the trip's inclusive date range.
    pub fn covers(&self, day: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= day && day <= end,
            (Some(start), None) => start == day,
            _ => false,
        }
    }

    /// Whether the trip may be read by `user_id`.
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id || self.is_public
    }
}

/// Day count between two dates using exclusive arithmetic: 2025-06-15 to
/// 2025-06-28 is 13 days.
pub fn duration_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    }
}

/// Rejects ranges whose end precedes their start.
pub fn ensure_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), TypeConstraintError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(TypeConstraintError::InvalidValue(
            "end date must not be before start date".to_string(),
        )),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug)]
pub struct NewTrip {
    pub user_id: UserId,
    pub name: TripName,
    pub description: Option<SanitizedText>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<ImageUrl>,
    pub status: TripStatus,
    pub is_public: bool,
    pub estimated_budget: Amount,
}

/// Partial trip update; `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateTrip {
    pub name: Option<TripName>,
    pub description: Option<SanitizedText>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<ImageUrl>,
    pub status: Option<TripStatus>,
    pub is_public: Option<bool>,
    pub estimated_budget: Option<Amount>,
}

impl UpdateTrip {
    /// Whether applying the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.cover_image.is_none()
            && self.status.is_none()
            && self.is_public.is_none()
            && self.estimated_budget.is_none()
    }

    /// Validates the date range that results from applying this update to `trip`.
    pub fn check_against(&self, trip: &Trip) -> Result<(), TypeConstraintError> {
        ensure_date_order(
            self.start_date.or(trip.start_date),
            self.end_date.or(trip.end_date),
        )
    }
}

/// Row of the trips list: the trip, its destinations in stop order and its
/// duration.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TripSummary {
    #[serde(flatten)]
    pub trip: Trip,
    pub destinations: Vec<String>,
    pub duration_days: Option<i64>,
}

impl TripSummary {
    pub fn new(trip: Trip, destinations: Vec<String>) -> Self {
        let duration_days = trip.duration_days();
        Self {
            trip,
            destinations,
            duration_days,
        }
    }
}

/// Search and status filter applied to a trips list.
#[derive(Clone, Debug, Default)]
pub struct TripFilter {
    search: Option<String>,
    status: Option<TripStatus>,
}

impl TripFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank queries match every trip.
    pub fn search(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim().to_lowercase();
        self.search = (!query.is_empty()).then_some(query);
        self
    }

    /// `None` (the "all" badge) matches every status.
    pub fn status(mut self, status: Option<TripStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, summary: &TripSummary) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(query) => {
                summary.trip.name.to_lowercase().contains(query)
                    || summary
                        .destinations
                        .iter()
                        .any(|d| d.to_lowercase().contains(query))
            }
        };
        let matches_status = self.status.is_none_or(|s| summary.trip.status == s);
        matches_search && matches_status
    }
}

/// Number of trips per status, as shown on the filter badges.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct TripStatusCounts {
    pub all: usize,
    pub draft: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub completed: usize,
}

impl TripStatusCounts {
    pub fn from_trips<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> Self {
        trips.into_iter().fold(Self::default(), |mut acc, trip| {
            acc.all += 1;
            match trip.status {
                TripStatus::Draft => acc.draft += 1,
                TripStatus::Upcoming => acc.upcoming += 1,
                TripStatus::Ongoing => acc.ongoing += 1,
                TripStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }
}

/// Trip with its full itinerary and expenses, as returned by the detail view.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TripDetails {
    #[serde(flatten)]
    pub trip: Trip,
    pub duration_days: Option<i64>,
    pub stops: Vec<StopDetails>,
    pub expenses: Vec<TripExpense>,
}

impl TripDetails {
    pub fn new(trip: Trip, stops: Vec<StopDetails>, expenses: Vec<TripExpense>) -> Self {
        let duration_days = trip.duration_days();
        Self {
            trip,
            duration_days,
            stops,
            expenses,
        }
    }

    pub fn destinations(&self) -> Vec<String> {
        self.stops
            .iter()
            .map(|s| s.city.name.as_str().to_string())
            .collect()
    }
}

impl From<TripDetails> for TripSummary {
    fn from(details: TripDetails) -> Self {
        let destinations = details.destinations();
        TripSummary::new(details.trip, destinations)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub(crate) fn trip(id: i32, name: &str, status: TripStatus) -> Trip {
        Trip {
            id: TripId::new(id).unwrap(),
            user_id: UserId::new(1).unwrap(),
            name: TripName::new(name).unwrap(),
            description: None,
            start_date: None,
            end_date: None,
            cover_image: None,
            status,
            is_public: false,
            share_token: None,
            estimated_budget: Amount::ZERO,
        }
    }

    #[test]
    fn duration_uses_exclusive_difference() {
        assert_eq!(
            duration_days(Some(date("2025-06-15")), Some(date("2025-06-28"))),
            Some(13)
        );
        assert_eq!(duration_days(Some(date("2025-06-15")), None), None);
    }

    #[test]
    fn date_order_is_enforced() {
        assert!(ensure_date_order(Some(date("2025-06-15")), Some(date("2025-06-15"))).is_ok());
        assert!(ensure_date_order(Some(date("2025-06-16")), Some(date("2025-06-15"))).is_err());
        assert!(ensure_date_order(None, Some(date("2025-06-15"))).is_ok());
    }

    #[test]
    fn update_is_checked_against_stored_dates() {
        let mut stored = trip(1, "Japan", TripStatus::Draft);
        stored.start_date = Some(date("2025-03-10"));
        stored.end_date = Some(date("2025-03-25"));

        let bad = UpdateTrip {
            start_date: Some(date("2025-04-01")),
            ..UpdateTrip::default()
        };
        assert!(bad.check_against(&stored).is_err());

        let good = UpdateTrip {
            end_date: Some(date("2025-03-30")),
            ..UpdateTrip::default()
        };
        assert!(good.check_against(&stored).is_ok());
    }

    #[test]
    fn covers_inclusive_range() {
        let mut t = trip(1, "Japan", TripStatus::Upcoming);
        t.start_date = Some(date("2024-01-05"));
        t.end_date = Some(date("2024-01-07"));
        assert!(t.covers(date("2024-01-05")));
        assert!(t.covers(date("2024-01-07")));
        assert!(!t.covers(date("2024-01-08")));
    }

    #[test]
    fn filter_matches_name_or_destination() {
        let summary = TripSummary::new(
            trip(1, "Summer in Europe", TripStatus::Upcoming),
            vec!["Paris".into(), "Barcelona".into()],
        );

        assert!(TripFilter::new().matches(&summary));
        assert!(TripFilter::new().search("  ").matches(&summary));
        assert!(TripFilter::new().search("EUROPE").matches(&summary));
        assert!(TripFilter::new().search("barc").matches(&summary));
        assert!(!TripFilter::new().search("tokyo").matches(&summary));
        assert!(
            !TripFilter::new()
                .status(Some(TripStatus::Draft))
                .matches(&summary)
        );
        assert!(
            TripFilter::new()
                .search("paris")
                .status(Some(TripStatus::Upcoming))
                .matches(&summary)
        );
    }

    #[test]
    fn status_counts() {
        let trips = vec![
            trip(1, "a", TripStatus::Upcoming),
            trip(2, "b", TripStatus::Upcoming),
            trip(3, "c", TripStatus::Completed),
            trip(4, "d", TripStatus::Draft),
        ];
        let counts = TripStatusCounts::from_trips(&trips);
        assert_eq!(
            counts,
            TripStatusCounts {
                all: 4,
                draft: 1,
                upcoming: 2,
                ongoing: 0,
                completed: 1,
            }
        );
    }
}
