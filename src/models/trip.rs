//! Diesel models representing trips.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::trip::{
    NewTrip as DomainNewTrip, Trip as DomainTrip, UpdateTrip as DomainUpdateTrip,
};
use crate::domain::types::{
    Amount, ImageUrl, SanitizedText, TripId, TripName, TripStatus,
    TypeConstraintError, UserId,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trips)]
/// Diesel model for [`crate::domain::trip::Trip`].
pub struct Trip {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub status: String,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub estimated_budget: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trips)]
/// Insertable form of [`Trip`].
pub struct NewTrip<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<&'a str>,
    pub status: &'a str,
    pub is_public: bool,
    pub estimated_budget: f64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::trips)]
/// Data used when updating a [`Trip`] record. `None` columns are skipped.
pub struct UpdateTrip<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_image: Option<&'a str>,
    pub status: Option<&'a str>,
    pub is_public: Option<bool>,
    pub estimated_budget: Option<f64>,
}

impl TryFrom<Trip> for DomainTrip {
    type Error = TypeConstraintError;

    fn try_from(trip: Trip) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TripId::try_from(trip.id)?,
            user_id: UserId::try_from(trip.user_id)?,
            name: TripName::new(trip.name)?,
            description: optional(trip.description, SanitizedText::new),
            start_date: trip.start_date,
            end_date: trip.end_date,
            cover_image: optional(trip.cover_image, ImageUrl::new),
            status: trip.status.parse()?,
            is_public: trip.is_public,
            share_token: trip.share_token.map(|token| token.parse()).transpose()?,
            estimated_budget: Amount::new(trip.estimated_budget)?,
        })
    }
}

impl<'a> From<&'a DomainNewTrip> for NewTrip<'a> {
    fn from(trip: &'a DomainNewTrip) -> Self {
        Self {
            user_id: trip.user_id.get(),
            name: trip.name.as_str(),
            description: trip.description.as_ref().map(SanitizedText::as_str),
            start_date: trip.start_date,
            end_date: trip.end_date,
            cover_image: trip.cover_image.as_ref().map(ImageUrl::as_str),
            status: trip.status.as_str(),
            is_public: trip.is_public,
            estimated_budget: trip.estimated_budget.get(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTrip> for UpdateTrip<'a> {
    fn from(trip: &'a DomainUpdateTrip) -> Self {
        Self {
            name: trip.name.as_ref().map(TripName::as_str),
            description: trip.description.as_ref().map(SanitizedText::as_str),
            start_date: trip.start_date,
            end_date: trip.end_date,
            cover_image: trip.cover_image.as_ref().map(ImageUrl::as_str),
            status: trip.status.map(TripStatus::as_str),
            is_public: trip.is_public,
            estimated_budget: trip.estimated_budget.map(Amount::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_trip() -> Trip {
        Trip {
            id: 4,
            user_id: 1,
            name: "Summer in Europe".into(),
            description: Some("Paris and Barcelona".into()),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 28),
            cover_image: None,
            status: "upcoming".into(),
            is_public: true,
            share_token: Some("67e5504410b1426f9247bb680e5fe0c8".into()),
            estimated_budget: 3500.0,
        }
    }

    #[test]
    fn trip_into_domain() {
        let trip = DomainTrip::try_from(db_trip()).expect("valid trip");
        assert_eq!(trip.status, TripStatus::Upcoming);
        assert_eq!(trip.duration_days(), Some(13));
        assert!(trip.share_token.is_some());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut trip = db_trip();
        trip.status = "cancelled".into();
        assert!(DomainTrip::try_from(trip).is_err());
    }

    #[test]
    fn update_skips_unset_columns() {
        let update = DomainUpdateTrip {
            status: Some(TripStatus::Completed),
            ..DomainUpdateTrip::default()
        };
        assert!(!update.is_empty());
        let db: UpdateTrip = (&update).into();
        assert_eq!(db.status, Some("completed"));
        assert!(db.name.is_none());
        assert!(DomainUpdateTrip::default().is_empty());
    }
}
