//! Diesel models representing trip stops and scheduled activities.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::domain::itinerary::{
    NewStopActivity as DomainNewStopActivity, NewTripStop as DomainNewTripStop,
    StopActivity as DomainStopActivity, TripStop as DomainTripStop,
};
use crate::domain::types::{
    ActivityId, CityId, SanitizedText, StopActivityId, StopId, TripId, TypeConstraintError,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::trip_stops)]
/// Diesel model for [`crate::domain::itinerary::TripStop`].
pub struct TripStop {
    pub id: i32,
    pub trip_id: i32,
    pub city_id: i32,
    pub order_index: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trip_stops)]
pub struct NewTripStop {
    pub trip_id: i32,
    pub city_id: i32,
    pub order_index: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::stop_activities)]
/// Diesel model for [`crate::domain::itinerary::StopActivity`].
pub struct StopActivity {
    pub id: i32,
    pub stop_id: i32,
    pub activity_id: i32,
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stop_activities)]
pub struct NewStopActivity<'a> {
    pub stop_id: i32,
    pub activity_id: i32,
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<&'a str>,
}

impl TryFrom<TripStop> for DomainTripStop {
    type Error = TypeConstraintError;

    fn try_from(stop: TripStop) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StopId::try_from(stop.id)?,
            trip_id: TripId::try_from(stop.trip_id)?,
            city_id: CityId::try_from(stop.city_id)?,
            order_index: stop.order_index,
            start_date: stop.start_date,
            end_date: stop.end_date,
        })
    }
}

impl From<&DomainNewTripStop> for NewTripStop {
    fn from(stop: &DomainNewTripStop) -> Self {
        Self {
            trip_id: stop.trip_id.get(),
            city_id: stop.city_id.get(),
            order_index: stop.order_index,
            start_date: stop.start_date,
            end_date: stop.end_date,
        }
    }
}

impl TryFrom<StopActivity> for DomainStopActivity {
    type Error = TypeConstraintError;

    fn try_from(entry: StopActivity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StopActivityId::try_from(entry.id)?,
            stop_id: StopId::try_from(entry.stop_id)?,
            activity_id: ActivityId::try_from(entry.activity_id)?,
            scheduled_time: entry.scheduled_time,
            notes: optional(entry.notes, SanitizedText::new),
        })
    }
}

impl<'a> From<&'a DomainNewStopActivity> for NewStopActivity<'a> {
    fn from(entry: &'a DomainNewStopActivity) -> Self {
        Self {
            stop_id: entry.stop_id.get(),
            activity_id: entry.activity_id.get(),
            scheduled_time: entry.scheduled_time,
            notes: entry.notes.as_ref().map(SanitizedText::as_str),
        }
    }
}
