//! Stops (city segments) of a trip and the activities scheduled at them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::city::City;
use crate::domain::types::{
    ActivityId, CityId, SanitizedText, StopActivityId, StopId, TripId, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TripStop {
    pub id: StopId,
    pub trip_id: TripId,
    pub city_id: CityId,
    pub order_index: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug)]
pub struct NewTripStop {
    pub trip_id: TripId,
    pub city_id: CityId,
    pub order_index: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewTripStop {
    pub fn new(
        trip_id: TripId,
        city_id: CityId,
        order_index: i32,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, TypeConstraintError> {
        if order_index < 0 {
            return Err(TypeConstraintError::InvalidValue(
                "order index must not be negative".to_string(),
            ));
        }
        crate::domain::trip::ensure_date_order(start_date, end_date)?;
        Ok(Self {
            trip_id,
            city_id,
            order_index,
            start_date,
            end_date,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StopActivity {
    pub id: StopActivityId,
    pub stop_id: StopId,
    pub activity_id: ActivityId,
    #[serde(default, with = "hh_mm")]
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<SanitizedText>,
}

#[derive(Clone, Debug)]
pub struct NewStopActivity {
    pub stop_id: StopId,
    pub activity_id: ActivityId,
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<SanitizedText>,
}

/// Parses an `HH:MM` (or `HH:MM:SS`) time of day.
pub fn parse_scheduled_time(value: &str) -> Result<NaiveTime, TypeConstraintError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| TypeConstraintError::InvalidValue(format!("invalid time: {value}")))
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse_scheduled_time(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Scheduled activity joined with its catalog entry.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScheduledActivity {
    #[serde(flatten)]
    pub entry: StopActivity,
    pub activity: Activity,
}

/// Stop joined with its city and scheduled activities.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StopDetails {
    #[serde(flatten)]
    pub stop: TripStop,
    pub city: City,
    pub activities: Vec<ScheduledActivity>,
}

impl StopDetails {
    /// Sum of the catalog cost of every activity planned at this stop.
    pub fn activities_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.activity.cost.get()).sum()
    }
}

/// Ordered itinerary of a trip.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Itinerary {
    pub trip_id: TripId,
    pub stops: Vec<StopDetails>,
}

impl Itinerary {
    /// Builds the itinerary keeping stops in `order_index` order, ties broken
    /// by insertion (id) order.
    pub fn new(trip_id: TripId, mut stops: Vec<StopDetails>) -> Self {
        stops.sort_by_key(|s| (s.stop.order_index, s.stop.id));
        Self { trip_id, stops }
    }

    pub fn total_activities_cost(&self) -> f64 {
        self.stops.iter().map(StopDetails::activities_cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scheduled_times() {
        assert_eq!(
            parse_scheduled_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_scheduled_time("18:05:00").unwrap(),
            NaiveTime::from_hms_opt(18, 5, 0).unwrap()
        );
        assert!(parse_scheduled_time("25:00").is_err());
        assert!(parse_scheduled_time("noon").is_err());
    }

    #[test]
    fn new_stop_rejects_bad_input() {
        let trip = TripId::new(1).unwrap();
        let city = CityId::new(2).unwrap();
        assert!(NewTripStop::new(trip, city, -1, None, None).is_err());
        let start = NaiveDate::from_ymd_opt(2025, 6, 20);
        let end = NaiveDate::from_ymd_opt(2025, 6, 18);
        assert!(NewTripStop::new(trip, city, 0, start, end).is_err());
        assert!(NewTripStop::new(trip, city, 0, end, start).is_ok());
    }

    #[test]
    fn scheduled_time_serializes_as_hh_mm() {
        let entry = StopActivity {
            id: StopActivityId::new(1).unwrap(),
            stop_id: StopId::new(1).unwrap(),
            activity_id: ActivityId::new(1).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(14, 0, 0),
            notes: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["scheduled_time"], "14:00");
    }
}
