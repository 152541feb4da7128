use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::domain::itinerary::{NewStopActivity, NewTripStop, parse_scheduled_time};
use crate::domain::types::{ActivityId, CityId, SanitizedText, StopId, TripId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize)]
/// Body of the add-stop request.
pub struct AddStopForm {
    pub city_id: i32,
    /// Position in the itinerary; appended after the last stop when absent.
    pub order_index: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct AddStopPayload {
    pub city_id: CityId,
    pub order_index: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AddStopPayload {
    /// `next_index` is used when the request did not pick a position.
    pub fn into_domain(self, trip_id: TripId, next_index: i32) -> Result<NewTripStop, FormError> {
        Ok(NewTripStop::new(
            trip_id,
            self.city_id,
            self.order_index.unwrap_or(next_index),
            self.start_date,
            self.end_date,
        )?)
    }
}

impl TryFrom<AddStopForm> for AddStopPayload {
    type Error = FormError;

    fn try_from(form: AddStopForm) -> Result<Self, Self::Error> {
        Ok(Self {
            city_id: CityId::new(form.city_id)?,
            order_index: form.order_index,
            start_date: form.start_date,
            end_date: form.end_date,
        })
    }
}

#[derive(Debug, Deserialize)]
/// Body of the schedule-activity request.
pub struct ScheduleActivityForm {
    pub activity_id: i32,
    /// `HH:MM`.
    pub scheduled_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct ScheduleActivityPayload {
    pub activity_id: ActivityId,
    pub scheduled_time: Option<NaiveTime>,
    pub notes: Option<SanitizedText>,
}

impl ScheduleActivityPayload {
    pub fn into_domain(self, stop_id: StopId) -> NewStopActivity {
        NewStopActivity {
            stop_id,
            activity_id: self.activity_id,
            scheduled_time: self.scheduled_time,
            notes: self.notes,
        }
    }
}

impl TryFrom<ScheduleActivityForm> for ScheduleActivityPayload {
    type Error = FormError;

    fn try_from(form: ScheduleActivityForm) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: ActivityId::new(form.activity_id)?,
            scheduled_time: non_blank(form.scheduled_time)
                .map(|t| parse_scheduled_time(&t))
                .transpose()?,
            notes: SanitizedText::optional(form.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_appended_when_no_index_given() {
        let payload = AddStopPayload::try_from(AddStopForm {
            city_id: 2,
            order_index: None,
            start_date: None,
            end_date: None,
        })
        .unwrap();
        let stop = payload.into_domain(TripId::new(1).unwrap(), 3).unwrap();
        assert_eq!(stop.order_index, 3);
    }

    #[test]
    fn invalid_ids_and_times_are_rejected() {
        assert!(matches!(
            AddStopPayload::try_from(AddStopForm {
                city_id: 0,
                order_index: None,
                start_date: None,
                end_date: None,
            }),
            Err(FormError::InvalidId)
        ));
        assert!(
            ScheduleActivityPayload::try_from(ScheduleActivityForm {
                activity_id: 1,
                scheduled_time: Some("late".into()),
                notes: None,
            })
            .is_err()
        );
    }

    #[test]
    fn blank_time_is_unscheduled() {
        let payload = ScheduleActivityPayload::try_from(ScheduleActivityForm {
            activity_id: 1,
            scheduled_time: Some("".into()),
            notes: Some("Book ahead".into()),
        })
        .unwrap();
        assert!(payload.scheduled_time.is_none());
        assert_eq!(payload.notes.unwrap().as_str(), "Book ahead");
    }
}
