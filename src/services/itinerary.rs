//! Itinerary builder: stops of a trip and the activities planned at them.

use crate::domain::itinerary::{Itinerary, ScheduledActivity, StopDetails};
use crate::domain::types::{StopActivityId, StopId, TripId};
use crate::dto::DeleteResponse;
use crate::forms::itinerary::{
    AddStopForm, AddStopPayload, ScheduleActivityForm, ScheduleActivityPayload,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    ActivityReader, CityReader, ItineraryReader, ItineraryWriter, TripReader,
};
use crate::services::{ServiceError, ServiceResult, current_user_id, owned_trip};

fn trip_not_found() -> ServiceError {
    ServiceError::NotFound("Trip not found".to_string())
}

fn stop_not_found() -> ServiceError {
    ServiceError::NotFound("Stop not found".to_string())
}

/// Ordered stops of a trip readable by the user.
pub fn get_itinerary<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<Itinerary>
where
    R: TripReader + ItineraryReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| trip_not_found())?;
    let trip = repo.get_trip_by_id(trip_id)?.ok_or_else(trip_not_found)?;
    if !trip.is_visible_to(user_id) {
        return Err(ServiceError::Forbidden(
            "Not authorized to view this trip".to_string(),
        ));
    }
    Ok(repo.get_itinerary(trip_id)?)
}

/// Adds a city stop; without an explicit position it goes after the last stop.
pub fn add_stop<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
    form: AddStopForm,
) -> ServiceResult<StopDetails>
where
    R: TripReader + ItineraryReader + ItineraryWriter + CityReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| trip_not_found())?;
    owned_trip(repo, user_id, trip_id)?;

    let payload = AddStopPayload::try_from(form)?;
    let city = repo
        .get_city_by_id(payload.city_id)?
        .ok_or_else(|| ServiceError::NotFound("City not found".to_string()))?;

    let next_index = match payload.order_index {
        Some(index) => index,
        None => {
            let last = repo
                .get_itinerary(trip_id)?
                .stops
                .iter()
                .map(|s| s.stop.order_index)
                .max();
            match last {
                None => 0,
                Some(last) => last.checked_add(1).ok_or_else(|| {
                    ServiceError::Form("No position left for a new stop".to_string())
                })?,
            }
        }
    };

    let stop = repo.add_stop(&payload.into_domain(trip_id, next_index)?)?;
    log::info!("Added stop {} ({}) to trip {trip_id}", stop.id, city.name);
    Ok(StopDetails {
        stop,
        city,
        activities: Vec::new(),
    })
}

/// Removes a stop together with its scheduled activities.
pub fn remove_stop<R>(
    repo: &R,
    user: &AuthenticatedUser,
    stop_id: i32,
) -> ServiceResult<DeleteResponse>
where
    R: TripReader + ItineraryReader + ItineraryWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let stop_id = StopId::new(stop_id).map_err(|_| stop_not_found())?;
    let stop = repo.get_stop_by_id(stop_id)?.ok_or_else(stop_not_found)?;
    owned_trip(repo, user_id, stop.trip_id)?;

    repo.remove_stop(stop_id)?;
    Ok(DeleteResponse { success: true })
}

pub fn schedule_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    stop_id: i32,
    form: ScheduleActivityForm,
) -> ServiceResult<ScheduledActivity>
where
    R: TripReader + ItineraryReader + ItineraryWriter + ActivityReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let stop_id = StopId::new(stop_id).map_err(|_| stop_not_found())?;
    let stop = repo.get_stop_by_id(stop_id)?.ok_or_else(stop_not_found)?;
    owned_trip(repo, user_id, stop.trip_id)?;

    let payload = ScheduleActivityPayload::try_from(form)?;
    let activity = repo
        .get_activity_by_id(payload.activity_id)?
        .ok_or_else(|| ServiceError::NotFound("Activity not found".to_string()))?;

    let entry = repo.add_stop_activity(&payload.into_domain(stop_id))?;
    Ok(ScheduledActivity { entry, activity })
}

pub fn remove_scheduled_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<DeleteResponse>
where
    R: TripReader + ItineraryReader + ItineraryWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let missing = || ServiceError::NotFound("Activity not found".to_string());
    let id = StopActivityId::new(id).map_err(|_| missing())?;
    let (_, stop) = repo.get_stop_activity_by_id(id)?.ok_or_else(missing)?;
    owned_trip(repo, user_id, stop.trip_id)?;

    repo.remove_stop_activity(id)?;
    Ok(DeleteResponse { success: true })
}
