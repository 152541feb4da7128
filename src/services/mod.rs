//! Business logic shared by the HTTP routes.
//!
//! Services are generic over the repository traits they need so that tests can
//! substitute [`crate::repository::mock::MockRepository`].

use crate::domain::trip::Trip;
use crate::domain::types::{TripId, UserId};
use crate::domain::user::User;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{TripReader, UserReader};

pub mod admin;
pub mod auth;
pub mod calendar;
pub mod community;
pub mod dashboard;
pub mod errors;
pub mod explore;
pub mod itinerary;
pub mod profile;
pub mod trips;

pub use errors::{ServiceError, ServiceResult};

/// Default and maximum page sizes of list endpoints.
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Rejects users lacking `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "The user doesn't have enough privileges".to_string(),
        ))
    }
}

/// Id of the token owner.
pub fn current_user_id(user: &AuthenticatedUser) -> ServiceResult<UserId> {
    user.user_id().ok_or(ServiceError::Unauthorized)
}

/// Loads the token owner, which may have been deleted since the token was issued.
pub fn load_current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    repo.get_user_by_id(user_id)?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
}

/// Loads a trip and checks that `user_id` owns it.
pub fn owned_trip<R>(repo: &R, user_id: UserId, trip_id: TripId) -> ServiceResult<Trip>
where
    R: TripReader + ?Sized,
{
    let trip = repo
        .get_trip_by_id(trip_id)?
        .ok_or_else(|| ServiceError::NotFound("Trip not found".to_string()))?;
    if trip.user_id != user_id {
        return Err(ServiceError::Forbidden(
            "Not authorized to modify this trip".to_string(),
        ));
    }
    Ok(trip)
}

/// Applies `skip`/`limit` to an in-memory list.
pub fn paginate<T>(items: Vec<T>, skip: Option<usize>, limit: Option<usize>) -> Vec<T> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    items
        .into_iter()
        .skip(skip.unwrap_or(0))
        .take(limit)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_applies_defaults_and_cap() {
        let items: Vec<usize> = (0..250).collect();
        assert_eq!(paginate(items.clone(), None, None).len(), DEFAULT_LIMIT);
        assert_eq!(paginate(items.clone(), Some(240), Some(50)).len(), 10);
        assert_eq!(paginate(items, Some(0), Some(500)).len(), MAX_LIMIT);
    }
}
