use chrono::NaiveDate;

use crate::domain::dashboard::{TravelStats, UPCOMING_LIMIT, upcoming_trips};
use crate::domain::trip::{TripStatusCounts, TripSummary};
use crate::dto::DashboardData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CityListQuery, CityReader, TripReader};
use crate::services::{ServiceResult, current_user_id};

/// Number of top rated cities suggested on the dashboard.
pub const RECOMMENDED_LIMIT: usize = 4;

pub fn dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<DashboardData>
where
    R: TripReader + CityReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trips = repo.list_trips_by_user(user_id)?;

    let stats = TravelStats::from_trips(&trips);
    let counts = TripStatusCounts::from_trips(trips.iter().map(|d| &d.trip));
    let summaries: Vec<TripSummary> = trips.into_iter().map(TripSummary::from).collect();

    let recommended_cities =
        repo.list_cities(CityListQuery::new().paginate(0, RECOMMENDED_LIMIT))?;

    Ok(DashboardData {
        name: user.name.clone(),
        stats,
        counts,
        upcoming_trips: upcoming_trips(&summaries, today, UPCOMING_LIMIT),
        recommended_cities,
    })
}
