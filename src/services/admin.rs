//! Admin analytics. Every operation requires the admin role.

use serde::Deserialize;

use crate::domain::stats::{PlatformStats, UserRow, trips_per_user};
use crate::models::auth::{ADMIN_ROLE, AuthenticatedUser};
use crate::repository::{StatsReader, UserReader};
use crate::services::{ServiceResult, ensure_role};

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub q: Option<String>,
}

pub fn platform_stats<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<PlatformStats>
where
    R: StatsReader + ?Sized,
{
    ensure_role(user, ADMIN_ROLE)?;

    let total_users = repo.count_users()?;
    let trips = repo.list_trip_facts()?;
    let stop_cities = repo.list_stop_cities()?;
    let categories = repo.list_scheduled_categories()?;

    Ok(PlatformStats::compute(
        total_users,
        &trips,
        &stop_cities,
        &categories,
    ))
}

/// Users table, newest first, optionally filtered by name or email.
pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: UsersQuery,
) -> ServiceResult<Vec<UserRow>>
where
    R: UserReader + StatsReader + ?Sized,
{
    ensure_role(user, ADMIN_ROLE)?;

    let counts = trips_per_user(&repo.list_trip_facts()?);
    let query = params.q.unwrap_or_default();
    Ok(repo
        .list_users()?
        .iter()
        .map(|u| UserRow::new(u, counts.get(&u.id).copied().unwrap_or(0)))
        .filter(|row| row.matches(&query))
        .collect())
}
