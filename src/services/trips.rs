//! Trip management: listing, CRUD, sharing and the budget view.

use serde::Deserialize;

use crate::domain::budget::{BudgetBreakdown, CategoryTotals};
use crate::domain::expense::TripExpense;
use crate::domain::trip::{
    Trip, TripDetails, TripFilter, TripStatusCounts, TripSummary, UpdateTrip,
};
use crate::domain::types::{ExpenseId, ShareToken, TripId, TripStatus};
use crate::dto::DeleteResponse;
use crate::forms::expense::{AddExpenseForm, AddExpensePayload};
use crate::forms::trip::{CreateTripForm, CreateTripPayload, UpdateTripForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ExpenseReader, ExpenseWriter, TripReader, TripWriter};
use crate::services::{
    MAX_LIMIT, ServiceError, ServiceResult, current_user_id, owned_trip, paginate,
};

/// Query parameters of the trips list.
#[derive(Debug, Default, Deserialize)]
pub struct TripsQuery {
    pub q: Option<String>,
    /// A status label or `all`.
    pub status: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

fn parse_status_filter(status: Option<&str>) -> ServiceResult<Option<TripStatus>> {
    match status.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => Ok(Some(s.parse::<TripStatus>()?)),
    }
}

fn not_found() -> ServiceError {
    ServiceError::NotFound("Trip not found".to_string())
}

/// Own trips ordered by start date, filtered and paginated.
pub fn list_trips<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: TripsQuery,
) -> ServiceResult<Vec<TripSummary>>
where
    R: TripReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let mut filter = TripFilter::new().status(parse_status_filter(params.status.as_deref())?);
    if let Some(q) = &params.q {
        filter = filter.search(q);
    }

    let trips: Vec<TripSummary> = repo
        .list_trips_by_user(user_id)?
        .into_iter()
        .map(TripSummary::from)
        .filter(|summary| filter.matches(summary))
        .collect();

    Ok(paginate(
        trips,
        params.skip,
        Some(params.limit.unwrap_or(MAX_LIMIT)),
    ))
}

/// Badge counts for the status filter.
pub fn trip_counts<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<TripStatusCounts>
where
    R: TripReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trips = repo.list_trips_by_user(user_id)?;
    Ok(TripStatusCounts::from_trips(trips.iter().map(|d| &d.trip)))
}

pub fn create_trip<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateTripForm,
) -> ServiceResult<TripDetails>
where
    R: TripWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let payload = CreateTripPayload::try_from(form)?;
    let trip = repo.create_trip(&payload.into_domain(user_id))?;
    log::info!("User {user_id} created trip {}", trip.id);
    Ok(TripDetails::new(trip, Vec::new(), Vec::new()))
}

/// Full trip view for its owner or for anyone when the trip is public.
pub fn get_trip<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<TripDetails>
where
    R: TripReader + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    let details = repo.get_trip_details(trip_id)?.ok_or_else(not_found)?;
    if !details.trip.is_visible_to(user_id) {
        return Err(ServiceError::Forbidden(
            "Not authorized to view this trip".to_string(),
        ));
    }
    Ok(details)
}

pub fn update_trip<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
    form: UpdateTripForm,
) -> ServiceResult<Trip>
where
    R: TripReader + TripWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    let trip = owned_trip(repo, user_id, trip_id)?;

    let updates = UpdateTrip::try_from(form)?;
    updates.check_against(&trip)?;
    if updates.is_empty() {
        return Ok(trip);
    }
    Ok(repo.update_trip(trip_id, &updates)?)
}

/// Removes the trip together with its stops, scheduled activities and expenses.
pub fn delete_trip<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
) -> ServiceResult<DeleteResponse>
where
    R: TripReader + TripWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    owned_trip(repo, user_id, trip_id)?;

    repo.delete_trip(trip_id).map_err(|err| {
        log::error!("Failed to delete trip {trip_id}: {err}");
        err
    })?;
    log::info!("User {user_id} deleted trip {trip_id}");
    Ok(DeleteResponse { success: true })
}

/// Makes the trip public and returns it with its share token. An already
/// issued token is kept so shared links stay valid.
pub fn share_trip<R>(repo: &R, user: &AuthenticatedUser, trip_id: i32) -> ServiceResult<Trip>
where
    R: TripReader + TripWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    let trip = owned_trip(repo, user_id, trip_id)?;

    let token = trip.share_token.clone().unwrap_or_else(ShareToken::generate);
    Ok(repo.share_trip(trip_id, &token)?)
}

pub fn trip_budget<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
) -> ServiceResult<BudgetBreakdown>
where
    R: TripReader + ?Sized,
{
    let details = get_trip(repo, user, trip_id)?;
    let totals = CategoryTotals::from_expenses(&details.expenses);
    Ok(BudgetBreakdown::compute(
        totals,
        details.trip.estimated_budget,
        details.duration_days,
    ))
}

pub fn add_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    trip_id: i32,
    form: AddExpenseForm,
) -> ServiceResult<TripExpense>
where
    R: TripReader + ExpenseWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let trip_id = TripId::new(trip_id).map_err(|_| not_found())?;
    owned_trip(repo, user_id, trip_id)?;

    let payload = AddExpensePayload::try_from(form)?;
    Ok(repo.add_expense(&payload.into_domain(trip_id))?)
}

pub fn remove_expense<R>(
    repo: &R,
    user: &AuthenticatedUser,
    expense_id: i32,
) -> ServiceResult<DeleteResponse>
where
    R: TripReader + ExpenseReader + ExpenseWriter + ?Sized,
{
    let user_id = current_user_id(user)?;
    let missing = || ServiceError::NotFound("Expense not found".to_string());
    let expense_id = ExpenseId::new(expense_id).map_err(|_| missing())?;
    let expense = repo.get_expense_by_id(expense_id)?.ok_or_else(missing)?;
    owned_trip(repo, user_id, expense.trip_id)?;

    repo.remove_expense(expense_id)?;
    Ok(DeleteResponse { success: true })
}
