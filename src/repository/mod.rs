//! Persistence layer: reader/writer traits implemented by [`DieselRepository`].

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        activity::{Activity, NewActivity},
        city::{City, NewCity},
        expense::{NewTripExpense, TripExpense},
        itinerary::{Itinerary, NewStopActivity, NewTripStop, StopActivity, TripStop},
        stats::TripFact,
        trip::{NewTrip, Trip, TripDetails, UpdateTrip},
        types::{
            ActivityCategory, ActivityId, CityId, CostIndex, ExpenseId, ShareToken,
            StopActivityId, StopId, TripId, UserEmail, UserId,
        },
        user::{NewUser, UpdateUser, User, UserCredentials},
    },
    repository::errors::RepositoryResult,
};

pub mod activity;
pub mod city;
pub mod errors;
pub mod expense;
pub mod itinerary;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod stats;
pub mod trip;
pub mod user;

/// Diesel-backed repository sharing one SQLite connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CityListQuery {
    /// Substring of the name or country.
    pub search: Option<String>,
    pub region: Option<String>,
    pub cost_index: Option<CostIndex>,
    pub pagination: Option<Pagination>,
}

impl CityListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn cost_index(mut self, cost_index: CostIndex) -> Self {
        self.cost_index = Some(cost_index);
        self
    }

    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.pagination = Some(Pagination { skip, limit });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    /// Substring of the name.
    pub search: Option<String>,
    pub city_id: Option<CityId>,
    pub category: Option<ActivityCategory>,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn city(mut self, city_id: CityId) -> Self {
        self.city_id = Some(city_id);
        self
    }

    pub fn category(mut self, category: ActivityCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.pagination = Some(Pagination { skip, limit });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_credentials_by_email(
        &self,
        email: &UserEmail,
    ) -> RepositoryResult<Option<UserCredentials>>;
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
}

pub trait TripReader {
    /// Trips of `user_id` ordered by start date, undated trips last.
    fn list_trips_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<TripDetails>>;
    fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>>;
    fn get_trip_details(&self, id: TripId) -> RepositoryResult<Option<TripDetails>>;
    fn get_trip_by_share_token(&self, token: &ShareToken)
    -> RepositoryResult<Option<TripDetails>>;
    /// Public trips with their owners, newest first.
    fn list_public_trips(&self) -> RepositoryResult<Vec<(TripDetails, User)>>;
}

pub trait TripWriter {
    fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
    fn update_trip(&self, id: TripId, updates: &UpdateTrip) -> RepositoryResult<Trip>;
    /// Removes the trip together with its stops, scheduled activities and expenses.
    fn delete_trip(&self, id: TripId) -> RepositoryResult<()>;
    /// Marks the trip public and stores `token`.
    fn share_trip(&self, id: TripId, token: &ShareToken) -> RepositoryResult<Trip>;
    /// Inserts `new_trip` and clones the stops and scheduled activities of
    /// `source` into it. Dates and scheduled times are not copied.
    fn copy_trip(&self, source: &TripDetails, new_trip: &NewTrip) -> RepositoryResult<Trip>;
}

pub trait ItineraryReader {
    fn get_itinerary(&self, trip_id: TripId) -> RepositoryResult<Itinerary>;
    fn get_stop_by_id(&self, id: StopId) -> RepositoryResult<Option<TripStop>>;
    /// Scheduled activity together with the stop it belongs to.
    fn get_stop_activity_by_id(
        &self,
        id: StopActivityId,
    ) -> RepositoryResult<Option<(StopActivity, TripStop)>>;
}

pub trait ItineraryWriter {
    fn add_stop(&self, new_stop: &NewTripStop) -> RepositoryResult<TripStop>;
    fn remove_stop(&self, id: StopId) -> RepositoryResult<()>;
    fn add_stop_activity(&self, new_entry: &NewStopActivity) -> RepositoryResult<StopActivity>;
    fn remove_stop_activity(&self, id: StopActivityId) -> RepositoryResult<()>;
}

pub trait ExpenseReader {
    fn get_expense_by_id(&self, id: ExpenseId) -> RepositoryResult<Option<TripExpense>>;
    fn list_expenses(&self, trip_id: TripId) -> RepositoryResult<Vec<TripExpense>>;
}

pub trait ExpenseWriter {
    fn add_expense(&self, new_expense: &NewTripExpense) -> RepositoryResult<TripExpense>;
    fn remove_expense(&self, id: ExpenseId) -> RepositoryResult<()>;
}

pub trait CityReader {
    fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>>;
    fn list_cities(&self, query: CityListQuery) -> RepositoryResult<Vec<City>>;
}

pub trait CityWriter {
    fn create_cities(&self, new_cities: &[NewCity]) -> RepositoryResult<Vec<City>>;
}

pub trait ActivityReader {
    fn get_activity_by_id(&self, id: ActivityId) -> RepositoryResult<Option<Activity>>;
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>>;
}

pub trait ActivityWriter {
    fn create_activities(&self, new_activities: &[NewActivity]) -> RepositoryResult<usize>;
}

/// Raw inputs of the admin aggregates.
pub trait StatsReader {
    fn count_users(&self) -> RepositoryResult<usize>;
    fn list_trip_facts(&self) -> RepositoryResult<Vec<TripFact>>;
    /// One city per trip stop.
    fn list_stop_cities(&self) -> RepositoryResult<Vec<City>>;
    /// One category per scheduled activity.
    fn list_scheduled_categories(&self) -> RepositoryResult<Vec<ActivityCategory>>;
}
