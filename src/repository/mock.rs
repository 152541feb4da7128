//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::city::{City, NewCity};
use crate::domain::expense::{NewTripExpense, TripExpense};
use crate::domain::itinerary::{Itinerary, NewStopActivity, NewTripStop, StopActivity, TripStop};
use crate::domain::stats::TripFact;
use crate::domain::trip::{NewTrip, Trip, TripDetails, UpdateTrip};
use crate::domain::types::{
    ActivityCategory, ActivityId, CityId, ExpenseId, ShareToken, StopActivityId, StopId, TripId,
    UserEmail, UserId,
};
use crate::domain::user::{NewUser, UpdateUser, User, UserCredentials};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, CityListQuery, CityReader, CityWriter,
    ExpenseReader, ExpenseWriter, ItineraryReader, ItineraryWriter, StatsReader, TripReader,
    TripWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_credentials_by_email(
            &self,
            email: &UserEmail,
        ) -> RepositoryResult<Option<UserCredentials>>;
        fn list_users(&self) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User>;
    }

    impl TripReader for Repository {
        fn list_trips_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<TripDetails>>;
        fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>>;
        fn get_trip_details(&self, id: TripId) -> RepositoryResult<Option<TripDetails>>;
        fn get_trip_by_share_token(
            &self,
            token: &ShareToken,
        ) -> RepositoryResult<Option<TripDetails>>;
        fn list_public_trips(&self) -> RepositoryResult<Vec<(TripDetails, User)>>;
    }

    impl TripWriter for Repository {
        fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip>;
        fn update_trip(&self, id: TripId, updates: &UpdateTrip) -> RepositoryResult<Trip>;
        fn delete_trip(&self, id: TripId) -> RepositoryResult<()>;
        fn share_trip(&self, id: TripId, token: &ShareToken) -> RepositoryResult<Trip>;
        fn copy_trip(&self, source: &TripDetails, new_trip: &NewTrip) -> RepositoryResult<Trip>;
    }

    impl ItineraryReader for Repository {
        fn get_itinerary(&self, trip_id: TripId) -> RepositoryResult<Itinerary>;
        fn get_stop_by_id(&self, id: StopId) -> RepositoryResult<Option<TripStop>>;
        fn get_stop_activity_by_id(
            &self,
            id: StopActivityId,
        ) -> RepositoryResult<Option<(StopActivity, TripStop)>>;
    }

    impl ItineraryWriter for Repository {
        fn add_stop(&self, new_stop: &NewTripStop) -> RepositoryResult<TripStop>;
        fn remove_stop(&self, id: StopId) -> RepositoryResult<()>;
        fn add_stop_activity(&self, new_entry: &NewStopActivity) -> RepositoryResult<StopActivity>;
        fn remove_stop_activity(&self, id: StopActivityId) -> RepositoryResult<()>;
    }

    impl ExpenseReader for Repository {
        fn get_expense_by_id(&self, id: ExpenseId) -> RepositoryResult<Option<TripExpense>>;
        fn list_expenses(&self, trip_id: TripId) -> RepositoryResult<Vec<TripExpense>>;
    }

    impl ExpenseWriter for Repository {
        fn add_expense(&self, new_expense: &NewTripExpense) -> RepositoryResult<TripExpense>;
        fn remove_expense(&self, id: ExpenseId) -> RepositoryResult<()>;
    }

    impl CityReader for Repository {
        fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>>;
        fn list_cities(&self, query: CityListQuery) -> RepositoryResult<Vec<City>>;
    }

    impl CityWriter for Repository {
        fn create_cities(&self, new_cities: &[NewCity]) -> RepositoryResult<Vec<City>>;
    }

    impl ActivityReader for Repository {
        fn get_activity_by_id(&self, id: ActivityId) -> RepositoryResult<Option<Activity>>;
        fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>>;
    }

    impl ActivityWriter for Repository {
        fn create_activities(&self, new_activities: &[NewActivity]) -> RepositoryResult<usize>;
    }

    impl StatsReader for Repository {
        fn count_users(&self) -> RepositoryResult<usize>;
        fn list_trip_facts(&self) -> RepositoryResult<Vec<TripFact>>;
        fn list_stop_cities(&self) -> RepositoryResult<Vec<City>>;
        fn list_scheduled_categories(&self) -> RepositoryResult<Vec<ActivityCategory>>;
    }
}
