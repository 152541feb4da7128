//! Repository implementation for trips.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        trip::{NewTrip, Trip, TripDetails, UpdateTrip},
        types::{ShareToken, TripId, UserId},
        user::User,
    },
    models::{
        itinerary::{
            NewStopActivity as DbNewStopActivity, NewTripStop as DbNewTripStop,
            TripStop as DbTripStop,
        },
        trip::{NewTrip as DbNewTrip, Trip as DbTrip, UpdateTrip as DbUpdateTrip},
        user::User as DbUser,
    },
    repository::{
        DieselRepository, TripReader, TripWriter,
        errors::{RepositoryError, RepositoryResult},
        expense::load_expenses,
        itinerary::load_stop_details,
    },
};

/// Attaches stops and expenses to each trip, preserving the input order.
fn load_details(
    conn: &mut SqliteConnection,
    db_trips: Vec<DbTrip>,
) -> RepositoryResult<Vec<TripDetails>> {
    let trip_ids: Vec<i32> = db_trips.iter().map(|t| t.id).collect();
    let mut stops = load_stop_details(conn, &trip_ids)?;
    let mut expenses = load_expenses(conn, &trip_ids)?;

    db_trips
        .into_iter()
        .map(|db_trip| -> RepositoryResult<TripDetails> {
            let trip = Trip::try_from(db_trip)?;
            let trip_stops = stops.remove(&trip.id).unwrap_or_default();
            let trip_expenses = expenses.remove(&trip.id).unwrap_or_default();
            Ok(TripDetails::new(trip, trip_stops, trip_expenses))
        })
        .collect()
}

impl TripReader for DieselRepository {
    fn list_trips_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<TripDetails>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trips = trips::table
            .filter(trips::user_id.eq(user_id.get()))
            .order(trips::id.asc())
            .load::<DbTrip>(&mut conn)?;

        let mut details = load_details(&mut conn, db_trips)?;
        details.sort_by_key(|d| (d.trip.start_date.is_none(), d.trip.start_date));
        Ok(details)
    }

    fn get_trip_by_id(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trip = trips::table
            .find(id.get())
            .first::<DbTrip>(&mut conn)
            .optional()?;

        db_trip
            .map(|t| Trip::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_trip_details(&self, id: TripId) -> RepositoryResult<Option<TripDetails>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trip = trips::table
            .find(id.get())
            .first::<DbTrip>(&mut conn)
            .optional()?;

        match db_trip {
            Some(db_trip) => Ok(load_details(&mut conn, vec![db_trip])?.pop()),
            None => Ok(None),
        }
    }

    fn get_trip_by_share_token(
        &self,
        token: &ShareToken,
    ) -> RepositoryResult<Option<TripDetails>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trip = trips::table
            .filter(trips::share_token.eq(token.as_str()))
            .first::<DbTrip>(&mut conn)
            .optional()?;

        match db_trip {
            Some(db_trip) => Ok(load_details(&mut conn, vec![db_trip])?.pop()),
            None => Ok(None),
        }
    }

    fn list_public_trips(&self) -> RepositoryResult<Vec<(TripDetails, User)>> {
        use crate::schema::{trips, users};

        let mut conn = self.conn()?;
        let rows = trips::table
            .inner_join(users::table)
            .filter(trips::is_public.eq(true))
            .order(trips::id.desc())
            .select((trips::all_columns, users::all_columns))
            .load::<(DbTrip, DbUser)>(&mut conn)?;

        let (db_trips, db_users): (Vec<DbTrip>, Vec<DbUser>) = rows.into_iter().unzip();
        let details = load_details(&mut conn, db_trips)?;

        details
            .into_iter()
            .zip(db_users)
            .map(|(details, db_user)| -> RepositoryResult<(TripDetails, User)> {
                Ok((details, User::try_from(db_user)?))
            })
            .collect()
    }
}

impl TripWriter for DieselRepository {
    fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_new_trip: DbNewTrip = new_trip.into();
        let db_trip = diesel::insert_into(trips::table)
            .values(&db_new_trip)
            .get_result::<DbTrip>(&mut conn)?;

        Trip::try_from(db_trip).map_err(RepositoryError::from)
    }

    fn update_trip(&self, id: TripId, updates: &UpdateTrip) -> RepositoryResult<Trip> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trip = if updates.is_empty() {
            trips::table.find(id.get()).first::<DbTrip>(&mut conn)?
        } else {
            let db_updates: DbUpdateTrip = updates.into();
            diesel::update(trips::table.find(id.get()))
                .set(&db_updates)
                .get_result::<DbTrip>(&mut conn)?
        };

        Trip::try_from(db_trip).map_err(RepositoryError::from)
    }

    fn delete_trip(&self, id: TripId) -> RepositoryResult<()> {
        use crate::schema::{stop_activities, trip_expenses, trip_stops, trips};

        let mut conn = self.conn()?;
        conn.transaction::<(), RepositoryError, _>(|conn| {
            let stop_ids = trip_stops::table
                .filter(trip_stops::trip_id.eq(id.get()))
                .select(trip_stops::id);
            diesel::delete(stop_activities::table.filter(stop_activities::stop_id.eq_any(stop_ids)))
                .execute(conn)?;
            diesel::delete(trip_stops::table.filter(trip_stops::trip_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(trip_expenses::table.filter(trip_expenses::trip_id.eq(id.get())))
                .execute(conn)?;
            let affected = diesel::delete(trips::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }

    fn share_trip(&self, id: TripId, token: &ShareToken) -> RepositoryResult<Trip> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let db_trip = diesel::update(trips::table.find(id.get()))
            .set((
                trips::is_public.eq(true),
                trips::share_token.eq(Some(token.as_str())),
            ))
            .get_result::<DbTrip>(&mut conn)?;

        Trip::try_from(db_trip).map_err(RepositoryError::from)
    }

    fn copy_trip(&self, source: &TripDetails, new_trip: &NewTrip) -> RepositoryResult<Trip> {
        use crate::schema::{stop_activities, trip_stops, trips};

        let mut conn = self.conn()?;
        conn.transaction::<Trip, RepositoryError, _>(|conn| {
            let db_new_trip: DbNewTrip = new_trip.into();
            let db_trip = diesel::insert_into(trips::table)
                .values(&db_new_trip)
                .get_result::<DbTrip>(conn)?;

            for stop in &source.stops {
                let db_stop = diesel::insert_into(trip_stops::table)
                    .values(&DbNewTripStop {
                        trip_id: db_trip.id,
                        city_id: stop.stop.city_id.get(),
                        order_index: stop.stop.order_index,
                        start_date: None,
                        end_date: None,
                    })
                    .get_result::<DbTripStop>(conn)?;

                let entries: Vec<DbNewStopActivity> = stop
                    .activities
                    .iter()
                    .map(|scheduled| DbNewStopActivity {
                        stop_id: db_stop.id,
                        activity_id: scheduled.entry.activity_id.get(),
                        scheduled_time: None,
                        notes: scheduled.entry.notes.as_ref().map(|n| n.as_str()),
                    })
                    .collect();
                if !entries.is_empty() {
                    diesel::insert_into(stop_activities::table)
                        .values(&entries)
                        .execute(conn)?;
                }
            }

            Ok(Trip::try_from(db_trip)?)
        })
    }
}
