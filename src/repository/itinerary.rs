//! Repository implementation for trip stops and scheduled activities.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        activity::Activity,
        city::City,
        itinerary::{
            Itinerary, NewStopActivity, NewTripStop, ScheduledActivity, StopActivity,
            StopDetails, TripStop,
        },
        types::{StopActivityId, StopId, TripId},
    },
    models::{
        activity::Activity as DbActivity,
        city::City as DbCity,
        itinerary::{
            NewStopActivity as DbNewStopActivity, NewTripStop as DbNewTripStop,
            StopActivity as DbStopActivity, TripStop as DbTripStop,
        },
    },
    repository::{
        DieselRepository, ItineraryReader, ItineraryWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Loads the stops of `trip_ids` with their cities and scheduled activities,
/// grouped per trip in `(order_index, id)` order.
pub(crate) fn load_stop_details(
    conn: &mut SqliteConnection,
    trip_ids: &[i32],
) -> RepositoryResult<HashMap<TripId, Vec<StopDetails>>> {
    use crate::schema::{activities, cities, stop_activities, trip_stops};

    if trip_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let stops = trip_stops::table
        .inner_join(cities::table)
        .filter(trip_stops::trip_id.eq_any(trip_ids.to_vec()))
        .order((trip_stops::order_index.asc(), trip_stops::id.asc()))
        .select((trip_stops::all_columns, cities::all_columns))
        .load::<(DbTripStop, DbCity)>(conn)?;

    let stop_ids: Vec<i32> = stops.iter().map(|(stop, _)| stop.id).collect();
    let entries = stop_activities::table
        .inner_join(activities::table)
        .filter(stop_activities::stop_id.eq_any(stop_ids))
        .order((
            stop_activities::scheduled_time.is_null().asc(),
            stop_activities::scheduled_time.asc(),
            stop_activities::id.asc(),
        ))
        .select((stop_activities::all_columns, activities::all_columns))
        .load::<(DbStopActivity, DbActivity)>(conn)?;

    let mut scheduled: HashMap<i32, Vec<ScheduledActivity>> = HashMap::new();
    for (entry, activity) in entries {
        scheduled
            .entry(entry.stop_id)
            .or_default()
            .push(ScheduledActivity {
                entry: StopActivity::try_from(entry)?,
                activity: Activity::try_from(activity)?,
            });
    }

    let mut by_trip: HashMap<TripId, Vec<StopDetails>> = HashMap::new();
    for (stop, city) in stops {
        let activities = scheduled.remove(&stop.id).unwrap_or_default();
        let stop = TripStop::try_from(stop)?;
        by_trip.entry(stop.trip_id).or_default().push(StopDetails {
            stop,
            city: City::try_from(city)?,
            activities,
        });
    }

    Ok(by_trip)
}

impl ItineraryReader for DieselRepository {
    fn get_itinerary(&self, trip_id: TripId) -> RepositoryResult<Itinerary> {
        let mut conn = self.conn()?;
        let stops = load_stop_details(&mut conn, &[trip_id.get()])?
            .remove(&trip_id)
            .unwrap_or_default();
        Ok(Itinerary::new(trip_id, stops))
    }

    fn get_stop_by_id(&self, id: StopId) -> RepositoryResult<Option<TripStop>> {
        use crate::schema::trip_stops;

        let mut conn = self.conn()?;
        let db_stop = trip_stops::table
            .find(id.get())
            .first::<DbTripStop>(&mut conn)
            .optional()?;

        db_stop
            .map(|s| TripStop::try_from(s).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_stop_activity_by_id(
        &self,
        id: StopActivityId,
    ) -> RepositoryResult<Option<(StopActivity, TripStop)>> {
        use crate::schema::{stop_activities, trip_stops};

        let mut conn = self.conn()?;
        let row = stop_activities::table
            .inner_join(trip_stops::table)
            .filter(stop_activities::id.eq(id.get()))
            .select((stop_activities::all_columns, trip_stops::all_columns))
            .first::<(DbStopActivity, DbTripStop)>(&mut conn)
            .optional()?;

        match row {
            Some((entry, stop)) => Ok(Some((
                StopActivity::try_from(entry)?,
                TripStop::try_from(stop)?,
            ))),
            None => Ok(None),
        }
    }
}

impl ItineraryWriter for DieselRepository {
    fn add_stop(&self, new_stop: &NewTripStop) -> RepositoryResult<TripStop> {
        use crate::schema::trip_stops;

        let mut conn = self.conn()?;
        let db_new_stop: DbNewTripStop = new_stop.into();
        let db_stop = diesel::insert_into(trip_stops::table)
            .values(&db_new_stop)
            .get_result::<DbTripStop>(&mut conn)?;

        TripStop::try_from(db_stop).map_err(RepositoryError::from)
    }

    fn remove_stop(&self, id: StopId) -> RepositoryResult<()> {
        use crate::schema::{stop_activities, trip_stops};

        let mut conn = self.conn()?;
        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(stop_activities::table.filter(stop_activities::stop_id.eq(id.get())))
                .execute(conn)?;
            let affected = diesel::delete(trip_stops::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }

    fn add_stop_activity(&self, new_entry: &NewStopActivity) -> RepositoryResult<StopActivity> {
        use crate::schema::stop_activities;

        let mut conn = self.conn()?;
        let db_new_entry: DbNewStopActivity = new_entry.into();
        let db_entry = diesel::insert_into(stop_activities::table)
            .values(&db_new_entry)
            .get_result::<DbStopActivity>(&mut conn)?;

        StopActivity::try_from(db_entry).map_err(RepositoryError::from)
    }

    fn remove_stop_activity(&self, id: StopActivityId) -> RepositoryResult<()> {
        use crate::schema::stop_activities;

        let mut conn = self.conn()?;
        let affected = diesel::delete(stop_activities::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
