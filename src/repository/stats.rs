//! Raw platform data used by the admin aggregates.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::{
    domain::{
        city::City,
        stats::TripFact,
        types::{ActivityCategory, TypeConstraintError, UserId},
    },
    models::city::City as DbCity,
    repository::{
        DieselRepository, StatsReader,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl StatsReader for DieselRepository {
    fn count_users(&self) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let total: i64 = users::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }

    fn list_trip_facts(&self) -> RepositoryResult<Vec<TripFact>> {
        use crate::schema::trips;

        let mut conn = self.conn()?;
        let rows = trips::table
            .select((
                trips::user_id,
                trips::status,
                trips::start_date,
                trips::is_public,
            ))
            .load::<(i32, String, Option<NaiveDate>, bool)>(&mut conn)?;

        rows.into_iter()
            .map(|(user_id, status, start_date, is_public)| -> Result<TripFact, TypeConstraintError> {
                Ok(TripFact {
                    user_id: UserId::try_from(user_id)?,
                    status: status.parse()?,
                    start_date,
                    is_public,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)
    }

    fn list_stop_cities(&self) -> RepositoryResult<Vec<City>> {
        use crate::schema::{cities, trip_stops};

        let mut conn = self.conn()?;
        let db_cities = trip_stops::table
            .inner_join(cities::table)
            .select(cities::all_columns)
            .load::<DbCity>(&mut conn)?;

        db_cities
            .into_iter()
            .map(|c| City::try_from(c).map_err(RepositoryError::from))
            .collect()
    }

    fn list_scheduled_categories(&self) -> RepositoryResult<Vec<ActivityCategory>> {
        use crate::schema::{activities, stop_activities};

        let mut conn = self.conn()?;
        let categories = stop_activities::table
            .inner_join(activities::table)
            .select(activities::category)
            .load::<String>(&mut conn)?;

        categories
            .iter()
            .map(|c| c.parse::<ActivityCategory>().map_err(RepositoryError::from))
            .collect()
    }
}
