//! Repository implementation for catalog cities.

use diesel::prelude::*;

use crate::{
    domain::{
        city::{City, NewCity},
        types::CityId,
    },
    models::city::{City as DbCity, NewCity as DbNewCity},
    repository::{
        CityListQuery, CityReader, CityWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CityReader for DieselRepository {
    fn get_city_by_id(&self, id: CityId) -> RepositoryResult<Option<City>> {
        use crate::schema::cities;

        let mut conn = self.conn()?;
        let db_city = cities::table
            .find(id.get())
            .first::<DbCity>(&mut conn)
            .optional()?;

        db_city
            .map(|c| City::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_cities(&self, query: CityListQuery) -> RepositoryResult<Vec<City>> {
        use crate::schema::cities;

        let mut conn = self.conn()?;
        let mut items = cities::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            items = items.filter(
                cities::name
                    .like(pattern.clone())
                    .or(cities::country.like(pattern)),
            );
        }
        if let Some(region) = query.region.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            items = items.filter(cities::region.eq(region.to_string()));
        }
        if let Some(cost_index) = query.cost_index {
            items = items.filter(cities::cost_index.eq(cost_index.as_str()));
        }
        if let Some(pagination) = query.pagination {
            items = items
                .offset(pagination.skip as i64)
                .limit(pagination.limit as i64);
        }

        let db_cities = items
            .order((cities::rating.desc(), cities::id.asc()))
            .load::<DbCity>(&mut conn)?;

        db_cities
            .into_iter()
            .map(|c| City::try_from(c).map_err(RepositoryError::from))
            .collect()
    }
}

impl CityWriter for DieselRepository {
    fn create_cities(&self, new_cities: &[NewCity]) -> RepositoryResult<Vec<City>> {
        use crate::schema::cities;

        let mut conn = self.conn()?;
        // SQLite has no batch `INSERT ... RETURNING`, so rows go in one by one.
        conn.transaction::<Vec<City>, RepositoryError, _>(|conn| {
            new_cities
                .iter()
                .map(|new_city| {
                    let db_new_city: DbNewCity = new_city.into();
                    let db_city = diesel::insert_into(cities::table)
                        .values(&db_new_city)
                        .get_result::<DbCity>(conn)?;
                    Ok(City::try_from(db_city)?)
                })
                .collect()
        })
    }
}
