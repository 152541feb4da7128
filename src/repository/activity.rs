//! Repository implementation for catalog activities.

use diesel::prelude::*;

use crate::{
    domain::{
        activity::{Activity, NewActivity},
        types::ActivityId,
    },
    models::activity::{Activity as DbActivity, NewActivity as DbNewActivity},
    repository::{
        ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ActivityReader for DieselRepository {
    fn get_activity_by_id(&self, id: ActivityId) -> RepositoryResult<Option<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_activity = activities::table
            .find(id.get())
            .first::<DbActivity>(&mut conn)
            .optional()?;

        db_activity
            .map(|a| Activity::try_from(a).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let mut items = activities::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            items = items.filter(activities::name.like(format!("%{search}%")));
        }
        if let Some(city_id) = query.city_id {
            items = items.filter(activities::city_id.eq(city_id.get()));
        }
        if let Some(category) = query.category {
            items = items.filter(activities::category.eq(category.as_str()));
        }
        if let Some(pagination) = query.pagination {
            items = items
                .offset(pagination.skip as i64)
                .limit(pagination.limit as i64);
        }

        let db_activities = items
            .order(activities::id.asc())
            .load::<DbActivity>(&mut conn)?;

        db_activities
            .into_iter()
            .map(|a| Activity::try_from(a).map_err(RepositoryError::from))
            .collect()
    }
}

impl ActivityWriter for DieselRepository {
    fn create_activities(&self, new_activities: &[NewActivity]) -> RepositoryResult<usize> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewActivity> = new_activities.iter().map(Into::into).collect();
        let affected = diesel::insert_into(activities::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
