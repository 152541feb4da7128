//! Repository implementation for users.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        types::{UserEmail, UserId},
        user::{NewUser, UpdateUser, User, UserCredentials},
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{
        DieselRepository, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|u| User::try_from(u).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_credentials_by_email(
        &self,
        email: &UserEmail,
    ) -> RepositoryResult<Option<UserCredentials>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|u| UserCredentials::try_from(u).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_users = users::table
            .order(users::created_at.desc())
            .then_order_by(users::id.desc())
            .load::<DbUser>(&mut conn)?;

        db_users
            .into_iter()
            .map(|u| User::try_from(u).map_err(RepositoryError::from))
            .collect()
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user = DbNewUser::from_domain(new_user, Utc::now().naive_utc());

        let db_user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }

    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = if updates.is_empty() {
            users::table.find(id.get()).first::<DbUser>(&mut conn)?
        } else {
            let db_updates: DbUpdateUser = updates.into();
            diesel::update(users::table.find(id.get()))
                .set(&db_updates)
                .get_result::<DbUser>(&mut conn)?
        };

        User::try_from(db_user).map_err(RepositoryError::from)
    }
}
