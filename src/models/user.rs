//! Diesel models representing users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    ImageUrl, NonEmptyString, SanitizedText, TypeConstraintError, UserEmail, UserId,
};
use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
    UserCredentials,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Data used when updating a [`User`] record. `None` columns are skipped.
pub struct UpdateUser<'a> {
    pub name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub location: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            email: UserEmail::new(user.email)?,
            name: optional(user.name, NonEmptyString::new),
            avatar_url: optional(user.avatar_url, ImageUrl::new),
            location: optional(user.location, NonEmptyString::new),
            bio: optional(user.bio, SanitizedText::new),
            is_admin: user.is_admin,
            created_at: user.created_at,
        })
    }
}

impl TryFrom<User> for UserCredentials {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let password_hash = user.password_hash.clone();
        Ok(Self {
            user: DomainUser::try_from(user)?,
            password_hash,
        })
    }
}

impl<'a> NewUser<'a> {
    pub fn from_domain(user: &'a DomainNewUser, created_at: NaiveDateTime) -> Self {
        Self {
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            name: user.name.as_ref().map(NonEmptyString::as_str),
            avatar_url: user.avatar_url.as_ref().map(ImageUrl::as_str),
            location: user.location.as_ref().map(NonEmptyString::as_str),
            bio: user.bio.as_ref().map(SanitizedText::as_str),
            is_admin: false,
            created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(user: &'a DomainUpdateUser) -> Self {
        Self {
            name: user.name.as_ref().map(NonEmptyString::as_str),
            avatar_url: user.avatar_url.as_ref().map(ImageUrl::as_str),
            location: user.location.as_ref().map(NonEmptyString::as_str),
            bio: user.bio.as_ref().map(SanitizedText::as_str),
            password_hash: user.password_hash.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn user_into_domain_and_credentials() {
        let now = Utc::now().naive_utc();
        let db = User {
            id: 3,
            email: "Emma@Example.com".into(),
            password_hash: "$2b$hash".into(),
            name: Some("Emma Wilson".into()),
            avatar_url: Some("not a url".into()),
            location: Some("   ".into()),
            bio: None,
            is_admin: true,
            created_at: now,
        };
        let creds = UserCredentials::try_from(db).expect("valid user");
        assert_eq!(creds.password_hash, "$2b$hash");
        assert_eq!(creds.user.email.as_str(), "emma@example.com");
        assert_eq!(creds.user.name.unwrap().as_str(), "Emma Wilson");
        assert!(creds.user.avatar_url.is_none());
        assert!(creds.user.location.is_none());
        assert!(creds.user.is_admin);
    }

    #[test]
    fn from_domain_update_skips_unset_fields() {
        let update = DomainUpdateUser {
            bio: SanitizedText::optional(Some("Loves trains")),
            ..DomainUpdateUser::default()
        };
        let db: UpdateUser = (&update).into();
        assert_eq!(db.bio, Some("Loves trains"));
        assert!(db.name.is_none());
        assert!(db.password_hash.is_none());
    }
}
