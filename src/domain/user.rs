use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageUrl, NonEmptyString, SanitizedText, UserEmail, UserId};

/// Registered traveller. The password hash never leaves the repository layer
/// except through [`UserCredentials`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: UserEmail,
    pub name: Option<NonEmptyString>,
    pub avatar_url: Option<ImageUrl>,
    pub location: Option<NonEmptyString>,
    pub bio: Option<SanitizedText>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Name shown next to the user's content, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(NonEmptyString::as_str)
            .unwrap_or_else(|| self.email.as_str())
    }
}

/// User together with the stored password hash, used for login only.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: UserEmail,
    pub password_hash: String,
    pub name: Option<NonEmptyString>,
    pub avatar_url: Option<ImageUrl>,
    pub location: Option<NonEmptyString>,
    pub bio: Option<SanitizedText>,
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateUser {
    pub name: Option<NonEmptyString>,
    pub avatar_url: Option<ImageUrl>,
    pub location: Option<NonEmptyString>,
    pub bio: Option<SanitizedText>,
    pub password_hash: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar_url.is_none()
            && self.location.is_none()
            && self.bio.is_none()
            && self.password_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(name: Option<&str>) -> User {
        User {
            id: UserId::new(1).unwrap(),
            email: UserEmail::new("sarah@example.com").unwrap(),
            name: name.map(|n| NonEmptyString::new(n).unwrap()),
            avatar_url: None,
            location: None,
            bio: None,
            is_admin: false,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(user(Some("Sarah Chen")).display_name(), "Sarah Chen");
        assert_eq!(user(None).display_name(), "sarah@example.com");
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateUser::default().is_empty());
        let update = UpdateUser {
            password_hash: Some("hash".into()),
            ..UpdateUser::default()
        };
        assert!(!update.is_empty());
    }
}
