//! Viewing and editing the traveller's own profile.

use crate::domain::user::{UpdateUser, User};
use crate::forms::profile::{UpdateProfileForm, UpdateProfilePayload};
use crate::models::auth::{AuthenticatedUser, hash_password};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, load_current_user};

pub fn get_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    load_current_user(repo, user)
}

/// Applies the given fields; a new password is hashed before storing.
pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UpdateProfileForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let current = load_current_user(repo, user)?;
    let payload = UpdateProfilePayload::try_from(form)?;

    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|err| {
            log::error!("Failed to hash password: {err}");
            ServiceError::Internal(err.to_string())
        })?;

    let updates = UpdateUser {
        name: payload.name,
        avatar_url: payload.avatar_url,
        location: payload.location,
        bio: payload.bio,
        password_hash,
    };

    Ok(repo.update_user(current.id, &updates)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::NonEmptyString;
    use crate::models::auth::verify_password;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{auth_user, user};

    #[test]
    fn updates_name_and_rehashes_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|id| Ok(Some(user(id.get()))));
        repo.expect_update_user()
            .withf(|id, updates| {
                id.get() == 2
                    && updates.name.as_ref().map(NonEmptyString::as_str) == Some("Emma")
                    && updates
                        .password_hash
                        .as_deref()
                        .is_some_and(|h| verify_password("new-secret", h))
            })
            .times(1)
            .returning(|id, _| Ok(user(id.get())));

        let form = UpdateProfileForm {
            name: Some("Emma".into()),
            password: Some("new-secret".into()),
            ..UpdateProfileForm::default()
        };
        let updated = update_profile(&repo, &auth_user(2), form).unwrap();
        assert_eq!(updated.id.get(), 2);
    }

    #[test]
    fn invalid_form_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|id| Ok(Some(user(id.get()))));
        repo.expect_update_user().never();

        let form = UpdateProfileForm {
            avatar_url: Some("nope".into()),
            ..UpdateProfileForm::default()
        };
        assert!(matches!(
            update_profile(&repo, &auth_user(2), form),
            Err(ServiceError::Form(_))
        ));
    }
}
