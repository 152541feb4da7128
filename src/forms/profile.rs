use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{ImageUrl, NonEmptyString, SanitizedText};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Default, Deserialize, Validate)]
/// Partial profile update; absent fields are left unchanged.
pub struct UpdateProfileForm {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateProfilePayload {
    pub name: Option<NonEmptyString>,
    pub avatar_url: Option<ImageUrl>,
    pub location: Option<NonEmptyString>,
    pub bio: Option<SanitizedText>,
    /// New plain-text password to hash.
    pub password: Option<String>,
}

impl TryFrom<UpdateProfileForm> for UpdateProfilePayload {
    type Error = FormError;

    fn try_from(form: UpdateProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: non_blank(form.name).map(NonEmptyString::new).transpose()?,
            avatar_url: non_blank(form.avatar_url).map(ImageUrl::new).transpose()?,
            location: non_blank(form.location).map(NonEmptyString::new).transpose()?,
            bio: SanitizedText::optional(form.bio),
            password: form.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_avatar_url() {
        let form = UpdateProfileForm {
            avatar_url: Some("not a url".into()),
            ..UpdateProfileForm::default()
        };
        assert!(matches!(
            UpdateProfilePayload::try_from(form),
            Err(FormError::InvalidUrl)
        ));
    }

    #[test]
    fn rejects_short_password() {
        let form = UpdateProfileForm {
            password: Some("abc".into()),
            ..UpdateProfileForm::default()
        };
        assert!(UpdateProfilePayload::try_from(form).is_err());
    }
}
