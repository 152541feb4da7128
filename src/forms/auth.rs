use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{ImageUrl, NonEmptyString, SanitizedText, UserEmail};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Registration request.
pub struct SignupForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

/// Validated registration data. The password is still in plain text and is
/// hashed by the service.
#[derive(Debug)]
pub struct SignupPayload {
    pub email: UserEmail,
    pub password: String,
    pub name: Option<NonEmptyString>,
    pub avatar_url: Option<ImageUrl>,
    pub location: Option<NonEmptyString>,
    pub bio: Option<SanitizedText>,
}

impl TryFrom<SignupForm> for SignupPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            email: UserEmail::new(form.email)?,
            password: form.password,
            name: non_blank(form.name).map(NonEmptyString::new).transpose()?,
            avatar_url: non_blank(form.avatar_url).map(ImageUrl::new).transpose()?,
            location: non_blank(form.location).map(NonEmptyString::new).transpose()?,
            bio: SanitizedText::optional(form.bio),
        })
    }
}

#[derive(Debug, Deserialize)]
/// OAuth2 password-flow form: the email travels in `username`.
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
/// JSON login request.
pub struct JsonLoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginPayload {
    pub email: UserEmail,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: UserEmail::new(form.username)?,
            password: form.password,
        })
    }
}

impl TryFrom<JsonLoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: JsonLoginForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email: UserEmail::new(form.email)?,
            password: form.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str) -> SignupForm {
        SignupForm {
            email: email.into(),
            password: password.into(),
            name: Some("  ".into()),
            avatar_url: None,
            location: Some("Berlin".into()),
            bio: None,
        }
    }

    #[test]
    fn signup_is_normalized() {
        let payload = SignupPayload::try_from(signup("Sarah@Example.com", "secret1")).unwrap();
        assert_eq!(payload.email.as_str(), "sarah@example.com");
        assert!(payload.name.is_none());
        assert_eq!(payload.location.unwrap().as_str(), "Berlin");
    }

    #[test]
    fn signup_rejects_short_password_and_bad_email() {
        assert!(matches!(
            SignupPayload::try_from(signup("sarah@example.com", "123")),
            Err(FormError::Validation(_))
        ));
        assert!(SignupPayload::try_from(signup("nope", "secret1")).is_err());
    }

    #[test]
    fn login_form_uses_username_as_email() {
        let payload = LoginPayload::try_from(LoginForm {
            username: "Sarah@example.com".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(payload.email.as_str(), "sarah@example.com");
    }
}
