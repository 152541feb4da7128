//! Registration, login and token issuing.

use crate::domain::user::{NewUser, User};
use crate::dto::TokenResponse;
use crate::forms::auth::{JsonLoginForm, LoginForm, LoginPayload, SignupForm, SignupPayload};
use crate::models::auth::{AuthenticatedUser, hash_password, verify_password};
use crate::models::config::ServerConfig;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, load_current_user};

pub const EMAIL_TAKEN: &str = "The user with this email already exists in the system.";

/// Creates an account for a new email address.
pub fn signup<R>(repo: &R, form: SignupForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = SignupPayload::try_from(form)?;

    if repo.get_credentials_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    let new_user = NewUser {
        email: payload.email,
        password_hash,
        name: payload.name,
        avatar_url: payload.avatar_url,
        location: payload.location,
        bio: payload.bio,
    };

    repo.create_user(&new_user).map_err(|err| match ServiceError::from(err) {
        ServiceError::Conflict(_) => ServiceError::Conflict(EMAIL_TAKEN.to_string()),
        other => other,
    })
}

/// OAuth2 password-flow login.
pub fn login<R>(repo: &R, config: &ServerConfig, form: LoginForm) -> ServiceResult<TokenResponse>
where
    R: UserReader + ?Sized,
{
    let payload = LoginPayload::try_from(form).map_err(|_| ServiceError::InvalidCredentials)?;
    issue_token(repo, config, payload)
}

/// JSON login.
pub fn login_json<R>(
    repo: &R,
    config: &ServerConfig,
    form: JsonLoginForm,
) -> ServiceResult<TokenResponse>
where
    R: UserReader + ?Sized,
{
    let payload = LoginPayload::try_from(form).map_err(|_| ServiceError::InvalidCredentials)?;
    issue_token(repo, config, payload)
}

fn issue_token<R>(
    repo: &R,
    config: &ServerConfig,
    payload: LoginPayload,
) -> ServiceResult<TokenResponse>
where
    R: UserReader + ?Sized,
{
    let credentials = repo
        .get_credentials_by_email(&payload.email)?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(&payload.password, &credentials.password_hash) {
        log::info!("Rejected login for {}", payload.email);
        return Err(ServiceError::InvalidCredentials);
    }

    let claims = AuthenticatedUser::for_user(&credentials.user, config.access_token_expire_minutes);
    let token = claims.to_jwt(&config.secret).map_err(|err| {
        log::error!("Failed to sign access token: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    Ok(TokenResponse::bearer(token))
}

/// Profile of the token owner.
pub fn me<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    load_current_user(repo, user)
}
