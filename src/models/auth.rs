//! Bearer token authentication.
//!
//! Access tokens are HS256 JWTs signed with [`ServerConfig::secret`]. The
//! [`AuthenticatedUser`] extractor decodes the `Authorization: Bearer` header
//! of every protected request.

use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::models::config::ServerConfig;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidToken,
    #[error("Server configuration is missing")]
    MissingConfig,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::MissingConfig => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "detail": self.to_string() }))
    }
}

/// Claims carried by an access token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// User id as a decimal string.
    pub sub: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Claims for `user` expiring `ttl_minutes` from now.
    pub fn for_user(user: &User, ttl_minutes: i64) -> Self {
        let exp = (Utc::now() + Duration::minutes(ttl_minutes)).timestamp().max(0) as usize;
        let roles = if user.is_admin {
            vec![ADMIN_ROLE.to_string()]
        } else {
            Vec::new()
        };
        Self {
            sub: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.display_name().to_string(),
            roles,
            exp,
        }
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Decodes and validates a token, including its expiry.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse::<i32>().ok().and_then(|id| UserId::new(id).ok())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(actix_web::http::header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
        .filter(|t| !t.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("ServerConfig is not registered as app data");
            return ready(Err(AuthError::MissingConfig));
        };
        let result = bearer_token(req)
            .ok_or(AuthError::InvalidToken)
            .and_then(|token| {
                AuthenticatedUser::from_jwt(token, &config.secret).map_err(|err| {
                    log::debug!("Rejected access token: {err}");
                    AuthError::InvalidToken
                })
            });
        ready(result)
    }
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Malformed hashes verify as `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserEmail;

    fn user(is_admin: bool) -> User {
        User {
            id: UserId::new(7).unwrap(),
            email: UserEmail::new("sarah@example.com").unwrap(),
            name: None,
            avatar_url: None,
            location: None,
            bio: None,
            is_admin,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn token_round_trip() {
        let claims = AuthenticatedUser::for_user(&user(true), 30);
        let token = claims.to_jwt("secret").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "secret").unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.user_id(), UserId::new(7).ok());
        assert!(decoded.has_role(ADMIN_ROLE));
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = AuthenticatedUser::for_user(&user(false), -10);
        let token = claims.to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "secret").is_err());
        assert!(!claims.has_role(ADMIN_ROLE));
    }

    #[test]
    fn passwords_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("hunter22", "not-a-hash"));
    }
}
