use actix_web::http::StatusCode;
use actix_web::{Responder, get, post, web};

use crate::forms::auth::{JsonLoginForm, LoginForm, SignupForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{detail, respond};
use crate::services::auth as service;

#[post("/auth/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    form: web::Json<SignupForm>,
) -> impl Responder {
    respond(service::signup(repo.get_ref(), form.into_inner()))
}

/// OAuth2 password flow: `application/x-www-form-urlencoded` body with
/// `username` and `password`.
#[post("/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    body: web::Bytes,
) -> impl Responder {
    let form: LoginForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Malformed login form: {err}");
            return detail(StatusCode::BAD_REQUEST, err.to_string());
        }
    };
    respond(service::login(repo.get_ref(), config.get_ref(), form))
}

#[post("/auth/login/json")]
pub async fn login_json(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    form: web::Json<JsonLoginForm>,
) -> impl Responder {
    respond(service::login_json(
        repo.get_ref(),
        config.get_ref(),
        form.into_inner(),
    ))
}

#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    respond(service::me(repo.get_ref(), &user))
}
