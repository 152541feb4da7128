use actix_web::{Responder, get, post, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::community::{self as service, FeedQuery};

#[get("/community/trips")]
pub async fn feed(
    params: web::Query<FeedQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::feed(repo.get_ref(), params.into_inner()))
}

#[get("/community/shared/{token}")]
pub async fn shared_trip(
    token: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::shared_trip(repo.get_ref(), &token))
}

#[post("/community/copy/{trip_id}")]
pub async fn copy_trip(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::copy_trip(repo.get_ref(), &user, trip_id.into_inner()))
}
