use actix_web::{Responder, get, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::admin::{self as service, UsersQuery};

#[get("/admin/stats")]
pub async fn platform_stats(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::platform_stats(repo.get_ref(), &user))
}

#[get("/admin/users")]
pub async fn list_users(
    params: web::Query<UsersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::list_users(repo.get_ref(), &user, params.into_inner()))
}
