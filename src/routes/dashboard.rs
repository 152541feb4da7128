use actix_web::{Responder, get, web};
use chrono::Utc;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::dashboard as service;

#[get("/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let today = Utc::now().date_naive();
    respond(service::dashboard(repo.get_ref(), &user, today))
}
