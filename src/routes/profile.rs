use actix_web::{Responder, get, put, web};

use crate::forms::profile::UpdateProfileForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::profile as service;

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::get_profile(repo.get_ref(), &user))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProfileForm>,
) -> impl Responder {
    respond(service::update_profile(
        repo.get_ref(),
        &user,
        form.into_inner(),
    ))
}
