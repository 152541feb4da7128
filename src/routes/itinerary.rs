use actix_web::{Responder, delete, get, post, web};

use crate::forms::itinerary::{AddStopForm, ScheduleActivityForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::itinerary as service;

#[get("/itinerary/{trip_id}")]
pub async fn show_itinerary(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::get_itinerary(
        repo.get_ref(),
        &user,
        trip_id.into_inner(),
    ))
}

#[post("/itinerary/stops/{trip_id}")]
pub async fn add_stop(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddStopForm>,
) -> impl Responder {
    respond(service::add_stop(
        repo.get_ref(),
        &user,
        trip_id.into_inner(),
        form.into_inner(),
    ))
}

#[delete("/itinerary/stops/{stop_id}")]
pub async fn remove_stop(
    stop_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::remove_stop(repo.get_ref(), &user, stop_id.into_inner()))
}

#[post("/itinerary/activities/{stop_id}")]
pub async fn schedule_activity(
    stop_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ScheduleActivityForm>,
) -> impl Responder {
    respond(service::schedule_activity(
        repo.get_ref(),
        &user,
        stop_id.into_inner(),
        form.into_inner(),
    ))
}

#[delete("/itinerary/activities/{id}")]
pub async fn remove_scheduled_activity(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::remove_scheduled_activity(
        repo.get_ref(),
        &user,
        id.into_inner(),
    ))
}
