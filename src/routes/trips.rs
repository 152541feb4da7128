use actix_web::{Responder, delete, get, post, put, web};

use crate::forms::expense::AddExpenseForm;
use crate::forms::trip::{CreateTripForm, UpdateTripForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::trips::{self as service, TripsQuery};

#[get("/trips")]
pub async fn list_trips(
    params: web::Query<TripsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::list_trips(repo.get_ref(), &user, params.into_inner()))
}

#[get("/trips/counts")]
pub async fn trip_counts(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::trip_counts(repo.get_ref(), &user))
}

#[post("/trips")]
pub async fn create_trip(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateTripForm>,
) -> impl Responder {
    respond(service::create_trip(repo.get_ref(), &user, form.into_inner()))
}

#[get("/trips/{trip_id}")]
pub async fn show_trip(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::get_trip(repo.get_ref(), &user, trip_id.into_inner()))
}

#[put("/trips/{trip_id}")]
pub async fn update_trip(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateTripForm>,
) -> impl Responder {
    respond(service::update_trip(
        repo.get_ref(),
        &user,
        trip_id.into_inner(),
        form.into_inner(),
    ))
}

#[delete("/trips/{trip_id}")]
pub async fn delete_trip(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::delete_trip(repo.get_ref(), &user, trip_id.into_inner()))
}

#[post("/trips/{trip_id}/share")]
pub async fn share_trip(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::share_trip(repo.get_ref(), &user, trip_id.into_inner()))
}

#[get("/trips/{trip_id}/budget")]
pub async fn trip_budget(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::trip_budget(repo.get_ref(), &user, trip_id.into_inner()))
}

#[post("/trips/{trip_id}/expenses")]
pub async fn add_expense(
    trip_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddExpenseForm>,
) -> impl Responder {
    respond(service::add_expense(
        repo.get_ref(),
        &user,
        trip_id.into_inner(),
        form.into_inner(),
    ))
}

#[delete("/trips/expenses/{expense_id}")]
pub async fn remove_expense(
    expense_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::remove_expense(
        repo.get_ref(),
        &user,
        expense_id.into_inner(),
    ))
}
