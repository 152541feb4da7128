use actix_web::{Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::explore::{self as service, ActivitiesQuery, CitiesQuery, SearchQuery};

#[get("/explore/cities")]
pub async fn list_cities(
    params: web::Query<CitiesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::list_cities(repo.get_ref(), params.into_inner()))
}

#[get("/explore/activities")]
pub async fn list_activities(
    params: web::Query<ActivitiesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::list_activities(repo.get_ref(), params.into_inner()))
}

#[get("/explore/search")]
pub async fn search(
    params: web::Query<SearchQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(service::search(repo.get_ref(), params.into_inner()))
}
