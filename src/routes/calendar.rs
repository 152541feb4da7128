use actix_web::{Responder, get, web};
use chrono::Utc;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::calendar::{self as service, CalendarQuery};

#[get("/calendar")]
pub async fn show_calendar(
    params: web::Query<CalendarQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let today = Utc::now().date_naive();
    respond(service::month_view(
        repo.get_ref(),
        &user,
        params.into_inner(),
        today,
    ))
}
