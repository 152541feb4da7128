//! Thin actix handlers. Each one extracts its inputs, calls a service and
//! turns the outcome into JSON.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get};
use serde::Serialize;
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod admin;
pub mod auth;
pub mod calendar;
pub mod community;
pub mod dashboard;
pub mod explore;
pub mod itinerary;
pub mod profile;
pub mod trips;

/// JSON body `{"detail": ...}` with the given status.
pub fn detail(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message.into() }))
}

pub fn error_response(err: ServiceError) -> HttpResponse {
    let status = match &err {
        ServiceError::Unauthorized | ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::InvalidCredentials | ServiceError::Conflict(_) | ServiceError::Form(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            return detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };
    detail(status, err.to_string())
}

/// `200 OK` with the value, or the mapped error.
pub fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err),
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = detail(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = detail(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

/// Unparsable ids cannot name an existing entity.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = detail(StatusCode::NOT_FOUND, "Not Found");
    InternalError::from_response(err, response).into()
}

#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to GlobeTrotter API" }))
}

pub async fn not_found() -> HttpResponse {
    detail(StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Unauthorized, StatusCode::FORBIDDEN),
            (ServiceError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("Trip not found".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("taken".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Internal("db".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err).status(), status);
        }

        let body = body_of(error_response(ServiceError::NotFound("Trip not found".into()))).await;
        assert_eq!(body["detail"], "Trip not found");

        let body = body_of(error_response(ServiceError::Internal("secret detail".into()))).await;
        assert_eq!(body["detail"], "Internal Server Error");
    }
}
