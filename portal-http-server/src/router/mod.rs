use actix_web::{get, HttpResponse, Responder};
use portal_lib::error::ServiceError;
use serde_json::json;

pub mod comment;
pub mod institution;
pub mod request;
pub mod research;
pub mod school;

/// Return server health status
#[get("/health")]
pub async fn health() -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().body("OK"))
}

/**
 * Map a service error onto the JSON error body contract.
 *
 * Validation and not-found messages are client-facing; upstream failure
 * detail stays in the server log and the response carries a generic error.
 *
 * # Arguments
 * @param error: ServiceError - The service failure
 * @param message: &str - The operation-level message for 500 responses
 *
 * # Returns
 * @return HttpResponse - The JSON error response
 */
pub(crate) fn error_response(error: ServiceError, message: &str) -> HttpResponse {
    match error {
        ServiceError::Validation(detail) => {
            HttpResponse::BadRequest().json(json!({ "message": detail }))
        }
        ServiceError::NotFound(detail) => {
            HttpResponse::NotFound().json(json!({ "message": detail }))
        }
        other => {
            log::error!("{}: {}", message, other);
            HttpResponse::InternalServerError()
                .json(json!({ "message": message, "error": "internal error" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn health_returns_ok() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn validation_errors_map_to_bad_request() {
        let res = error_response(
            ServiceError::Validation("title is required".to_string()),
            "Research addition failed",
        );
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn upstream_errors_do_not_leak_detail() {
        let res = error_response(
            ServiceError::Database("connection refused to 10.0.0.5:5432".to_string()),
            "Research addition failed",
        );
        assert_eq!(
            res.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal error");
        assert!(!json.to_string().contains("10.0.0.5"));
    }
}
