use actix_web::{get, HttpResponse, Responder};
use portal_database::database::schools;
use serde_json::json;

/**
 * Get all schools, for the submission form dropdowns
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/schools")]
pub async fn list() -> impl Responder {
    match schools::get_schools().await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to retrieve schools: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve schools", "error": "internal error" }))
        }
    }
}
