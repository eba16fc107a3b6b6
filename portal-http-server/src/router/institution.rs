use actix_web::{get, put, web, HttpResponse, Responder};
use portal_database::database::filters::ListQuery;
use portal_database::database::institutions;
use portal_lib::core::review;
use serde_json::json;

use super::error_response;

#[derive(serde::Deserialize)]
pub struct ActivateInstitutionInfo {
    pub id: i32,
}

/**
 * Get institutions
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/institution")]
pub async fn list(query: web::Query<ListQuery>) -> impl Responder {
    match institutions::get_institutions(&query).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to retrieve institutions: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve institutions", "error": "internal error" }))
        }
    }
}

/**
 * Activate an institution: payment-current and active together
 *
 * # Arguments
 * @param info: web::Json<ActivateInstitutionInfo> - The institution id
 *
 * # Returns
 * @return HttpResponse - 200/404/500 per the outcome
 */
#[put("/institution/activate")]
pub async fn activate(info: web::Json<ActivateInstitutionInfo>) -> impl Responder {
    match review::activate_institution(info.id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Institution activated" })),
        Err(e) => error_response(e, "Failed to activate institution"),
    }
}
