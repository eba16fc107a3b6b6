use actix_web::{get, web, HttpResponse, Responder};
use portal_database::database::comments;
use portal_database::database::filters::ListQuery;
use serde_json::json;

/**
 * Get comments
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/comments")]
pub async fn list(query: web::Query<ListQuery>) -> impl Responder {
    match comments::get_comments(&query).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to retrieve comments: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve comments", "error": "internal error" }))
        }
    }
}
