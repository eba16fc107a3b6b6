use actix_web::{get, web, HttpResponse, Responder};
use portal_database::database::filters::ListQuery;
use portal_database::database::requests;
use serde_json::json;

/// The dashboard scopes the request list to the signed-in supervisor by
/// passing its session identifier alongside the list parameters.
#[derive(serde::Deserialize)]
pub struct RequestListQuery {
    pub filter: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub session_id: Option<String>,
}

/**
 * Get approval requests
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/requests")]
pub async fn list(query: web::Query<RequestListQuery>) -> impl Responder {
    let list_query = ListQuery {
        filter: query.filter.clone(),
        search: query.search.clone(),
        sort: query.sort.clone(),
    };
    match requests::get_requests(&list_query, query.session_id.as_deref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to retrieve requests: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve requests", "error": "internal error" }))
        }
    }
}
