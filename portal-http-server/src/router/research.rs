use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use portal_database::database::filters::ListQuery;
use portal_database::database::researches;
use portal_lib::core::review;
use portal_lib::core::submission::{self, NewResearch, ResearchEdit, UploadedDocument};
use serde_json::json;

use super::error_response;

/// Submission form. Fields are optional at the extractor level so the
/// service can report which required field is missing instead of actix
/// rejecting the whole form.
#[derive(Debug, MultipartForm)]
pub struct AddResearchForm {
    pub title: Option<Text<String>>,
    pub researcher: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub status: Option<Text<String>>,
    pub institution: Option<Text<String>>,
    pub school: Option<Text<String>>,
    pub year: Option<Text<String>>,
    #[multipart(rename = "abstract")]
    pub abstract_text: Option<Text<String>>,
    pub user_id: Option<Text<String>>,
    pub document: Option<Bytes>,
}

/// Edit form: the submission fields plus the target reference.
#[derive(Debug, MultipartForm)]
pub struct EditResearchForm {
    pub title: Option<Text<String>>,
    pub researcher: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub status: Option<Text<String>>,
    pub institution: Option<Text<String>>,
    pub school: Option<Text<String>>,
    pub year: Option<Text<String>>,
    #[multipart(rename = "abstract")]
    pub abstract_text: Option<Text<String>>,
    pub user_id: Option<Text<String>>,
    pub research_id: Option<Text<String>>,
    pub current_file: Option<Text<String>>,
    pub document: Option<Bytes>,
}

#[derive(serde::Deserialize)]
pub struct ResearchIdInfo {
    pub id: String,
}

#[derive(serde::Deserialize)]
pub struct AnalyticsInfo {
    pub session_id: Option<String>,
}

fn text(field: Option<Text<String>>) -> String {
    field.map(|t| t.0).unwrap_or_default()
}

fn document(field: Option<Bytes>) -> Option<UploadedDocument> {
    field.map(|bytes| UploadedDocument {
        content_type: bytes
            .content_type
            .as_ref()
            .map(|mime| mime.to_string())
            .unwrap_or_default(),
        data: bytes.data.to_vec(),
    })
}

/**
 * Get researches joined with institution and school names
 *
 * # Returns
 * @return HttpResponse - The result of the operation
 */
#[get("/research")]
pub async fn list(query: web::Query<ListQuery>) -> impl Responder {
    match submission::list(&query).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e, "Failed to retrieve researches"),
    }
}

/**
 * Submit a new research with its document
 *
 * # Arguments
 * @param form: MultipartForm<AddResearchForm> - The submission form
 *
 * # Returns
 * @return HttpResponse - 201 with the inserted row, or the error body
 */
#[post("/add/research")]
pub async fn create(MultipartForm(form): MultipartForm<AddResearchForm>) -> impl Responder {
    let research = NewResearch {
        title: text(form.title),
        researcher: text(form.researcher),
        category: text(form.category),
        progress_status: text(form.status),
        institution: text(form.institution),
        school: text(form.school),
        year: text(form.year),
        abstract_text: text(form.abstract_text),
        user_id: text(form.user_id),
    };

    match submission::create(research, document(form.document)).await {
        Ok(model) => HttpResponse::Created().json(json!({
            "message": "Research added successfully",
            "research": model,
        })),
        Err(e) => error_response(e, "Research addition failed"),
    }
}

/**
 * Propose an edit to an existing research
 *
 * # Arguments
 * @param form: MultipartForm<EditResearchForm> - The edit form
 *
 * # Returns
 * @return HttpResponse - 201 with the change row, or the error body
 */
#[post("/add/research/edit")]
pub async fn edit(MultipartForm(form): MultipartForm<EditResearchForm>) -> impl Responder {
    let change = ResearchEdit {
        title: text(form.title),
        researcher: text(form.researcher),
        category: text(form.category),
        progress_status: text(form.status),
        institution: text(form.institution),
        school: text(form.school),
        year: text(form.year),
        abstract_text: text(form.abstract_text),
        changed_by: text(form.user_id),
        research_id: text(form.research_id),
        current_file: text(form.current_file),
    };

    match submission::edit(change, document(form.document)).await {
        Ok(model) => HttpResponse::Created().json(json!({
            "message": "Changes saved for review!",
            "research": model,
        })),
        Err(e) => error_response(e, "Research edit failed"),
    }
}

/**
 * Get a single research by its hashed identifier
 *
 * # Arguments
 * @param info: web::Json<ResearchIdInfo> - The hashed identifier
 *
 * # Returns
 * @return HttpResponse - The joined row, or 404
 */
#[post("/research/view")]
pub async fn view(info: web::Json<ResearchIdInfo>) -> impl Responder {
    match researches::get_research_by_hashed_id(&info.id).await {
        Ok(Some(row)) => HttpResponse::Ok().json(row),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Research not found." })),
        Err(e) => {
            log::error!("Failed to retrieve research: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to retrieve research", "error": "internal error" }))
        }
    }
}

/**
 * Get dashboard counters for the researches table
 *
 * # Arguments
 * @param info: web::Json<AnalyticsInfo> - An optional session to scope the counts to
 *
 * # Returns
 * @return HttpResponse - The per-status totals with their thirty-day deltas
 */
#[post("/analytics/researches")]
pub async fn analytics(info: web::Json<AnalyticsInfo>) -> impl Responder {
    match researches::research_analytics(info.session_id.as_deref()).await {
        Ok(counts) => HttpResponse::Ok().json(counts),
        Err(e) => {
            log::error!("Failed to compute research analytics: {}", e);
            HttpResponse::InternalServerError().json(
                json!({ "message": "Failed to compute research analytics", "error": "internal error" }),
            )
        }
    }
}

/**
 * Notify the supervisor that a research awaits review
 *
 * # Arguments
 * @param info: web::Json<ResearchIdInfo> - The hashed identifier
 *
 * # Returns
 * @return HttpResponse - 200 on success, 404 for an unknown identifier
 */
#[put("/research/notify")]
pub async fn notify(info: web::Json<ResearchIdInfo>) -> impl Responder {
    match review::notify_supervisor(&info.id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Supervisor notified" })),
        Err(e) => error_response(e, "Failed to notify supervisor"),
    }
}
