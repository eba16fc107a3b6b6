use crate::error::ServiceError;
use crate::external_services::storage::DocumentStorage;
use portal_database::database::research_changes::{self, NewChangeRecord};
use portal_database::database::researches::{self, NewResearchRecord, ResearchRow};
use portal_database::models::research_changes::Model as ChangeModel;
use portal_database::models::researches::Model as ResearchModel;
use portal_database::types::ProgressStatus;

/// An uploaded document as received from the multipart form.
#[derive(Clone, Debug)]
pub struct UploadedDocument {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Field set for a new research submission. Every field is required; the
/// handler maps missing form fields to empty strings and validation rejects
/// them before any side effect runs.
#[derive(Clone, Debug, Default)]
pub struct NewResearch {
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub progress_status: String,
    pub institution: String,
    pub school: String,
    pub year: String,
    pub abstract_text: String,
    pub user_id: String,
}

/// Field set for a proposed edit to an existing research.
#[derive(Clone, Debug, Default)]
pub struct ResearchEdit {
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub progress_status: String,
    pub institution: String,
    pub school: String,
    pub year: String,
    pub abstract_text: String,
    pub changed_by: String,
    pub research_id: String,
    pub current_file: String,
}

fn required(value: &str, field: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

fn valid_progress_status(value: &str) -> Result<(), ServiceError> {
    value
        .parse::<ProgressStatus>()
        .map(|_| ())
        .map_err(ServiceError::Validation)
}

impl NewResearch {
    pub fn validate(&self) -> Result<(), ServiceError> {
        required(&self.title, "title")?;
        required(&self.researcher, "researcher")?;
        required(&self.category, "category")?;
        required(&self.progress_status, "status")?;
        required(&self.institution, "institution")?;
        required(&self.school, "school")?;
        required(&self.year, "year")?;
        required(&self.abstract_text, "abstract")?;
        required(&self.user_id, "user_id")?;
        valid_progress_status(&self.progress_status)
    }
}

impl ResearchEdit {
    pub fn validate(&self) -> Result<(), ServiceError> {
        required(&self.title, "title")?;
        required(&self.researcher, "researcher")?;
        required(&self.category, "category")?;
        required(&self.progress_status, "status")?;
        required(&self.institution, "institution")?;
        required(&self.school, "school")?;
        required(&self.year, "year")?;
        required(&self.abstract_text, "abstract")?;
        required(&self.changed_by, "user_id")?;
        required(&self.research_id, "research_id")?;
        required(&self.current_file, "current_file")?;
        valid_progress_status(&self.progress_status)
    }
}

/**
 * Submit a new research: validate, upload the document, insert the row.
 *
 * Validation runs before the upload and the upload before the insert, so a
 * rejected submission performs no writes at all. When the insert fails after
 * the document already landed in storage, the uploaded object is deleted on
 * a best-effort basis so failed submissions do not leak blobs.
 *
 * # Arguments
 * @param research: NewResearch - The submitted form fields
 * @param document: Option<UploadedDocument> - The uploaded document
 *
 * # Returns
 * @return Result<ResearchModel, ServiceError> - The inserted research row
 */
pub async fn create(
    research: NewResearch,
    document: Option<UploadedDocument>,
) -> Result<ResearchModel, ServiceError> {
    research.validate()?;
    let document = document
        .filter(|d| !d.data.is_empty())
        .ok_or_else(|| ServiceError::Validation("document is required".to_string()))?;

    let storage = DocumentStorage::new();
    let document_url = storage
        .upload_document(document.data, &document.content_type, &research.title)
        .await
        .map_err(|e| {
            log::error!("Document upload failed: {}", e);
            ServiceError::Storage(e.to_string())
        })?;

    let record = NewResearchRecord {
        title: research.title,
        researcher: research.researcher,
        category: research.category,
        progress_status: research.progress_status,
        document: document_url.clone(),
        document_type: document.content_type,
        year: research.year,
        school: research.school,
        institution: research.institution,
        abstract_text: research.abstract_text,
        user_id: research.user_id,
    };

    match researches::create_research(record).await {
        Ok(model) => Ok(model),
        Err(e) => {
            log::error!("Research insert failed: {}", e);
            if let Err(cleanup) = storage.delete_document(&document_url).await {
                log::warn!(
                    "Failed to remove uploaded document {} after insert failure: {}",
                    document_url,
                    cleanup
                );
            }
            Err(ServiceError::Database(e.to_string()))
        }
    }
}

/**
 * Propose an edit to an existing research.
 *
 * The edit is stored as a pending research change and the target row is
 * flagged as awaiting review; the research itself is not modified. A
 * replacement document is uploaded when attached, and the current document
 * is deliberately kept: while the change is only proposed, the original
 * must stay intact.
 *
 * # Arguments
 * @param edit: ResearchEdit - The submitted form fields
 * @param document: Option<UploadedDocument> - The replacement document, if any
 *
 * # Returns
 * @return Result<ChangeModel, ServiceError> - The inserted change row
 */
pub async fn edit(
    edit: ResearchEdit,
    document: Option<UploadedDocument>,
) -> Result<ChangeModel, ServiceError> {
    edit.validate()?;

    let document = document.filter(|d| !d.data.is_empty());
    let (document_url, document_type, uploaded) = match document {
        Some(doc) => {
            let storage = DocumentStorage::new();
            let url = storage
                .upload_document(doc.data, &doc.content_type, &edit.title)
                .await
                .map_err(|e| {
                    log::error!("Document upload failed: {}", e);
                    ServiceError::Storage(e.to_string())
                })?;
            (url, Some(doc.content_type), true)
        }
        //No replacement document: the change keeps the current file and
        //inherits the target's recorded document type on insert
        None => (edit.current_file.clone(), None, false),
    };

    let record = NewChangeRecord {
        title: edit.title,
        researcher: edit.researcher,
        category: edit.category,
        progress_status: edit.progress_status,
        document: document_url.clone(),
        document_type,
        year: edit.year,
        school: edit.school,
        institution: edit.institution,
        abstract_text: edit.abstract_text,
        research_id: edit.research_id,
        changed_by: edit.changed_by,
    };

    match research_changes::create_change(record).await {
        Ok(change) => Ok(change),
        Err(e) => {
            log::error!("Research change insert failed: {}", e);
            if uploaded {
                let storage = DocumentStorage::new();
                if let Err(cleanup) = storage.delete_document(&document_url).await {
                    log::warn!(
                        "Failed to remove uploaded document {} after insert failure: {}",
                        document_url,
                        cleanup
                    );
                }
            }
            Err(ServiceError::Database(e.to_string()))
        }
    }
}

/**
 * List researches joined with institution and school names.
 *
 * # Arguments
 * @param query: &ListQuery - The filter/search/sort parameters
 *
 * # Returns
 * @return Result<Vec<ResearchRow>, ServiceError> - The matching rows
 */
pub async fn list(
    query: &portal_database::database::filters::ListQuery,
) -> Result<Vec<ResearchRow>, ServiceError> {
    researches::list_researches(query).await.map_err(|e| {
        log::error!("Failed to list researches: {}", e);
        ServiceError::Database(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_submission() -> NewResearch {
        NewResearch {
            title: "Test Study".to_string(),
            researcher: "A. Person".to_string(),
            category: "Health Research".to_string(),
            progress_status: "ongoing".to_string(),
            institution: "1".to_string(),
            school: "2".to_string(),
            year: "2024".to_string(),
            abstract_text: "Abstract text".to_string(),
            user_id: "user-7".to_string(),
        }
    }

    #[test]
    fn complete_submission_validates() {
        assert!(complete_submission().validate().is_ok());
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let fields: [(&str, fn(&mut NewResearch)); 9] = [
            ("title", |r| r.title.clear()),
            ("researcher", |r| r.researcher.clear()),
            ("category", |r| r.category.clear()),
            ("status", |r| r.progress_status.clear()),
            ("institution", |r| r.institution.clear()),
            ("school", |r| r.school.clear()),
            ("year", |r| r.year.clear()),
            ("abstract", |r| r.abstract_text.clear()),
            ("user_id", |r| r.user_id.clear()),
        ];
        for (name, clear) in fields {
            let mut research = complete_submission();
            clear(&mut research);
            let err = research.validate().expect_err("validation must fail");
            assert!(
                err.to_string().contains(name),
                "error for missing {} was: {}",
                name,
                err
            );
        }
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let mut research = complete_submission();
        research.title = "   ".to_string();
        assert!(research.validate().is_err());
    }

    #[test]
    fn unknown_progress_status_is_rejected() {
        let mut research = complete_submission();
        research.progress_status = "paused".to_string();
        assert!(research.validate().is_err());
    }

    #[test]
    fn edit_requires_the_target_reference() {
        let submission = complete_submission();
        let mut edit = ResearchEdit {
            title: submission.title,
            researcher: submission.researcher,
            category: submission.category,
            progress_status: submission.progress_status,
            institution: submission.institution,
            school: submission.school,
            year: submission.year,
            abstract_text: submission.abstract_text,
            changed_by: submission.user_id,
            research_id: "12".to_string(),
            current_file: "https://storage.example/object/public/documents/a.pdf".to_string(),
        };
        assert!(edit.validate().is_ok());

        edit.research_id.clear();
        assert!(edit.validate().is_err());
    }

    /// A submission missing a field must fail before any storage or database
    /// call; reaching either without configuration would abort the test.
    #[tokio::test]
    async fn invalid_submission_performs_no_side_effects() {
        let result = create(NewResearch::default(), None).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_document_is_a_validation_error() {
        let result = create(complete_submission(), None).await;
        match result {
            Err(ServiceError::Validation(message)) => {
                assert!(message.contains("document"));
            }
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }
}
