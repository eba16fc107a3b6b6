use crate::error::ServiceError;
use crate::external_services::notify::SupervisorNotifier;
use portal_database::database::{institutions, researches};

/**
 * Activate an institution: mark it payment-current and active in one step.
 *
 * # Arguments
 * @param id: i32 - The institution id
 *
 * # Returns
 * @return Result<(), ServiceError> - NotFound when no institution matched
 */
pub async fn activate_institution(id: i32) -> Result<(), ServiceError> {
    match institutions::activate_institution(id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound(format!(
            "Institution {} not found",
            id
        ))),
        Err(e) => {
            log::error!("Failed to activate institution {}: {}", id, e);
            Err(ServiceError::Database(e.to_string()))
        }
    }
}

/**
 * Notify the supervisor that a research awaits their review.
 *
 * # Arguments
 * @param hashed_id: &str - The opaque identifier of the research
 *
 * # Returns
 * @return Result<(), ServiceError> - NotFound when the identifier is unknown
 */
pub async fn notify_supervisor(hashed_id: &str) -> Result<(), ServiceError> {
    let research = researches::get_research_by_hashed_id(hashed_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load research {}: {}", hashed_id, e);
            ServiceError::Database(e.to_string())
        })?
        .ok_or_else(|| ServiceError::NotFound("Research not found".to_string()))?;

    SupervisorNotifier::new()
        .notify_review_requested(&research)
        .await
        .map_err(|e| {
            log::error!("Supervisor notification failed for {}: {}", hashed_id, e);
            ServiceError::Notification(e.to_string())
        })
}
