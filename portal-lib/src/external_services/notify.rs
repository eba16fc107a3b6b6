use crate::config;
use portal_database::database::researches::ResearchRow;
use serde_json::json;

/// SupervisorNotifier delivers review notifications to the configured
/// webhook endpoint. The actual delivery channel (mail, chat, queue) lives
/// behind that endpoint.
pub struct SupervisorNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

#[derive(Debug)]
pub enum NotifyError {
    Err(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NotifyError::Err(e) => write!(f, "Error: {}", e),
        }
    }
}

impl SupervisorNotifier {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("portal-core/0.3.4")
            .build()
            .expect("Failed to build client");
        SupervisorNotifier {
            client,
            webhook_url: config::get_notify_webhook_url(),
        }
    }

    /// Notify the supervisor webhook about a research awaiting review.
    /// Without a configured webhook the notification is logged and dropped.
    pub async fn notify_review_requested(&self, research: &ResearchRow) -> Result<(), NotifyError> {
        let Some(webhook_url) = self.webhook_url.as_deref() else {
            log::warn!(
                "NOTIFY_WEBHOOK_URL not set, dropping notification for research {}",
                research.id
            );
            return Ok(());
        };

        let payload = review_payload(research);
        let res = self
            .client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Err(e.to_string()))?;

        if !res.status().is_success() {
            return Err(NotifyError::Err(format!(
                "Notification endpoint returned status {}",
                res.status()
            )));
        }
        Ok(())
    }
}

impl Default for SupervisorNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// The webhook body: enough for the receiving channel to render a review
/// request without a follow-up lookup.
fn review_payload(research: &ResearchRow) -> serde_json::Value {
    json!({
        "hashed_id": research.hashed_id,
        "title": research.title,
        "researcher": research.researcher,
        "status": research.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_review_payload_fields() {
        let research = ResearchRow {
            id: 7,
            title: "Coastal Erosion Survey".to_string(),
            researcher: "Jane Doe".to_string(),
            status: "Pending".to_string(),
            progress_status: "ongoing".to_string(),
            year: "2024".to_string(),
            abstract_text: "A study of shoreline change.".to_string(),
            document: "coastal-erosion-survey".to_string(),
            document_type: "application/pdf".to_string(),
            url: None,
            category: "Geography".to_string(),
            hashed_id: Some("abc123".to_string()),
            approval_requested: true,
            created_at: Utc::now(),
            institute: "Marine Institute".to_string(),
            school: "School of Science".to_string(),
        };

        let payload = review_payload(&research);
        assert_eq!(payload["hashed_id"], "abc123");
        assert_eq!(payload["title"], "Coastal Erosion Survey");
        assert_eq!(payload["researcher"], "Jane Doe");
        assert_eq!(payload["status"], "Pending");
        assert_eq!(payload.as_object().unwrap().len(), 4);
    }
}
