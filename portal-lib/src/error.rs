use std::fmt::Display;

/// Service-level failure classes. Handlers map these onto HTTP statuses;
/// only the validation and not-found messages are meant for clients, the
/// rest are logged server-side and replaced with a generic body.
#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    NotFound(String),
    Storage(String),
    Database(String),
    Notification(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(e) => write!(f, "ValidationError: {}", e),
            ServiceError::NotFound(e) => write!(f, "NotFound: {}", e),
            ServiceError::Storage(e) => write!(f, "StorageError: {}", e),
            ServiceError::Database(e) => write!(f, "DatabaseError: {}", e),
            ServiceError::Notification(e) => write!(f, "NotificationError: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_class_and_message() {
        let err = ServiceError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "ValidationError: title is required");
    }
}
