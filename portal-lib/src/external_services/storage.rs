use crate::config;
use chrono::Utc;

/// DocumentStorage is a client for the object-storage HTTP API holding the
/// uploaded research documents.
pub struct DocumentStorage {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

/// StorageError is an error type for DocumentStorage.
#[derive(Debug)]
pub enum StorageError {
    Err(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StorageError::Err(e) => write!(f, "Error: {}", e),
        }
    }
}

#[allow(clippy::new_without_default)]
impl DocumentStorage {
    /// Setup a new DocumentStorage client from the environment.
    pub fn new() -> Self {
        use reqwest::header;
        let mut headers = header::HeaderMap::new();
        let api_key = config::get_storage_api_key();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .expect("Storage API key is not a valid header value"),
        );
        let client = reqwest::Client::builder()
            .user_agent("portal-core/0.3.4")
            .default_headers(headers)
            .danger_accept_invalid_certs(!config::is_production())
            .build()
            .expect("Failed to build client");

        DocumentStorage {
            client,
            base_url: config::get_storage_url(),
            bucket: config::get_storage_bucket(),
        }
    }

    /// Upload a document and return its public URL. Every call stores a new
    /// object; the key carries a millisecond timestamp so re-uploads of the
    /// same title never collide.
    pub async fn upload_document(
        &self,
        data: Vec<u8>,
        content_type: &str,
        name_hint: &str,
    ) -> Result<String, StorageError> {
        let key = object_key(name_hint);
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, key);
        let res = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Err(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            log::error!("Document upload rejected ({}): {}", status, body);
            return Err(StorageError::Err(format!(
                "Document upload failed with status {}",
                status
            )));
        }

        Ok(self.public_url(&key))
    }

    /// Delete a document by its key or public URL. Used as the compensating
    /// step when a write fails after its document was already uploaded.
    pub async fn delete_document(&self, url_or_key: &str) -> Result<(), StorageError> {
        let key = self.key_of(url_or_key);
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, key);
        let res = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| StorageError::Err(e.to_string()))?;

        if !res.status().is_success() {
            return Err(StorageError::Err(format!(
                "Document delete failed with status {}",
                res.status()
            )));
        }
        Ok(())
    }

    /// Public, stable URL of an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, key)
    }

    fn key_of<'a>(&self, url_or_key: &'a str) -> &'a str {
        let public_prefix = format!("{}/object/public/{}/", self.base_url, self.bucket);
        url_or_key
            .strip_prefix(public_prefix.as_str())
            .unwrap_or(url_or_key)
    }
}

/// Build an object key from the submission title: lowercased, non-alphanumeric
/// runs collapsed to single dashes, timestamp suffix for uniqueness.
fn object_key(name_hint: &str) -> String {
    let mut stem = String::with_capacity(name_hint.len());
    let mut last_dash = true;
    for c in name_hint.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            stem.push('-');
            last_dash = true;
        }
    }
    let stem = stem.trim_end_matches('-');
    let stem = if stem.is_empty() { "document" } else { stem };
    format!("{}-{}", stem, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_sanitizes_the_title() {
        let key = object_key("AI Applications: A Survey!");
        let stem = key.rsplit_once('-').map(|(s, _)| s).unwrap_or(&key);
        assert_eq!(stem, "ai-applications-a-survey");
    }

    #[test]
    fn object_key_never_produces_an_empty_stem() {
        let key = object_key("!!!");
        assert!(key.starts_with("document-"));
    }

    #[test]
    fn object_keys_for_the_same_title_do_not_collide_across_time() {
        // Keys embed a millisecond timestamp; equality would require two
        // calls in the same millisecond, tolerated here with a retry.
        let a = object_key("Test Study");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = object_key("Test Study");
        assert_ne!(a, b);
    }
}
