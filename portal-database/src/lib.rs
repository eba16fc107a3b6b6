pub mod config;
pub mod database;
pub mod ident;
pub mod models;
pub mod types;

use crate::config::{get_env_or_throw, get_env_var_or_default};
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Mutex;
use std::time::Duration;

/**
 * The global database connection
 */
static DB_CONN: Lazy<Mutex<Option<DatabaseConnection>>> = Lazy::new(|| Mutex::new(None));

/**
 * Load environment variables from a .env file if present (used by tests; the
 * application binary calls dotenv in its own main function)
 *
 * # Returns
 * @return () - The result of the operation
 */
pub fn init() {
    dotenv::dotenv().ok();
}

/**
 * Establish the pooled connection to the database. The handle stored here
 * wraps a connection pool, so every caller that clones it leases connections
 * per statement rather than sharing a single socket.
 *
 * # Returns
 * @return Result<(), sea_orm::DbErr> - The result of the operation
 */
pub async fn setup() -> Result<(), DbErr> {
    let database_url = get_env_or_throw("DATABASE_URL");
    let max_connections = get_env_var_or_default("DB_MAX_CONNECTIONS", "10")
        .parse::<u32>()
        .unwrap_or(10);
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300));
    let db_conn = Database::connect(options).await?;
    let mut db_conn_global = DB_CONN.lock().unwrap();
    *db_conn_global = Some(db_conn);
    Ok(())
}

/**
 * Get a clone of the established database connection pool
 *
 * # Returns
 * @return Result<DatabaseConnection, sea_orm::DbErr> - The connection or an error
 */
pub async fn get_database_connection() -> Result<DatabaseConnection, DbErr> {
    let db_conn = DB_CONN.lock().unwrap();
    if let Some(ref conn) = *db_conn {
        Ok(conn.clone())
    } else {
        Err(DbErr::Custom(
            "Database connection is not established".into(),
        ))
    }
}

/**
* Sets up the initial test environment (database connection and env variables)
*/
pub async fn setup_test_environment() {
    init();
    setup().await.expect("Failed to setup database connection.");
}

#[cfg(all(test, feature = "online-tests"))]
mod tests {

    use super::*;
    use crate::database::filters::ListQuery;
    use crate::database::{institutions, research_changes, researches};
    use serial_test::serial;
    use tokio;

    /**
     * Test the setup function against the configured database
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_establish_connection_with_env_url() {
        init();
        let connection_result = setup().await;
        assert!(connection_result.is_ok());
    }

    /**
     * Test that create_research assigns a hashed id derived from the row id
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_create_research_assigns_hashed_id() {
        setup_test_environment().await;

        let record = researches::NewResearchRecord {
            title: "Test Study".to_string(),
            researcher: "A. Person".to_string(),
            category: "Health Research".to_string(),
            progress_status: "ongoing".to_string(),
            document: "https://storage.example/object/public/documents/test.pdf".to_string(),
            document_type: "application/pdf".to_string(),
            year: "2024".to_string(),
            school: "1".to_string(),
            institution: "1".to_string(),
            abstract_text: "Abstract text".to_string(),
            user_id: "test-user".to_string(),
        };

        let created = researches::create_research(record)
            .await
            .expect("Failed to create research");
        assert_eq!(created.status, "Pending");
        assert_eq!(created.progress_status, "ongoing");
        assert_eq!(
            created.hashed_id,
            Some(ident::hash_id(created.id)),
            "hashed_id must be the digest of the row id"
        );
        assert!(!created.approval_requested);
    }

    /**
     * Test that creating a research change flags the target research
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_create_change_flags_target() {
        setup_test_environment().await;

        let record = researches::NewResearchRecord {
            title: "Change Target".to_string(),
            researcher: "A. Person".to_string(),
            category: "Health Research".to_string(),
            progress_status: "ongoing".to_string(),
            document: "https://storage.example/object/public/documents/target.pdf".to_string(),
            document_type: "application/pdf".to_string(),
            year: "2024".to_string(),
            school: "1".to_string(),
            institution: "1".to_string(),
            abstract_text: "Abstract text".to_string(),
            user_id: "test-user".to_string(),
        };
        let target = researches::create_research(record)
            .await
            .expect("Failed to create research");

        let change = research_changes::NewChangeRecord {
            title: "Change Target (revised)".to_string(),
            researcher: "A. Person".to_string(),
            category: "Health Research".to_string(),
            progress_status: "ongoing".to_string(),
            document: target.document.clone(),
            // No replacement document: the recorded type must come from the target
            document_type: None,
            year: "2024".to_string(),
            school: "1".to_string(),
            institution: "1".to_string(),
            abstract_text: "Abstract text".to_string(),
            research_id: target.id.to_string(),
            changed_by: "test-user".to_string(),
        };
        let created = research_changes::create_change(change)
            .await
            .expect("Failed to create research change");
        assert_eq!(created.status, "Pending");
        assert_eq!(created.research_id, target.id.to_string());
        assert_eq!(created.document_type, target.document_type);

        let rows = researches::list_researches(&ListQuery::default())
            .await
            .expect("Failed to list researches");
        let flagged = rows
            .iter()
            .find(|r| r.id == target.id)
            .expect("Target research missing from listing");
        assert!(flagged.approval_requested);
        // The proposed title must not leak into the original row
        assert_eq!(flagged.title, "Change Target");
    }

    /**
     * Test that listing twice with the same parameters is stable
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_list_researches_is_idempotent() {
        setup_test_environment().await;

        let query = ListQuery {
            filter: Some("Pending".to_string()),
            search: Some("test".to_string()),
            sort: Some("new".to_string()),
        };
        let first = researches::list_researches(&query)
            .await
            .expect("Failed to list researches");
        let second = researches::list_researches(&query)
            .await
            .expect("Failed to list researches");
        let first_ids: Vec<i32> = first.iter().map(|r| r.id).collect();
        let second_ids: Vec<i32> = second.iter().map(|r| r.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    /**
     * Test the institution activation scenario: both columns change together
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_activate_institution() {
        setup_test_environment().await;

        let rows = institutions::get_institutions(&ListQuery::default())
            .await
            .expect("Failed to list institutions");
        let Some(institution) = rows.first() else {
            return;
        };

        let found = institutions::activate_institution(institution.id)
            .await
            .expect("Failed to activate institution");
        assert!(found);

        let refreshed = institutions::get_institutions(&ListQuery::default())
            .await
            .expect("Failed to list institutions");
        let activated = refreshed
            .iter()
            .find(|i| i.id == institution.id)
            .expect("Institution missing after activation");
        assert_eq!(activated.status, "Active");
        assert_eq!(activated.payment_status, "Maintained");
    }

    /**
     * Test that activating an unknown institution reports not-found
     *
     * # Returns
     * @return () - The result of the test
     */
    #[tokio::test]
    #[serial]
    async fn test_activate_unknown_institution() {
        setup_test_environment().await;

        let found = institutions::activate_institution(i32::MAX)
            .await
            .expect("Activation query failed");
        assert!(!found);
    }
}
