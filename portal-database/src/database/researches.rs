use crate::database::filters::{self, ListQuery, ListSpec};
use crate::get_database_connection;
use crate::ident;
use crate::models::researches::{ActiveModel, Model as ResearchModel};
use crate::types::ApprovalStatus;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{entity::*, query::*, DbBackend, DbErr, TransactionTrait, Value};
use serde::Serialize;

/// Listing translation for the researches table. The document URL takes part
/// in search so reviewers can look rows up by file name.
const LIST_SPEC: ListSpec = ListSpec {
    status_columns: &["r.status"],
    search_columns: &["r.title", "r.researcher", "r.url", "r.category", "r.year"],
    keyword_sort: Some(("title", "r.title")),
    created_column: "r.created_at",
    id_column: "r.id",
};

/// The institution and school columns are text references to the related
/// numeric primary keys, so the join casts those keys to text.
const BASE_SELECT: &str = r#"
    SELECT
        r.id,
        r.title,
        r.researcher,
        r.status,
        r.progress_status,
        r.year,
        r.abstract,
        r.document,
        r.document_type,
        r.url,
        r.category,
        r.hashed_id,
        r.approval_requested,
        r.created_at,
        i.name AS institute,
        s.name AS school
    FROM researches r
    JOIN institutions i ON CAST(i.id AS TEXT) = r.institution
    JOIN schools s ON CAST(s.id AS TEXT) = r.school
"#;

/// A research row joined with its institution and school names, as served by
/// the listing and single-row endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct ResearchRow {
    pub id: i32,
    pub title: String,
    pub researcher: String,
    pub status: String,
    pub progress_status: String,
    pub year: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub document: String,
    pub document_type: String,
    pub url: Option<String>,
    pub category: String,
    pub hashed_id: Option<String>,
    pub approval_requested: bool,
    pub created_at: DateTime<Utc>,
    pub institute: String,
    pub school: String,
}

/// The validated field set inserted for a new research. Approval status,
/// hashed id and the bookkeeping columns are assigned here, not by callers.
#[derive(Clone, Debug)]
pub struct NewResearchRecord {
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub progress_status: String,
    pub document: String,
    pub document_type: String,
    pub year: String,
    pub school: String,
    pub institution: String,
    pub abstract_text: String,
    pub user_id: String,
}

/**
 * Get researches joined with institution and school names
 *
 * # Arguments
 * @param query: &ListQuery - The filter/search/sort parameters
 *
 * # Returns
 * @return Result<Vec<ResearchRow>, sea_orm::DbErr> - The result of the operation
 */
pub async fn list_researches(query: &ListQuery) -> Result<Vec<ResearchRow>, DbErr> {
    let conn = get_database_connection().await?;

    //The CAST join is not expressible with sea_orm relations, so the listing
    //runs as raw SQL with the shared filter layer providing the suffix
    let (suffix, values) = filters::build_clauses(&LIST_SPEC, query);
    let sql = format!("{}{}", BASE_SELECT, suffix);
    let rows = JsonValue::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        &sql,
        values,
    ))
    .all(&conn)
    .await?;

    Ok(rows.iter().map(row_from_json).collect())
}

/**
 * Get a single research by its opaque hashed identifier
 *
 * # Arguments
 * @param hashed_id: &str - The hashed identifier
 *
 * # Returns
 * @return Result<Option<ResearchRow>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_research_by_hashed_id(hashed_id: &str) -> Result<Option<ResearchRow>, DbErr> {
    let conn = get_database_connection().await?;

    let sql = format!("{} WHERE r.hashed_id = $1", BASE_SELECT);
    let row = JsonValue::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        &sql,
        [hashed_id.into()],
    ))
    .one(&conn)
    .await?;

    Ok(row.as_ref().map(row_from_json))
}

/**
 * Create a research in the database
 *
 * The insert and the hashed-id assignment run in one transaction: the digest
 * depends on the generated primary key, so the row is inserted without a
 * hash and updated before commit. A failure of either statement rolls back
 * both, so no row is ever visible with a missing or wrong hashed id.
 *
 * # Arguments
 * @param record: NewResearchRecord - The validated research fields
 *
 * # Returns
 * @return Result<ResearchModel, sea_orm::DbErr> - The result of the operation
 */
pub async fn create_research(record: NewResearchRecord) -> Result<ResearchModel, DbErr> {
    let conn = get_database_connection().await?;
    let txn = conn.begin().await?;
    let now: DateTime<FixedOffset> = Utc::now().into();

    let new_research = ActiveModel {
        title: Set(record.title),
        researcher: Set(record.researcher),
        category: Set(record.category),
        status: Set(ApprovalStatus::Pending.as_str().to_string()),
        progress_status: Set(record.progress_status),
        document: Set(record.document),
        document_type: Set(record.document_type),
        url: Set(None),
        year: Set(record.year),
        school: Set(record.school),
        institution: Set(record.institution),
        abstract_text: Set(record.abstract_text),
        hashed_id: Set(None),
        user_id: Set(record.user_id),
        approval_requested: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let inserted = new_research.insert(&txn).await?;
    let id = inserted.id;
    let mut with_hash = inserted.into_active_model();
    with_hash.hashed_id = Set(Some(ident::hash_id(id)));
    let research = with_hash.update(&txn).await?;
    txn.commit().await?;

    Ok(research)
}

/// Dashboard counters served by the analytics endpoint. The deltas compare
/// submissions created in the last thirty days against the thirty days
/// before, per status bucket.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResearchAnalytics {
    #[serde(flatten)]
    pub totals: AnalyticsTotals,
    pub percentage_change: AnalyticsChange,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalyticsTotals {
    pub total_researches: i64,
    pub pending_researches: i64,
    pub total_rejected: i64,
    pub total_onhold: i64,
    pub total_published: i64,
    pub total_approved: i64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalyticsChange {
    pub total_researches: f64,
    pub pending_researches: f64,
    pub total_rejected: f64,
    pub total_onhold: f64,
    pub total_published: f64,
    pub total_approved: f64,
}

const ANALYTICS_WINDOW_DAYS: i64 = 30;

/**
 * Get per-status research counts and their thirty-day percentage deltas
 *
 * # Arguments
 * @param session_id: Option<&str> - When present, restrict the counts to
 *   the researches submitted under that session
 *
 * # Returns
 * @return Result<ResearchAnalytics, sea_orm::DbErr> - The result of the operation
 */
pub async fn research_analytics(session_id: Option<&str>) -> Result<ResearchAnalytics, DbErr> {
    let conn = get_database_connection().await?;

    let mut sql = String::from("SELECT status, created_at FROM researches");
    let mut values: Vec<Value> = Vec::new();
    if let Some(session) = session_id.filter(|s| !s.trim().is_empty()) {
        sql.push_str(" WHERE user_id = $1");
        values.push(session.into());
    }

    let rows = JsonValue::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        &sql,
        values,
    ))
    .all(&conn)
    .await?;

    let samples: Vec<(String, DateTime<Utc>)> = rows
        .iter()
        .map(|row| {
            (
                get_string_field(row, "status").unwrap_or_default(),
                parse_datetime_field(row, "created_at")
                    .expect("created_at must be a valid datetime"),
            )
        })
        .collect();

    Ok(summarize(&samples, Utc::now()))
}

fn summarize(samples: &[(String, DateTime<Utc>)], now: DateTime<Utc>) -> ResearchAnalytics {
    let window = chrono::Duration::days(ANALYTICS_WINDOW_DAYS);
    let mut totals = AnalyticsTotals::default();
    let mut recent = AnalyticsTotals::default();
    let mut previous = AnalyticsTotals::default();

    for (status, created_at) in samples {
        bump(&mut totals, status);
        if *created_at > now - window {
            bump(&mut recent, status);
        } else if *created_at > now - window - window {
            bump(&mut previous, status);
        }
    }

    ResearchAnalytics {
        percentage_change: AnalyticsChange {
            total_researches: percentage(recent.total_researches, previous.total_researches),
            pending_researches: percentage(recent.pending_researches, previous.pending_researches),
            total_rejected: percentage(recent.total_rejected, previous.total_rejected),
            total_onhold: percentage(recent.total_onhold, previous.total_onhold),
            total_published: percentage(recent.total_published, previous.total_published),
            total_approved: percentage(recent.total_approved, previous.total_approved),
        },
        totals,
    }
}

fn bump(counts: &mut AnalyticsTotals, status: &str) {
    counts.total_researches += 1;
    match status.parse::<ApprovalStatus>() {
        Ok(ApprovalStatus::Pending) => counts.pending_researches += 1,
        Ok(ApprovalStatus::Rejected) => counts.total_rejected += 1,
        Ok(ApprovalStatus::OnHold) => counts.total_onhold += 1,
        Ok(ApprovalStatus::Published) => counts.total_published += 1,
        Ok(ApprovalStatus::Approved) => counts.total_approved += 1,
        _ => {}
    }
}

fn percentage(recent: i64, previous: i64) -> f64 {
    if previous == 0 {
        if recent > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        ((recent - previous) as f64 / previous as f64 * 100.0).round()
    }
}

fn row_from_json(row: &JsonValue) -> ResearchRow {
    ResearchRow {
        id: get_i32_field(row, "id").expect("ID must exist"),
        title: get_string_field(row, "title").unwrap_or_default(),
        researcher: get_string_field(row, "researcher").unwrap_or_default(),
        status: get_string_field(row, "status").unwrap_or_default(),
        progress_status: get_string_field(row, "progress_status").unwrap_or_default(),
        year: get_string_field(row, "year").unwrap_or_default(),
        abstract_text: get_string_field(row, "abstract").unwrap_or_default(),
        document: get_string_field(row, "document").unwrap_or_default(),
        document_type: get_string_field(row, "document_type").unwrap_or_default(),
        url: get_string_field(row, "url"),
        category: get_string_field(row, "category").unwrap_or_default(),
        hashed_id: get_string_field(row, "hashed_id"),
        approval_requested: get_bool_field(row, "approval_requested").unwrap_or(false),
        created_at: parse_datetime_field(row, "created_at")
            .expect("created_at must be a valid datetime"),
        institute: get_string_field(row, "institute").unwrap_or_default(),
        school: get_string_field(row, "school").unwrap_or_default(),
    }
}

fn get_string_field(json: &JsonValue, field: &str) -> Option<String> {
    json.get(field)?.as_str().map(|s| s.to_string())
}

fn get_i32_field(json: &JsonValue, field: &str) -> Option<i32> {
    json.get(field)?.as_i64().map(|v| v as i32)
}

fn get_bool_field(json: &JsonValue, field: &str) -> Option<bool> {
    json.get(field)?.as_bool()
}

fn parse_datetime_field(json: &JsonValue, field: &str) -> Option<DateTime<Utc>> {
    json.get(field)?
        .as_str()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(status: &str, days_ago: i64, now: DateTime<Utc>) -> (String, DateTime<Utc>) {
        (status.to_string(), now - Duration::days(days_ago))
    }

    #[test]
    fn test_summarize_counts_per_status_bucket() {
        let now = Utc::now();
        let samples = vec![
            sample("Pending", 1, now),
            sample("Pending", 2, now),
            sample("Approved", 3, now),
            sample("Rejected", 4, now),
            sample("On hold", 5, now),
            sample("Published", 6, now),
            sample("Under review", 7, now),
        ];

        let analytics = summarize(&samples, now);
        assert_eq!(analytics.totals.total_researches, 7);
        assert_eq!(analytics.totals.pending_researches, 2);
        assert_eq!(analytics.totals.total_approved, 1);
        assert_eq!(analytics.totals.total_rejected, 1);
        assert_eq!(analytics.totals.total_onhold, 1);
        assert_eq!(analytics.totals.total_published, 1);
    }

    #[test]
    fn test_summarize_compares_adjacent_windows() {
        let now = Utc::now();
        let samples = vec![
            // Three approved this window against one in the previous.
            sample("Approved", 2, now),
            sample("Approved", 5, now),
            sample("Approved", 10, now),
            sample("Approved", 40, now),
            // First pending ever, inside the current window.
            sample("Pending", 3, now),
            // A rejection older than both windows only counts in the totals.
            sample("Rejected", 90, now),
        ];

        let analytics = summarize(&samples, now);
        assert_eq!(analytics.totals.total_approved, 4);
        assert_eq!(analytics.percentage_change.total_approved, 200.0);
        assert_eq!(analytics.percentage_change.pending_researches, 100.0);
        assert_eq!(analytics.percentage_change.total_rejected, 0.0);
        assert_eq!(analytics.totals.total_rejected, 1);
    }

    #[test]
    fn test_analytics_serializes_dashboard_field_names() {
        let analytics = summarize(&[], Utc::now());
        let json = serde_json::to_value(&analytics).unwrap();

        for field in [
            "total_researches",
            "pending_researches",
            "total_rejected",
            "total_onhold",
            "total_published",
            "total_approved",
        ] {
            assert!(json.get(field).is_some(), "missing top-level {}", field);
            assert!(
                json["percentage_change"].get(field).is_some(),
                "missing percentage_change.{}",
                field
            );
        }
    }
}
