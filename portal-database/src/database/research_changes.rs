use crate::get_database_connection;
use crate::models::research_changes::{ActiveModel, Model as ChangeModel};
use crate::models::researches::{Column as ResearchColumn, Entity as Research};
use crate::types::ApprovalStatus;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::prelude::Expr;
use sea_orm::{entity::*, query::*, DbErr, TransactionTrait};

/// Boilerplate request text attached to every proposed edit.
const CHANGE_REQUEST_CONTENT: &str = "Permission to review and merge changes";

/// The validated field set for a proposed edit. Mirrors the editable columns
/// of a research plus the reference to the target row and the submitting user.
#[derive(Clone, Debug)]
pub struct NewChangeRecord {
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub progress_status: String,
    pub document: String,
    /// None when no replacement document was attached; the change then
    /// carries the target's recorded document type.
    pub document_type: Option<String>,
    pub year: String,
    pub school: String,
    pub institution: String,
    pub abstract_text: String,
    pub research_id: String,
    pub changed_by: String,
}

/**
 * Create a research change and flag the target research as awaiting review
 *
 * The change insert and the approval_requested update run in one
 * transaction. The target research row itself is left untouched: an edit is
 * a proposal, applied only when a reviewer approves the change. A change
 * without a replacement document inherits the target's document type, so
 * the proposed row never loses the type of the file it still points at.
 *
 * # Arguments
 * @param record: NewChangeRecord - The validated change fields
 *
 * # Returns
 * @return Result<ChangeModel, sea_orm::DbErr> - The result of the operation
 */
pub async fn create_change(record: NewChangeRecord) -> Result<ChangeModel, DbErr> {
    let research_id: i32 = record
        .research_id
        .parse()
        .map_err(|_| DbErr::Custom(format!("Invalid research id: {}", record.research_id)))?;

    let conn = get_database_connection().await?;
    let txn = conn.begin().await?;
    let now: DateTime<FixedOffset> = Utc::now().into();

    let target = Research::find_by_id(research_id).one(&txn).await?;
    let Some(target) = target else {
        txn.rollback().await?;
        return Err(DbErr::Custom(format!(
            "Research {} not found",
            research_id
        )));
    };

    let new_change = ActiveModel {
        title: Set(record.title),
        researcher: Set(record.researcher),
        category: Set(record.category),
        status: Set(ApprovalStatus::Pending.as_str().to_string()),
        progress_status: Set(record.progress_status),
        document: Set(record.document),
        document_type: Set(record.document_type.unwrap_or(target.document_type)),
        year: Set(record.year),
        school: Set(record.school),
        institution: Set(record.institution),
        abstract_text: Set(record.abstract_text),
        research_id: Set(record.research_id),
        changed_by: Set(record.changed_by),
        content: Set(CHANGE_REQUEST_CONTENT.to_string()),
        created_at: Set(now),
        ..Default::default()
    };
    let change = new_change.insert(&txn).await?;

    Research::update_many()
        .col_expr(ResearchColumn::ApprovalRequested, Expr::value(true))
        .filter(ResearchColumn::Id.eq(research_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(change)
}
