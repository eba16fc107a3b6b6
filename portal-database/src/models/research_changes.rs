use chrono::{DateTime, FixedOffset};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A proposed edit to an existing research, pending reviewer approval.
/// Carries the full editable field set so approval can replace the target row
/// wholesale; `research_id` is a text reference to the target research.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "research_changes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub researcher: String,
    pub category: String,
    pub status: String,
    pub progress_status: String,
    pub document: String,
    pub document_type: String,
    pub year: String,
    pub school: String,
    pub institution: String,
    #[sea_orm(column_name = "abstract", column_type = "Text")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub research_id: String,
    pub changed_by: String,
    pub content: String,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
