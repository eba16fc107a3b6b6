use chrono::{DateTime, FixedOffset};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A submitted research work item. The `school` and `institution` columns are
/// text references holding the numeric id of the related row, which is why
/// listing joins cast the related primary keys to text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "researches")]
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
    pub url: Option<String>,
    pub year: String,
    pub school: String,
    pub institution: String,
    #[sea_orm(column_name = "abstract", column_type = "Text")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub hashed_id: Option<String>,
    pub user_id: String,
    pub approval_requested: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
