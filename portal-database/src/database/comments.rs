use crate::database::filters::{self, ListQuery, ListSpec};
use crate::get_database_connection;
use crate::models::comments::{Entity as Comment, Model as CommentModel};
use sea_orm::{entity::*, query::*, DbBackend, DbErr};

const LIST_SPEC: ListSpec = ListSpec {
    status_columns: &["status"],
    search_columns: &["sender", "content", "research_id"],
    keyword_sort: None,
    created_column: "created_at",
    id_column: "id",
};

/**
 * Get comments from the database
 *
 * # Arguments
 * @param query: &ListQuery - The filter/search/sort parameters
 *
 * # Returns
 * @return Result<Vec<CommentModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_comments(query: &ListQuery) -> Result<Vec<CommentModel>, DbErr> {
    let conn = get_database_connection().await?;

    let (suffix, values) = filters::build_clauses(&LIST_SPEC, query);
    let sql = format!("SELECT * FROM comments{}", suffix);
    Comment::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            values,
        ))
        .all(&conn)
        .await
}
