use crate::database::filters::{self, ListQuery, ListSpec};
use crate::get_database_connection;
use crate::models::requests::{Entity as Request, Model as RequestModel};
use sea_orm::{entity::*, query::*, DbBackend, DbErr};

const LIST_SPEC: ListSpec = ListSpec {
    status_columns: &["status"],
    search_columns: &["sender", "content", "research_id"],
    keyword_sort: None,
    created_column: "created_at",
    id_column: "id",
};

/**
 * Get approval requests, optionally scoped to one supervisor session
 *
 * # Arguments
 * @param query: &ListQuery - The filter/search/sort parameters
 * @param session_id: Option<&str> - The supervisor session identifier
 *
 * # Returns
 * @return Result<Vec<RequestModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_requests(
    query: &ListQuery,
    session_id: Option<&str>,
) -> Result<Vec<RequestModel>, DbErr> {
    let conn = get_database_connection().await?;

    let (mut clauses, mut values) = filters::conditions(&LIST_SPEC, query);
    if let Some(session) = session_id.filter(|s| !s.trim().is_empty()) {
        values.push(session.into());
        clauses.push(format!("supervisor_id = ${}", values.len()));
    }

    let mut sql = String::from("SELECT * FROM requests");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&filters::order_by(&LIST_SPEC, query));

    Request::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            values,
        ))
        .all(&conn)
        .await
}
