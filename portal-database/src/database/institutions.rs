use crate::database::filters::{self, ListQuery, ListSpec};
use crate::get_database_connection;
use crate::models::institutions::{Column, Entity as Institution, Model as InstitutionModel};
use crate::types::{InstitutionStatus, PaymentStatus};
use sea_orm::prelude::Expr;
use sea_orm::{entity::*, query::*, DbBackend, DbErr, TransactionTrait};

/// The filter parameter matches either status column, so "Active" and
/// "Maintained" both narrow the list from the same dropdown.
const LIST_SPEC: ListSpec = ListSpec {
    status_columns: &["status", "payment_status"],
    search_columns: &[
        "name",
        "hd_address",
        "CAST(id AS TEXT)",
        "contact",
        "hashed_id",
    ],
    keyword_sort: Some(("name", "name")),
    created_column: "created_at",
    id_column: "id",
};

/**
 * Get institutions from the database
 *
 * # Arguments
 * @param query: &ListQuery - The filter/search/sort parameters
 *
 * # Returns
 * @return Result<Vec<InstitutionModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_institutions(query: &ListQuery) -> Result<Vec<InstitutionModel>, DbErr> {
    let conn = get_database_connection().await?;

    let (suffix, values) = filters::build_clauses(&LIST_SPEC, query);
    let sql = format!("SELECT * FROM institutions{}", suffix);
    Institution::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            values,
        ))
        .all(&conn)
        .await
}

/**
 * Activate an institution: mark it payment-current and active
 *
 * Both updates run in one transaction, so an interrupted activation leaves
 * neither column changed.
 *
 * # Arguments
 * @param id: i32 - The institution id
 *
 * # Returns
 * @return Result<bool, sea_orm::DbErr> - false when no institution matched the id
 */
pub async fn activate_institution(id: i32) -> Result<bool, DbErr> {
    let conn = get_database_connection().await?;
    let txn = conn.begin().await?;

    let payments = Institution::update_many()
        .col_expr(
            Column::PaymentStatus,
            Expr::value(PaymentStatus::Maintained.as_str()),
        )
        .filter(Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if payments.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(false);
    }

    Institution::update_many()
        .col_expr(
            Column::Status,
            Expr::value(InstitutionStatus::Active.as_str()),
        )
        .filter(Column::Id.eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(true)
}
