use crate::get_database_connection;
use crate::models::schools::{Column, Entity as School, Model as SchoolModel};
use sea_orm::{entity::*, query::*, DbErr};

/**
 * Get all schools from the database, for the submission form dropdowns
 *
 * # Returns
 * @return Result<Vec<SchoolModel>, sea_orm::DbErr> - The result of the operation
 */
pub async fn get_schools() -> Result<Vec<SchoolModel>, DbErr> {
    let conn = get_database_connection().await?;
    School::find()
        .order_by(Column::Name, Order::Asc)
        .all(&conn)
        .await
}
