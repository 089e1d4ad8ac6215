//! Database operations for cars

use serde::{Deserialize, Serialize};
use sqlx::AnyConnection;

use crate::backend::database::Backend;

/// Car row as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub user_id: i64,
    pub make: String,
    pub model: String,
    pub year: Option<i64>,
    pub created_at: String,
}

/// List a user's live cars, newest first
pub async fn list_cars(conn: &mut AnyConnection, user_id: i64) -> Result<Vec<Car>, sqlx::Error> {
    sqlx::query_as::<_, Car>(
        "SELECT id, user_id, make, model, year, CAST(created_at AS CHAR) AS created_at
         FROM cars
         WHERE user_id = ? AND deleted = 0
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Insert a car and return its id
pub async fn create_car(
    conn: &mut AnyConnection,
    backend: Backend,
    user_id: i64,
    make: &str,
    model: &str,
    year: Option<i64>,
    created_at: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query(
        "INSERT INTO cars (user_id, make, model, year, created_at, deleted)
         VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(user_id)
    .bind(make)
    .bind(model)
    .bind(year)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    backend.inserted_id(conn).await
}

/// Mark a car deleted; `false` if the caller has no live car with that id
pub async fn soft_delete_car(conn: &mut AnyConnection, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE cars SET deleted = 1 WHERE id = ? AND user_id = ? AND deleted = 0")
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
