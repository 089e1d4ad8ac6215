/**
 * User Model and Database Operations
 *
 * Users are created on registration and read on login. The core never
 * updates or deletes them.
 */

use serde::Serialize;
use sqlx::AnyConnection;

use crate::backend::database::Backend;

/// User row as stored in the `users` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Auto-increment user ID
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Optional contact address
    pub email: Option<String>,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation time in the session time zone
    pub created_at: String,
}

/// Insert a new user
///
/// # Arguments
/// * `conn` - Leased connection
/// * `backend` - Dialect of `conn`, used to read back the new id
/// * `username` - Unique username
/// * `email` - Optional email address
/// * `password_hash` - bcrypt digest
/// * `created_at` - Timestamp in the session time zone
///
/// # Returns
/// ID of the new row. A duplicate username surfaces as a unique-violation
/// database error.
pub async fn create_user(
    conn: &mut AnyConnection,
    backend: Backend,
    username: &str,
    email: Option<&str>,
    password_hash: &str,
    created_at: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    backend.inserted_id(conn).await
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    conn: &mut AnyConnection,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, CAST(created_at AS CHAR) AS created_at
         FROM users
         WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(&mut *conn)
    .await
}

/// Whether a database error is a unique-key violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
