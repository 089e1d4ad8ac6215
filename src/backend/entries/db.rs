//! Database operations for journal entries
//!
//! Every query is scoped to the owning user. Deleted entries stay in the
//! table with `deleted = 1` and are invisible to all of these functions.

use serde::{Deserialize, Serialize};
use sqlx::AnyConnection;

use crate::backend::database::Backend;

/// Journal entry as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub created_at: String,
}

/// Fields written by create and update
#[derive(Debug, Clone, Copy)]
pub struct EntryFields<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub mood: Option<&'a str>,
}

/// List a user's live entries, newest first
pub async fn list_entries(conn: &mut AnyConnection, user_id: i64) -> Result<Vec<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>(
        "SELECT id, user_id, title, content, mood, CAST(created_at AS CHAR) AS created_at
         FROM entries
         WHERE user_id = ? AND deleted = 0
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Insert an entry and return its id
pub async fn create_entry(
    conn: &mut AnyConnection,
    backend: Backend,
    user_id: i64,
    fields: EntryFields<'_>,
    created_at: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query(
        "INSERT INTO entries (user_id, title, content, mood, created_at, deleted)
         VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(user_id)
    .bind(fields.title)
    .bind(fields.content)
    .bind(fields.mood)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    backend.inserted_id(conn).await
}

/// Whether `id` is a live entry owned by `user_id`
pub async fn entry_exists(conn: &mut AnyConnection, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM entries WHERE id = ? AND user_id = ? AND deleted = 0",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(found.is_some())
}

/// Overwrite an entry's fields
///
/// # Returns
/// `false` when the entry does not exist, belongs to someone else, or was deleted
pub async fn update_entry(
    conn: &mut AnyConnection,
    user_id: i64,
    id: i64,
    fields: EntryFields<'_>,
) -> Result<bool, sqlx::Error> {
    // MySQL reports changed rows, not matched rows, so check ownership first.
    if !entry_exists(conn, user_id, id).await? {
        return Ok(false);
    }

    sqlx::query(
        "UPDATE entries SET title = ?, content = ?, mood = ?
         WHERE id = ? AND user_id = ? AND deleted = 0",
    )
    .bind(fields.title)
    .bind(fields.content)
    .bind(fields.mood)
    .bind(id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(true)
}

/// Mark an entry deleted
///
/// # Returns
/// `false` when there was no live entry with that id for this user
pub async fn soft_delete_entry(conn: &mut AnyConnection, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE entries SET deleted = 1 WHERE id = ? AND user_id = ? AND deleted = 0")
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
