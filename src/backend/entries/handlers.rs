//! Journal Entry HTTP Handlers
//!
//! All routes here are protected. The owner is always the authenticated
//! user from the verified token; request bodies cannot name another user.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use super::db::{self, Entry, EntryFields};
use crate::backend::error::ApiError;
use crate::backend::middleware::{AuthUser, DbLease};
use crate::backend::database::schema::{CONTENT_MAX, MOOD_MAX, TITLE_MAX};
use crate::shared::error::{check_length, require_field};
use crate::shared::{CreatedResponse, SharedError, SuccessResponse};

/// Body for `POST /entries`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
}

/// Body for `PUT /entries`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateEntryRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
}

/// Body for `GET /entries`
#[derive(Serialize, Deserialize, Debug)]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
}

fn entry_fields<'a>(
    title: &'a Option<String>,
    content: &'a Option<String>,
    mood: &'a Option<String>,
) -> Result<EntryFields<'a>, SharedError> {
    let fields = EntryFields {
        title: require_field("title", title.as_deref())?,
        content: content.as_deref().unwrap_or(""),
        mood: mood.as_deref(),
    };
    check_length("title", fields.title, TITLE_MAX)?;
    check_length("content", fields.content, CONTENT_MAX)?;
    if let Some(mood) = fields.mood {
        check_length("mood", mood, MOOD_MAX)?;
    }
    Ok(fields)
}

/// List the caller's entries, newest first
pub async fn list_entries(
    AuthUser(user): AuthUser,
    db: DbLease,
) -> Result<Json<EntriesResponse>, ApiError> {
    let mut lease = db.lock().await;
    let entries = db::list_entries(lease.connection()?, user.user_id).await?;
    Ok(Json(EntriesResponse { entries }))
}

/// Create an entry owned by the caller
///
/// # Errors
/// * `400 Bad Request` - missing or blank `title`, or a field longer than its column
pub async fn create_entry(
    AuthUser(user): AuthUser,
    db: DbLease,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(request) = payload?;
    let fields = entry_fields(&request.title, &request.content, &request.mood)?;

    let mut lease = db.lock().await;
    let settings = lease.settings();
    let created_at = settings.local_timestamp();
    let id = db::create_entry(lease.connection()?, settings.backend(), user.user_id, fields, &created_at).await?;

    tracing::info!("Entry {} created by user {}", id, user.user_id);
    Ok(Json(CreatedResponse::new(id)))
}

/// Replace an entry's title, content and mood
///
/// # Errors
/// * `400 Bad Request` - missing `id` or `title`
/// * `404 Not Found` - no live entry with that id owned by the caller
pub async fn update_entry(
    AuthUser(user): AuthUser,
    db: DbLease,
    payload: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload?;
    let id = request.id.ok_or_else(|| SharedError::missing("id"))?;
    let fields = entry_fields(&request.title, &request.content, &request.mood)?;

    let mut lease = db.lock().await;
    if !db::update_entry(lease.connection()?, user.user_id, id, fields).await? {
        tracing::warn!("User {} tried to update missing entry {}", user.user_id, id);
        return Err(ApiError::not_found("Entry not found"));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Soft-delete an entry
///
/// # Errors
/// * `400 Bad Request` - `id` is not an integer
/// * `404 Not Found` - no live entry with that id owned by the caller
pub async fn delete_entry(
    AuthUser(user): AuthUser,
    db: DbLease,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(id) = id?;
    let mut lease = db.lock().await;
    if !db::soft_delete_entry(lease.connection()?, user.user_id, id).await? {
        return Err(ApiError::not_found("Entry not found"));
    }

    tracing::info!("Entry {} deleted by user {}", id, user.user_id);
    Ok(Json(SuccessResponse::ok()))
}
