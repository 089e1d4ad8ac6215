//! Car HTTP Handlers
//!
//! Protected routes for the caller's cars. Ownership comes from the verified
//! token only; an owner id in the request body is ignored.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use super::db::{self, Car};
use crate::backend::error::ApiError;
use crate::backend::middleware::{AuthUser, DbLease};
use crate::backend::database::schema::CAR_TEXT_MAX;
use crate::shared::error::{check_length, require_field};
use crate::shared::{CreatedResponse, SuccessResponse};

/// Body for `POST /cars`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateCarRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
}

/// Body for `GET /cars`
#[derive(Serialize, Deserialize, Debug)]
pub struct CarsResponse {
    pub cars: Vec<Car>,
}

pub async fn list_cars(AuthUser(user): AuthUser, db: DbLease) -> Result<Json<CarsResponse>, ApiError> {
    let mut lease = db.lock().await;
    let cars = db::list_cars(lease.connection()?, user.user_id).await?;
    Ok(Json(CarsResponse { cars }))
}

/// Register a car for the caller
///
/// # Errors
/// * `400 Bad Request` - missing or blank `make` or `model`
pub async fn create_car(
    AuthUser(user): AuthUser,
    db: DbLease,
    payload: Result<Json<CreateCarRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(request) = payload?;
    let make = require_field("make", request.make.as_deref())?;
    let model = require_field("model", request.model.as_deref())?;
    check_length("make", make, CAR_TEXT_MAX)?;
    check_length("model", model, CAR_TEXT_MAX)?;

    let mut lease = db.lock().await;
    let settings = lease.settings();
    let created_at = settings.local_timestamp();
    let id = db::create_car(
        lease.connection()?,
        settings.backend(),
        user.user_id,
        make,
        model,
        request.year,
        &created_at,
    )
    .await?;

    tracing::info!("Car {} created by user {}", id, user.user_id);
    Ok(Json(CreatedResponse::new(id)))
}

pub async fn delete_car(
    AuthUser(user): AuthUser,
    db: DbLease,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(id) = id?;
    let mut lease = db.lock().await;
    if !db::soft_delete_car(lease.connection()?, user.user_id, id).await? {
        return Err(ApiError::not_found("Car not found"));
    }
    Ok(Json(SuccessResponse::ok()))
}
