use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::stores::DesignationStore;
use crate::error::ApiError;
use crate::services::hr_sync::DesignationSyncRequest;
use crate::services::SyncError;
use crate::state::AppState;

/// POST /designations/add/designation - upsert a designation pushed by HR
pub async fn sync_post(
    State(state): State<AppState>,
    Json(payload): Json<DesignationSyncRequest>,
) -> Result<Json<Value>, ApiError> {
    let designation = state
        .hr_sync
        .sync_designation(payload)
        .await
        .map_err(|err| err.into_api("Failed to sync designation"))?;

    Ok(Json(json!({
        "message": "Designation synced successfully",
        "designation": {
            "DesignationId": designation.designation_id,
            "name": designation.name,
        }
    })))
}

/// GET /designations - all designations, active and inactive
pub async fn list_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let designations = state
        .designations
        .list_all()
        .await
        .map_err(|err| SyncError::from(err).into_api("Failed to fetch designations"))?;

    Ok(Json(json!({
        "success": true,
        "count": designations.len(),
        "designations": designations,
    })))
}

/// GET /designations/active - only active designations (salary templates & payroll)
pub async fn active_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let designations = state
        .designations
        .list_active()
        .await
        .map_err(|err| SyncError::from(err).into_api("Failed to fetch active designations"))?;

    Ok(Json(json!({
        "success": true,
        "count": designations.len(),
        "designations": designations,
    })))
}

/// GET /designations/:id - fetch one designation by internal id
pub async fn show_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid designation id"))?;

    let designation = state
        .designations
        .find_by_id(id)
        .await
        .map_err(|err| SyncError::from(err).into_api("Failed to fetch designation"))?
        .ok_or_else(|| ApiError::not_found("Designation not found"))?;

    Ok(Json(json!({
        "success": true,
        "designation": designation,
    })))
}
