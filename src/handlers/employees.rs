use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::employee_admin::{BulkStatusRequest, UpdateEmployeeRequest};
use crate::services::hr_sync::{EmployeeSyncRequest, StatusSyncRequest};
use crate::services::SyncError;
use crate::state::AppState;

/// POST /employees/add/employees - upsert an employee pushed by HR,
/// auto-provisioning a salary on first creation
pub async fn hr_sync_post(
    State(state): State<AppState>,
    Json(payload): Json<EmployeeSyncRequest>,
) -> Result<Json<Value>, ApiError> {
    match state.hr_sync.sync_employee(payload).await {
        Ok(employee) => Ok(Json(json!({
            "message": "Employee synced successfully from HR",
            "employeeId": employee.employee_id,
        }))),
        // This endpoint echoes the underlying error text for HR-side debugging.
        Err(SyncError::Store(err)) => {
            tracing::error!(error = %err, "HR employee sync failed");
            Err(ApiError::internal_with_detail("Failed to sync employee from HR", err.to_string()))
        }
        Err(other) => Err(other.into_api("Failed to sync employee from HR")),
    }
}

/// POST /employees/update/status - update-only status push from HR
pub async fn status_sync_post(
    State(state): State<AppState>,
    Json(payload): Json<StatusSyncRequest>,
) -> Result<Json<Value>, ApiError> {
    let employee = state
        .hr_sync
        .sync_status(payload)
        .await
        .map_err(|err| err.into_api("Failed to sync employee status"))?;

    Ok(Json(json!({
        "message": "Employee status synced successfully",
        "employeeId": employee.employee_id,
        "status": employee.status,
    })))
}

/// GET /employees - all employees, newest first
pub async fn list_get(_auth: AuthUser, State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let employees = state
        .admin
        .list_all()
        .await
        .map_err(|err| err.into_api("Server error while fetching employees"))?;

    Ok(Json(json!({ "employees": employees })))
}

/// GET /employees/:id - fetch one employee by external id
pub async fn show_get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let employee = state
        .admin
        .get(&id)
        .await
        .map_err(|err| err.into_api("Server error while fetching employee"))?;

    Ok(Json(json!({ "employee": employee })))
}

/// PUT /employees/:id - field update with phone/email/PAN validation
pub async fn update_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<Value>, ApiError> {
    let employee = state
        .admin
        .update(&id, payload)
        .await
        .map_err(|err| err.into_api("Server error while updating employee"))?;

    Ok(Json(json!({
        "message": "Employee updated successfully",
        "employee": employee,
    })))
}

/// DELETE /employees/:id - delete the employee and any linked user account
pub async fn delete_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .admin
        .delete(&id)
        .await
        .map_err(|err| err.into_api("Server error while deleting employee"))?;

    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

/// GET /employees/status/:status - filter by activation state
pub async fn by_status_get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let employees = state
        .admin
        .list_by_status(&status)
        .await
        .map_err(|err| err.into_api("Server error while fetching employees by status"))?;

    Ok(Json(json!({
        "success": true,
        "count": employees.len(),
        "employees": employees,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// GET /employees/search/all?query= - substring search across identifying fields
pub async fn search_get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let employees = state
        .admin
        .search(params.query.as_deref().unwrap_or(""))
        .await
        .map_err(|err| err.into_api("Server error while searching employees"))?;

    Ok(Json(json!({
        "success": true,
        "count": employees.len(),
        "employees": employees,
    })))
}

/// GET /employees/stats/overview - counts by status, department, designation
pub async fn stats_get(_auth: AuthUser, State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats = state
        .admin
        .stats()
        .await
        .map_err(|err| err.into_api("Server error while fetching employee statistics"))?;

    Ok(Json(json!({
        "success": true,
        "stats": stats,
    })))
}

/// POST /employees/bulk/status - set the status for a list of external ids
pub async fn bulk_status_post(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<BulkStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let (modified, status) = state
        .admin
        .bulk_update_status(payload)
        .await
        .map_err(|err| err.into_api("Server error during bulk update"))?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully updated {} employees to {} status", modified, status),
        "modifiedCount": modified,
    })))
}
