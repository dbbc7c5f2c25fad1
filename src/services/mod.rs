pub mod employee_admin;
pub mod hr_sync;
pub mod salary;

pub use employee_admin::EmployeeAdminService;
pub use hr_sync::HrSyncService;
pub use salary::{ProvisionOutcome, SalaryService};

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Failures from the sync and admin workflows. Validation and conflict
/// checks run before any write, so these two never leave partial state.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl SyncError {
    /// Map to an HTTP error. Store failures are logged here and replaced by
    /// `store_message` so internal detail stays out of the response body.
    pub fn into_api(self, store_message: &str) -> ApiError {
        match self {
            SyncError::Validation(msg) => ApiError::bad_request(msg),
            SyncError::Conflict(msg) => ApiError::conflict(msg),
            SyncError::NotFound(msg) => ApiError::not_found(msg),
            SyncError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                ApiError::internal_server_error(store_message)
            }
        }
    }
}
