use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use tracing::{error, info};

use crate::database::models::{Designation, Employee, EmployeeStatus};
use crate::database::stores::{
    DesignationStore, DesignationUpsert, EmployeeStore, EmployeeUpsert, UserStore,
};
use crate::services::salary::SalaryService;
use crate::services::SyncError;
use crate::validation;

/// Upstream HR payload for a designation upsert. Field names follow the HR
/// system's wire format.
#[derive(Debug, Deserialize)]
pub struct DesignationSyncRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
}

/// Upstream HR payload for an employee upsert.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSyncRequest {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub joining_date: Option<String>,
    pub phone: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: Option<String>,
}

/// Narrow activation/deactivation push from HR.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSyncRequest {
    pub employee_id: Option<String>,
    pub status: Option<String>,
}

/// The HR-to-Finance synchronization workflows: designation upsert, employee
/// upsert with joint email uniqueness, and the update-only status push.
///
/// Correctness under concurrent syncs for the same external id comes from
/// the stores' atomic upserts, not from the existence probe here; the probe
/// only selects the provisioning branch.
pub struct HrSyncService {
    employees: Arc<dyn EmployeeStore>,
    users: Arc<dyn UserStore>,
    designations: Arc<dyn DesignationStore>,
    salary: SalaryService,
}

impl HrSyncService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        users: Arc<dyn UserStore>,
        designations: Arc<dyn DesignationStore>,
        salary: SalaryService,
    ) -> Self {
        Self { employees, users, designations, salary }
    }

    /// Upsert a designation pushed by HR, keyed by its external numeric id.
    pub async fn sync_designation(&self, payload: DesignationSyncRequest) -> Result<Designation, SyncError> {
        let (Some(id), Some(name), Some(department)) = (
            payload.id,
            payload.name.filter(|s| !s.trim().is_empty()),
            payload.department.filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(SyncError::Validation("Invalid HR designation payload".into()));
        };

        let record = DesignationUpsert {
            designation_id: id,
            name: name.trim().to_string(),
            department: department.trim().to_string(),
            description: payload.description,
            is_active: payload.is_active.unwrap_or(true),
            hr_created_at: parse_hr_timestamp(payload.created_at.as_deref())?,
        };

        let designation = self.designations.upsert_from_hr(&record).await?;
        info!(
            designation_id = designation.designation_id,
            name = %designation.name,
            "designation synced from HR"
        );

        Ok(designation)
    }

    /// Upsert an employee pushed by HR. Provisioning runs only when the
    /// record did not exist before this call, and its failure never fails
    /// the sync: recording the employee always wins.
    pub async fn sync_employee(&self, payload: EmployeeSyncRequest) -> Result<Employee, SyncError> {
        let (Some(employee_id), Some(name), Some(email), Some(department), Some(designation), Some(joining_date)) = (
            payload.employee_id.filter(|s| !s.trim().is_empty()),
            payload.name.filter(|s| !s.trim().is_empty()),
            payload.email.filter(|s| !s.trim().is_empty()),
            payload.department.filter(|s| !s.trim().is_empty()),
            payload.designation.filter(|s| !s.trim().is_empty()),
            payload.joining_date.filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(SyncError::Validation(
                "employeeId, name, email, department, designation, joiningDate are required".into(),
            ));
        };

        let email = validation::normalize_email(&email);
        let joining_date = parse_joining_date(&joining_date)?;
        let status = match payload.status.as_deref() {
            None => EmployeeStatus::Active,
            Some(raw) => EmployeeStatus::parse(raw)
                .ok_or_else(|| SyncError::Validation("Invalid status value".into()))?,
        };

        // Create-vs-update branch; only fresh inserts provision a salary.
        let existing = self.employees.find_by_employee_id(&employee_id).await?;

        // Joint uniqueness across employees and user accounts, checked only
        // when the record is new or the email actually changes.
        let email_changed = existing.as_ref().map(|e| e.email != email).unwrap_or(true);
        if email_changed {
            if self.employees.email_taken(&email, &employee_id).await? {
                return Err(SyncError::Conflict("Email already exists for another employee".into()));
            }
            if self.users.email_taken(&email).await? {
                return Err(SyncError::Conflict("Email already exists in user system".into()));
            }
        }

        let record = EmployeeUpsert {
            employee_id,
            name,
            email,
            department,
            designation,
            joining_date,
            phone: payload.phone,
            pan_number: payload.pan_number.map(|p| p.trim().to_uppercase()),
            aadhar_number: payload.aadhar_number,
            status,
        };

        let employee = self.employees.upsert_from_hr(&record).await?;
        info!(employee_id = %employee.employee_id, "employee synced from HR");

        if existing.is_none() {
            // A missing template or a store failure here must not undo or
            // fail the sync; the employee write already succeeded.
            if let Err(err) = self.salary.provision_for(&employee).await {
                error!(
                    error = %err,
                    employee_id = %employee.employee_id,
                    "salary auto-provisioning failed"
                );
            }
        }

        Ok(employee)
    }

    /// Update-only status push. Never creates a record.
    pub async fn sync_status(&self, payload: StatusSyncRequest) -> Result<Employee, SyncError> {
        let (Some(employee_id), Some(status)) = (payload.employee_id, payload.status) else {
            return Err(SyncError::Validation("employeeId and status are required".into()));
        };

        let status = EmployeeStatus::parse(&status)
            .ok_or_else(|| SyncError::Validation("Invalid status value".into()))?;

        let employee = self
            .employees
            .update_status(&employee_id, status)
            .await?
            .ok_or_else(|| SyncError::NotFound("Employee not found in finance".into()))?;

        info!(employee_id = %employee.employee_id, status = %employee.status, "employee status synced from HR");
        Ok(employee)
    }
}

fn parse_joining_date(raw: &str) -> Result<NaiveDate, SyncError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive());
    }
    Err(SyncError::Validation(format!("Invalid joiningDate: {raw}")))
}

/// HR sends the provenance timestamp in a handful of shapes; absent input is
/// simply absent, unparseable input is rejected.
fn parse_hr_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, SyncError> {
    let Some(raw) = raw else { return Ok(None) };

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(datetime.with_timezone(&Utc)));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(datetime.and_utc()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
    }
    Err(SyncError::Validation(format!("Invalid created_at timestamp: {raw}")))
}
