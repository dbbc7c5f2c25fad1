use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::database::models::{Employee, EmployeeStatus};
use crate::database::stores::{EmployeeStats, EmployeeStore, EmployeeUpdate, UserStore};
use crate::services::SyncError;
use crate::validation;

/// Admin edit payload. Only the provided fields are written; phone, email,
/// PAN and status pass the shared validation rules first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub joining_date: Option<String>,
    pub phone: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub photo: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    pub employee_ids: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Read and maintenance operations behind the admin UI. Shares the employee
/// and user stores with the sync workflows so the uniqueness rules stay in
/// one place.
pub struct EmployeeAdminService {
    employees: Arc<dyn EmployeeStore>,
    users: Arc<dyn UserStore>,
}

impl EmployeeAdminService {
    pub fn new(employees: Arc<dyn EmployeeStore>, users: Arc<dyn UserStore>) -> Self {
        Self { employees, users }
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, SyncError> {
        Ok(self.employees.list_all().await?)
    }

    pub async fn get(&self, employee_id: &str) -> Result<Employee, SyncError> {
        self.employees
            .find_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| SyncError::NotFound("Employee not found".into()))
    }

    /// Field update with the shared validation rules: canonical phone,
    /// joint email uniqueness when changed, uppercased unique PAN.
    pub async fn update(&self, employee_id: &str, payload: UpdateEmployeeRequest) -> Result<Employee, SyncError> {
        let current = self
            .employees
            .find_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| SyncError::NotFound("Employee not found".into()))?;

        let mut changes = EmployeeUpdate {
            name: payload.name,
            department: payload.department,
            designation: payload.designation,
            aadhar_number: payload.aadhar_number,
            photo: payload.photo,
            ..Default::default()
        };

        if let Some(raw) = payload.joining_date {
            let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| SyncError::Validation(format!("Invalid joiningDate: {raw}")))?;
            changes.joining_date = Some(date);
        }

        if let Some(raw) = payload.phone {
            let phone = validation::canonical_phone(&raw)
                .map_err(|err| SyncError::Validation(err.to_string()))?;
            changes.phone = Some(phone);
        }

        if let Some(raw) = payload.email {
            let email = validation::normalize_email(&raw);
            if current.email != email {
                if self.employees.email_taken(&email, employee_id).await? {
                    return Err(SyncError::Conflict("Email already exists for another employee".into()));
                }
                if self.users.email_taken(&email).await? {
                    return Err(SyncError::Conflict("Email already exists in the system".into()));
                }
            }
            changes.email = Some(email);
        }

        if let Some(raw) = payload.pan_number.filter(|s| !s.trim().is_empty()) {
            let pan = validation::canonical_pan(&raw)
                .map_err(|err| SyncError::Validation(err.to_string()))?;
            if current.pan_number.as_deref() != Some(pan.as_str())
                && self.employees.pan_taken(&pan, employee_id).await?
            {
                return Err(SyncError::Conflict("PAN number already exists for another employee".into()));
            }
            changes.pan_number = Some(pan);
        }

        if let Some(raw) = payload.status {
            let status = EmployeeStatus::parse(&raw)
                .ok_or_else(|| SyncError::Validation("Invalid status value".into()))?;
            changes.status = Some(status);
        }

        self.employees
            .update_fields(employee_id, &changes)
            .await?
            .ok_or_else(|| SyncError::NotFound("Employee not found".into()))
    }

    /// Remove an employee and any user account linked to it.
    pub async fn delete(&self, employee_id: &str) -> Result<Employee, SyncError> {
        let employee = self
            .employees
            .delete(employee_id)
            .await?
            .ok_or_else(|| SyncError::NotFound("Employee not found".into()))?;

        let removed = self.users.delete_by_person_id(employee_id).await?;
        if removed > 0 {
            info!(employee_id, "removed linked user account");
        }

        Ok(employee)
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Employee>, SyncError> {
        let status = EmployeeStatus::parse(status)
            .ok_or_else(|| SyncError::Validation(r#"Invalid status. Use "Active" or "Inactive"."#.into()))?;

        Ok(self.employees.list_by_status(status).await?)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Employee>, SyncError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SyncError::Validation("Search query is required".into()));
        }

        Ok(self.employees.search(query).await?)
    }

    pub async fn stats(&self) -> Result<EmployeeStats, SyncError> {
        Ok(self.employees.stats().await?)
    }

    pub async fn bulk_update_status(&self, payload: BulkStatusRequest) -> Result<(u64, EmployeeStatus), SyncError> {
        let ids = match payload.employee_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(SyncError::Validation("Employee IDs array is required".into())),
        };

        let status = payload
            .status
            .as_deref()
            .and_then(EmployeeStatus::parse)
            .ok_or_else(|| SyncError::Validation(r#"Invalid status. Use "Active" or "Inactive"."#.into()))?;

        let modified = self.employees.bulk_update_status(&ids, status).await?;
        Ok((modified, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_employee, MemoryEmployeeStore, MemoryUserStore};

    struct Harness {
        employees: Arc<MemoryEmployeeStore>,
        users: Arc<MemoryUserStore>,
        service: EmployeeAdminService,
    }

    fn harness() -> Harness {
        let employees = Arc::new(MemoryEmployeeStore::default());
        let users = Arc::new(MemoryUserStore::default());
        let service = EmployeeAdminService::new(employees.clone(), users.clone());
        Harness { employees, users, service }
    }

    #[tokio::test]
    async fn update_canonicalizes_phone() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));

        let employee = h
            .service
            .update(
                "E1",
                UpdateEmployeeRequest { phone: Some("+91 98765 43210".into()), ..Default::default() },
            )
            .await
            .unwrap();

        assert_eq!(employee.phone.as_deref(), Some("+919876543210"));
    }

    #[tokio::test]
    async fn update_rejects_invalid_phone() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));

        let err = h
            .service
            .update("E1", UpdateEmployeeRequest { phone: Some("12345".into()), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn update_uppercases_pan_and_rejects_duplicates() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));
        h.employees.insert(seed_employee("E2", "b@x.com"));

        let employee = h
            .service
            .update(
                "E1",
                UpdateEmployeeRequest { pan_number: Some("abcde1234f".into()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(employee.pan_number.as_deref(), Some("ABCDE1234F"));

        let err = h
            .service
            .update(
                "E2",
                UpdateEmployeeRequest { pan_number: Some("ABCDE1234F".into()), ..Default::default() },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_checks_email_uniqueness_only_when_changed() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));
        h.users.add_user("a@x.com", Some("E1"));

        // Unchanged email: no conflict even though a user account holds it.
        let result = h
            .service
            .update("E1", UpdateEmployeeRequest { email: Some("A@X.com".into()), ..Default::default() })
            .await;
        assert!(result.is_ok());

        h.users.add_user("other@x.com", None);
        let err = h
            .service
            .update("E1", UpdateEmployeeRequest { email: Some("other@x.com".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_rejects_invalid_status_override() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));

        let err = h
            .service
            .update("E1", UpdateEmployeeRequest { status: Some("Terminated".into()), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_removes_linked_user_account() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));
        h.users.add_user("a@x.com", Some("E1"));

        h.service.delete("E1").await.unwrap();

        assert!(h.employees.find_by_employee_id("E1").await.unwrap().is_none());
        assert!(!h.users.email_taken("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_employee_is_not_found() {
        let h = harness();
        let err = h.service.delete("GHOST").await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_requires_a_query() {
        let h = harness();
        let err = h.service.search("   ").await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn bulk_update_validates_inputs() {
        let h = harness();

        let err = h
            .service
            .bulk_update_status(BulkStatusRequest { employee_ids: Some(vec![]), status: Some("Active".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));

        let err = h
            .service
            .bulk_update_status(BulkStatusRequest {
                employee_ids: Some(vec!["E1".into()]),
                status: Some("Paused".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn bulk_update_reports_modified_count() {
        let h = harness();
        h.employees.insert(seed_employee("E1", "a@x.com"));
        h.employees.insert(seed_employee("E2", "b@x.com"));

        let (modified, status) = h
            .service
            .bulk_update_status(BulkStatusRequest {
                employee_ids: Some(vec!["E1".into(), "E2".into(), "GHOST".into()]),
                status: Some("Inactive".into()),
            })
            .await
            .unwrap();

        assert_eq!(modified, 2);
        assert_eq!(status, EmployeeStatus::Inactive);
    }
}
