use std::sync::Arc;

use tracing::info;

use crate::database::models::{Employee, Salary};
use crate::database::stores::SalaryStore;
use crate::database::DatabaseError;

/// What provisioning did for an employee. `NoTemplate` and `Skipped` are
/// expected non-error conditions, not failures.
#[derive(Debug)]
pub enum ProvisionOutcome {
    Created(Salary),
    Skipped,
    NoTemplate,
}

/// Derives salary records from designation-matched templates when an
/// employee is first created.
pub struct SalaryService {
    store: Arc<dyn SalaryStore>,
}

impl SalaryService {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    /// Provision a salary for a freshly created employee. The caller decides
    /// what an `Err` means; Employee Sync logs and discards it.
    pub async fn provision_for(&self, employee: &Employee) -> Result<ProvisionOutcome, DatabaseError> {
        let Some(template) = self.store.active_template_for(&employee.designation).await? else {
            info!(
                designation = %employee.designation,
                "no active salary template for designation, skipping salary creation"
            );
            return Ok(ProvisionOutcome::NoTemplate);
        };

        match self.store.create_from_template(employee, &template).await? {
            Some(salary) => {
                info!(employee_id = %employee.employee_id, "salary record created automatically");
                Ok(ProvisionOutcome::Created(salary))
            }
            None => {
                info!(employee_id = %employee.employee_id, "salary record already present, skipped");
                Ok(ProvisionOutcome::Skipped)
            }
        }
    }
}
