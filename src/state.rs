use std::sync::Arc;

use sqlx::PgPool;

use crate::database::stores::{
    DesignationStore, PgDesignationStore, PgEmployeeStore, PgSalaryStore, PgUserStore,
};
use crate::services::{EmployeeAdminService, HrSyncService, SalaryService};

/// Shared handler state: the services composed over injected stores, plus
/// the designation store for its read endpoints.
#[derive(Clone)]
pub struct AppState {
    pub designations: Arc<dyn DesignationStore>,
    pub hr_sync: Arc<HrSyncService>,
    pub admin: Arc<EmployeeAdminService>,
}

impl AppState {
    /// Wire every store to the finance Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        let employees = Arc::new(PgEmployeeStore::new(pool.clone()));
        let users = Arc::new(PgUserStore::new(pool.clone()));
        let designations: Arc<dyn DesignationStore> = Arc::new(PgDesignationStore::new(pool.clone()));
        let salaries = Arc::new(PgSalaryStore::new(pool));

        let hr_sync = Arc::new(HrSyncService::new(
            employees.clone(),
            users.clone(),
            designations.clone(),
            SalaryService::new(salaries),
        ));
        let admin = Arc::new(EmployeeAdminService::new(employees, users));

        Self { designations, hr_sync, admin }
    }
}
