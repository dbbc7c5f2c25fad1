// Store traits sit between the services and Postgres so the sync workflows
// can be exercised against in-memory fakes. Each store is keyed by the
// external identifier owned by the HR system, and every write that must be
// atomic per key (the upserts) is a single INSERT .. ON CONFLICT statement.

pub mod designation;
pub mod employee;
pub mod salary;
pub mod user;

pub use designation::{DesignationStore, DesignationUpsert, PgDesignationStore};
pub use employee::{
    EmployeeStats, EmployeeStore, EmployeeUpdate, EmployeeUpsert, GroupCount, PgEmployeeStore,
};
pub use salary::{PgSalaryStore, SalaryStore};
pub use user::{PgUserStore, UserStore};
