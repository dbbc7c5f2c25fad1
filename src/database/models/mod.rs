pub mod designation;
pub mod employee;
pub mod salary;
pub mod user;

pub use designation::Designation;
pub use employee::{Employee, EmployeeStatus};
pub use salary::{Salary, SalaryTemplate};
pub use user::User;
