pub mod designations;
pub mod employees;
