//! In-memory store fakes for exercising the sync services without Postgres.
//!
//! The fakes mirror the per-key semantics of the SQL stores: upserts are
//! keyed by the external identifier and overwrite tracked fields, the salary
//! fake enforces one salary per employee.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Designation, Employee, EmployeeStatus, Salary, SalaryTemplate, User};
use crate::database::stores::{
    DesignationStore, DesignationUpsert, EmployeeStats, EmployeeStore, EmployeeUpdate,
    EmployeeUpsert, GroupCount, SalaryStore, UserStore,
};

fn store_failure() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::PoolClosed)
}

/// Minimal employee row for seeding admin-path tests.
pub fn seed_employee(employee_id: &str, email: &str) -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        name: "Seeded".to_string(),
        department: "Tech".to_string(),
        designation: "Engineer".to_string(),
        email: email.to_string(),
        joining_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        phone: None,
        pan_number: None,
        aadhar_number: None,
        photo: None,
        status: EmployeeStatus::Active,
        source: "HR".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemoryEmployeeStore {
    rows: Mutex<HashMap<String, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn insert(&self, employee: Employee) {
        self.rows
            .lock()
            .expect("employee store lock")
            .insert(employee.employee_id.clone(), employee);
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError> {
        Ok(self.rows.lock().expect("lock").get(employee_id).cloned())
    }

    async fn upsert_from_hr(&self, record: &EmployeeUpsert) -> Result<Employee, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        let now = Utc::now();

        let employee = rows
            .entry(record.employee_id.clone())
            .and_modify(|existing| {
                existing.name = record.name.clone();
                existing.email = record.email.clone();
                existing.department = record.department.clone();
                existing.designation = record.designation.clone();
                existing.joining_date = record.joining_date;
                existing.phone = record.phone.clone();
                existing.pan_number = record.pan_number.clone();
                existing.aadhar_number = record.aadhar_number.clone();
                existing.status = record.status;
                existing.source = "HR".to_string();
                existing.updated_at = now;
            })
            .or_insert_with(|| Employee {
                id: Uuid::new_v4(),
                employee_id: record.employee_id.clone(),
                name: record.name.clone(),
                department: record.department.clone(),
                designation: record.designation.clone(),
                email: record.email.clone(),
                joining_date: record.joining_date,
                phone: record.phone.clone(),
                pan_number: record.pan_number.clone(),
                aadhar_number: record.aadhar_number.clone(),
                photo: None,
                status: record.status,
                source: "HR".to_string(),
                created_at: now,
                updated_at: now,
            });

        Ok(employee.clone())
    }

    async fn email_taken(&self, email: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .values()
            .any(|e| e.email == email && e.employee_id != exclude_employee_id))
    }

    async fn pan_taken(&self, pan: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .values()
            .any(|e| e.pan_number.as_deref() == Some(pan) && e.employee_id != exclude_employee_id))
    }

    async fn update_status(
        &self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> Result<Option<Employee>, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        Ok(rows.get_mut(employee_id).map(|employee| {
            employee.status = status;
            employee.updated_at = Utc::now();
            employee.clone()
        }))
    }

    async fn update_fields(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Option<Employee>, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        Ok(rows.get_mut(employee_id).map(|employee| {
            if let Some(name) = &changes.name {
                employee.name = name.clone();
            }
            if let Some(department) = &changes.department {
                employee.department = department.clone();
            }
            if let Some(designation) = &changes.designation {
                employee.designation = designation.clone();
            }
            if let Some(email) = &changes.email {
                employee.email = email.clone();
            }
            if let Some(joining_date) = changes.joining_date {
                employee.joining_date = joining_date;
            }
            if let Some(phone) = &changes.phone {
                employee.phone = Some(phone.clone());
            }
            if let Some(pan) = &changes.pan_number {
                employee.pan_number = Some(pan.clone());
            }
            if let Some(aadhar) = &changes.aadhar_number {
                employee.aadhar_number = Some(aadhar.clone());
            }
            if let Some(photo) = &changes.photo {
                employee.photo = Some(photo.clone());
            }
            if let Some(status) = changes.status {
                employee.status = status;
            }
            employee.updated_at = Utc::now();
            employee.clone()
        }))
    }

    async fn delete(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError> {
        Ok(self.rows.lock().expect("lock").remove(employee_id))
    }

    async fn list_all(&self) -> Result<Vec<Employee>, DatabaseError> {
        let mut employees: Vec<_> = self.rows.lock().expect("lock").values().cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn list_by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>, DatabaseError> {
        let mut employees: Vec<_> = self
            .rows
            .lock()
            .expect("lock")
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn search(&self, query: &str) -> Result<Vec<Employee>, DatabaseError> {
        let needle = query.to_lowercase();
        let matches = |field: &str| field.to_lowercase().contains(&needle);

        let mut employees: Vec<_> = self
            .rows
            .lock()
            .expect("lock")
            .values()
            .filter(|e| {
                matches(&e.employee_id)
                    || matches(&e.name)
                    || matches(&e.email)
                    || matches(&e.department)
                    || matches(&e.designation)
                    || e.pan_number.as_deref().is_some_and(matches)
                    || e.aadhar_number.as_deref().is_some_and(matches)
            })
            .cloned()
            .collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(employees)
    }

    async fn stats(&self) -> Result<EmployeeStats, DatabaseError> {
        let rows = self.rows.lock().expect("lock");

        let mut by_department: HashMap<String, i64> = HashMap::new();
        let mut by_designation: HashMap<String, i64> = HashMap::new();
        let mut active = 0;
        for employee in rows.values() {
            if employee.status == EmployeeStatus::Active {
                active += 1;
            }
            *by_department.entry(employee.department.clone()).or_default() += 1;
            *by_designation.entry(employee.designation.clone()).or_default() += 1;
        }

        let collect = |groups: HashMap<String, i64>| {
            let mut buckets: Vec<_> = groups
                .into_iter()
                .map(|(key, count)| GroupCount { key, count })
                .collect();
            buckets.sort_by(|a, b| b.count.cmp(&a.count));
            buckets
        };

        let total = rows.len() as i64;
        Ok(EmployeeStats {
            total,
            active,
            inactive: total - active,
            by_department: collect(by_department),
            by_designation: collect(by_designation),
        })
    }

    async fn bulk_update_status(
        &self,
        employee_ids: &[String],
        status: EmployeeStatus,
    ) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        let mut modified = 0;
        for id in employee_ids {
            if let Some(employee) = rows.get_mut(id) {
                employee.status = status;
                employee.updated_at = Utc::now();
                modified += 1;
            }
        }
        Ok(modified)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn add_user(&self, email: &str, person_id: Option<&str>) {
        let now = Utc::now();
        self.rows.lock().expect("user store lock").push(User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            person_id: person_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        });
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn email_taken(&self, email: &str) -> Result<bool, DatabaseError> {
        Ok(self.rows.lock().expect("lock").iter().any(|u| u.email == email))
    }

    async fn delete_by_person_id(&self, person_id: &str) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|u| u.person_id.as_deref() != Some(person_id));
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryDesignationStore {
    rows: Mutex<HashMap<i64, Designation>>,
}

#[async_trait]
impl DesignationStore for MemoryDesignationStore {
    async fn upsert_from_hr(&self, record: &DesignationUpsert) -> Result<Designation, DatabaseError> {
        let mut rows = self.rows.lock().expect("lock");
        let now = Utc::now();

        let designation = rows
            .entry(record.designation_id)
            .and_modify(|existing| {
                existing.name = record.name.clone();
                existing.department = record.department.clone();
                existing.description = record.description.clone();
                existing.is_active = record.is_active;
                existing.source = "HR".to_string();
                existing.hr_created_at = record.hr_created_at;
                existing.updated_at = now;
            })
            .or_insert_with(|| Designation {
                id: Uuid::new_v4(),
                designation_id: record.designation_id,
                name: record.name.clone(),
                department: record.department.clone(),
                description: record.description.clone(),
                is_active: record.is_active,
                source: "HR".to_string(),
                hr_created_at: record.hr_created_at,
                created_at: now,
                updated_at: now,
            });

        Ok(designation.clone())
    }

    async fn list_all(&self) -> Result<Vec<Designation>, DatabaseError> {
        let mut designations: Vec<_> = self.rows.lock().expect("lock").values().cloned().collect();
        designations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(designations)
    }

    async fn list_active(&self) -> Result<Vec<Designation>, DatabaseError> {
        let mut designations: Vec<_> = self
            .rows
            .lock()
            .expect("lock")
            .values()
            .filter(|d| d.is_active)
            .cloned()
            .collect();
        designations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(designations)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Designation>, DatabaseError> {
        Ok(self.rows.lock().expect("lock").values().find(|d| d.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySalaryStore {
    templates: Mutex<Vec<SalaryTemplate>>,
    salaries: Mutex<HashMap<String, Salary>>,
    fail_creates: Mutex<bool>,
}

impl MemorySalaryStore {
    /// Register an active template for a designation.
    pub fn add_template(&self, designation: &str) -> SalaryTemplate {
        let now = Utc::now();
        let template = SalaryTemplate {
            id: Uuid::new_v4(),
            designation: designation.to_string(),
            basic_salary: BigDecimal::from(50_000),
            hra: BigDecimal::from(20_000),
            allowances: BigDecimal::from(10_000),
            deductions: BigDecimal::from(5_000),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.templates.lock().expect("template lock").push(template.clone());
        template
    }

    /// Make subsequent salary inserts fail, to test swallow-and-log.
    pub fn fail_creates(&self) {
        *self.fail_creates.lock().expect("lock") = true;
    }

    pub fn salary_count(&self) -> usize {
        self.salaries.lock().expect("lock").len()
    }

    pub fn salary_for(&self, employee_id: &str) -> Option<Salary> {
        self.salaries.lock().expect("lock").get(employee_id).cloned()
    }
}

#[async_trait]
impl SalaryStore for MemorySalaryStore {
    async fn active_template_for(&self, designation: &str) -> Result<Option<SalaryTemplate>, DatabaseError> {
        Ok(self
            .templates
            .lock()
            .expect("lock")
            .iter()
            .filter(|t| t.is_active && t.designation == designation)
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn create_from_template(
        &self,
        employee: &Employee,
        template: &SalaryTemplate,
    ) -> Result<Option<Salary>, DatabaseError> {
        if *self.fail_creates.lock().expect("lock") {
            return Err(store_failure());
        }

        let mut salaries = self.salaries.lock().expect("lock");
        if salaries.contains_key(&employee.employee_id) {
            return Ok(None);
        }

        let now = Utc::now();
        let salary = Salary {
            id: Uuid::new_v4(),
            employee_id: employee.employee_id.clone(),
            employee_name: employee.name.clone(),
            designation: employee.designation.clone(),
            basic_salary: template.basic_salary.clone(),
            hra: template.hra.clone(),
            allowances: template.allowances.clone(),
            deductions: template.deductions.clone(),
            template_id: Some(template.id),
            created_at: now,
            updated_at: now,
        };
        salaries.insert(employee.employee_id.clone(), salary.clone());
        Ok(Some(salary))
    }
}
