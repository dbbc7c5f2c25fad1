use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeeStatus};

/// Write payload for the HR employee upsert. Every tracked field is
/// overwritten on conflict; `employee_id` itself never changes.
#[derive(Debug, Clone)]
pub struct EmployeeUpsert {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub joining_date: NaiveDate,
    pub phone: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub status: EmployeeStatus,
}

/// Partial update for the admin edit path. Absent fields keep their stored
/// value, mirroring a `$set` of only the provided keys.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub photo: Option<String>,
    pub status: Option<EmployeeStatus>,
}

/// One bucket of the group-by aggregations, serialized the way the admin UI
/// consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCount {
    #[serde(rename = "_id")]
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub by_department: Vec<GroupCount>,
    pub by_designation: Vec<GroupCount>,
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError>;

    /// Atomic create-or-overwrite keyed by the external id. Concurrent first
    /// inserts for the same id are serialized by the unique constraint, so
    /// exactly one caller performs the insert and the rest update.
    async fn upsert_from_hr(&self, record: &EmployeeUpsert) -> Result<Employee, DatabaseError>;

    /// Whether any other employee already holds this (normalized) email.
    async fn email_taken(&self, email: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError>;

    /// Whether any other employee already holds this PAN.
    async fn pan_taken(&self, pan: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError>;

    /// Update-only status write; `None` when the employee does not exist.
    async fn update_status(
        &self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> Result<Option<Employee>, DatabaseError>;

    async fn update_fields(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Option<Employee>, DatabaseError>;

    /// Removes the employee, returning the deleted record when it existed.
    async fn delete(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError>;

    async fn list_all(&self) -> Result<Vec<Employee>, DatabaseError>;

    async fn list_by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>, DatabaseError>;

    /// Case-insensitive substring search across the identifying fields.
    async fn search(&self, query: &str) -> Result<Vec<Employee>, DatabaseError>;

    async fn stats(&self) -> Result<EmployeeStats, DatabaseError>;

    async fn bulk_update_status(
        &self,
        employee_ids: &[String],
        status: EmployeeStatus,
    ) -> Result<u64, DatabaseError>;
}

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn upsert_from_hr(&self, record: &EmployeeUpsert) -> Result<Employee, DatabaseError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees
                (employee_id, name, email, department, designation, joining_date,
                 phone, pan_number, aadhar_number, status, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'HR')
            ON CONFLICT (employee_id) DO UPDATE SET
                name          = EXCLUDED.name,
                email         = EXCLUDED.email,
                department    = EXCLUDED.department,
                designation   = EXCLUDED.designation,
                joining_date  = EXCLUDED.joining_date,
                phone         = EXCLUDED.phone,
                pan_number    = EXCLUDED.pan_number,
                aadhar_number = EXCLUDED.aadhar_number,
                status        = EXCLUDED.status,
                source        = EXCLUDED.source,
                updated_at    = now()
            RETURNING *
            "#,
        )
        .bind(&record.employee_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.department)
        .bind(&record.designation)
        .bind(record.joining_date)
        .bind(&record.phone)
        .bind(&record.pan_number)
        .bind(&record.aadhar_number)
        .bind(record.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn email_taken(&self, email: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1 AND employee_id <> $2)",
        )
        .bind(email)
        .bind(exclude_employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn pan_taken(&self, pan: &str, exclude_employee_id: &str) -> Result<bool, DatabaseError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE pan_number = $1 AND employee_id <> $2)",
        )
        .bind(pan)
        .bind(exclude_employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn update_status(
        &self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> Result<Option<Employee>, DatabaseError> {
        let employee = sqlx::query_as::<_, Employee>(
            "UPDATE employees SET status = $2, updated_at = now() WHERE employee_id = $1 RETURNING *",
        )
        .bind(employee_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn update_fields(
        &self,
        employee_id: &str,
        changes: &EmployeeUpdate,
    ) -> Result<Option<Employee>, DatabaseError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                name          = COALESCE($2, name),
                department    = COALESCE($3, department),
                designation   = COALESCE($4, designation),
                email         = COALESCE($5, email),
                joining_date  = COALESCE($6, joining_date),
                phone         = COALESCE($7, phone),
                pan_number    = COALESCE($8, pan_number),
                aadhar_number = COALESCE($9, aadhar_number),
                photo         = COALESCE($10, photo),
                status        = COALESCE($11, status),
                updated_at    = now()
            WHERE employee_id = $1
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(&changes.name)
        .bind(&changes.department)
        .bind(&changes.designation)
        .bind(&changes.email)
        .bind(changes.joining_date)
        .bind(&changes.phone)
        .bind(&changes.pan_number)
        .bind(&changes.aadhar_number)
        .bind(&changes.photo)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn delete(&self, employee_id: &str) -> Result<Option<Employee>, DatabaseError> {
        let employee =
            sqlx::query_as::<_, Employee>("DELETE FROM employees WHERE employee_id = $1 RETURNING *")
                .bind(employee_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(employee)
    }

    async fn list_all(&self) -> Result<Vec<Employee>, DatabaseError> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    async fn list_by_status(&self, status: EmployeeStatus) -> Result<Vec<Employee>, DatabaseError> {
        let employees =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE status = $1 ORDER BY created_at DESC")
                .bind(status)
                .fetch_all(&self.pool)
                .await?;

        Ok(employees)
    }

    async fn search(&self, query: &str) -> Result<Vec<Employee>, DatabaseError> {
        // Escape LIKE metacharacters so the user input matches literally.
        let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
        let pattern = format!("%{}%", escaped);

        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT * FROM employees
            WHERE employee_id ILIKE $1
               OR name ILIKE $1
               OR email ILIKE $1
               OR department ILIKE $1
               OR designation ILIKE $1
               OR pan_number ILIKE $1
               OR aadhar_number ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn stats(&self) -> Result<EmployeeStats, DatabaseError> {
        let (total, active, inactive) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'Active'),
                   COUNT(*) FILTER (WHERE status = 'Inactive')
            FROM employees
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let by_department = sqlx::query_as::<_, (String, i64)>(
            "SELECT department, COUNT(*) FROM employees GROUP BY department ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_designation = sqlx::query_as::<_, (String, i64)>(
            "SELECT designation, COUNT(*) FROM employees GROUP BY designation ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(EmployeeStats {
            total,
            active,
            inactive,
            by_department: by_department
                .into_iter()
                .map(|(key, count)| GroupCount { key, count })
                .collect(),
            by_designation: by_designation
                .into_iter()
                .map(|(key, count)| GroupCount { key, count })
                .collect(),
        })
    }

    async fn bulk_update_status(
        &self,
        employee_ids: &[String],
        status: EmployeeStatus,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE employees SET status = $2, updated_at = now() WHERE employee_id = ANY($1)")
            .bind(employee_ids)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
