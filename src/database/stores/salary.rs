use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, Salary, SalaryTemplate};

#[async_trait]
pub trait SalaryStore: Send + Sync {
    /// Active template matching the designation name exactly, newest first.
    async fn active_template_for(&self, designation: &str) -> Result<Option<SalaryTemplate>, DatabaseError>;

    /// Derive a salary record from the template for this employee. Returns
    /// `None` when a salary already exists for the employee, making a
    /// re-triggered provisioning a skip rather than a duplicate.
    async fn create_from_template(
        &self,
        employee: &Employee,
        template: &SalaryTemplate,
    ) -> Result<Option<Salary>, DatabaseError>;
}

pub struct PgSalaryStore {
    pool: PgPool,
}

impl PgSalaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryStore for PgSalaryStore {
    async fn active_template_for(&self, designation: &str) -> Result<Option<SalaryTemplate>, DatabaseError> {
        let template = sqlx::query_as::<_, SalaryTemplate>(
            r#"
            SELECT * FROM salary_templates
            WHERE designation = $1 AND is_active
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(designation)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn create_from_template(
        &self,
        employee: &Employee,
        template: &SalaryTemplate,
    ) -> Result<Option<Salary>, DatabaseError> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            INSERT INTO salaries
                (employee_id, employee_name, designation,
                 basic_salary, hra, allowances, deductions, template_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (employee_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.designation)
        .bind(&template.basic_salary)
        .bind(&template.hra)
        .bind(&template.allowances)
        .bind(&template.deductions)
        .bind(template.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salary)
    }
}
