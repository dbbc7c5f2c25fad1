use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Compensation template maintained by the payroll module, matched to
/// employees by exact designation name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTemplate {
    pub id: Uuid,
    pub designation: String,
    pub basic_salary: BigDecimal,
    pub hra: BigDecimal,
    pub allowances: BigDecimal,
    pub deductions: BigDecimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Salary record derived from a template at employee creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    pub designation: String,
    pub basic_salary: BigDecimal,
    pub hra: BigDecimal,
    pub allowances: BigDecimal,
    pub deductions: BigDecimal,
    pub template_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
