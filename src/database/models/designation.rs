use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Designation mirrored from the HR system, keyed by its external numeric id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    pub id: Uuid,
    #[serde(rename = "DesignationId")]
    pub designation_id: i64,
    pub name: String,
    pub department: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub source: String,
    pub hr_created_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
