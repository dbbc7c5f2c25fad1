use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Designation;

/// Write payload for the HR designation upsert. Every tracked field is
/// overwritten on conflict.
#[derive(Debug, Clone)]
pub struct DesignationUpsert {
    pub designation_id: i64,
    pub name: String,
    pub department: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub hr_created_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait DesignationStore: Send + Sync {
    /// Atomic create-or-overwrite keyed by the external numeric id.
    async fn upsert_from_hr(&self, record: &DesignationUpsert) -> Result<Designation, DatabaseError>;

    async fn list_all(&self) -> Result<Vec<Designation>, DatabaseError>;

    async fn list_active(&self) -> Result<Vec<Designation>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Designation>, DatabaseError>;
}

pub struct PgDesignationStore {
    pool: PgPool,
}

impl PgDesignationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DesignationStore for PgDesignationStore {
    async fn upsert_from_hr(&self, record: &DesignationUpsert) -> Result<Designation, DatabaseError> {
        let designation = sqlx::query_as::<_, Designation>(
            r#"
            INSERT INTO designations (designation_id, name, department, description, is_active, source, hr_created_at)
            VALUES ($1, $2, $3, $4, $5, 'HR', $6)
            ON CONFLICT (designation_id) DO UPDATE SET
                name          = EXCLUDED.name,
                department    = EXCLUDED.department,
                description   = EXCLUDED.description,
                is_active     = EXCLUDED.is_active,
                source        = EXCLUDED.source,
                hr_created_at = EXCLUDED.hr_created_at,
                updated_at    = now()
            RETURNING *
            "#,
        )
        .bind(record.designation_id)
        .bind(&record.name)
        .bind(&record.department)
        .bind(&record.description)
        .bind(record.is_active)
        .bind(record.hr_created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(designation)
    }

    async fn list_all(&self) -> Result<Vec<Designation>, DatabaseError> {
        let designations = sqlx::query_as::<_, Designation>("SELECT * FROM designations ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(designations)
    }

    async fn list_active(&self) -> Result<Vec<Designation>, DatabaseError> {
        let designations =
            sqlx::query_as::<_, Designation>("SELECT * FROM designations WHERE is_active ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(designations)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Designation>, DatabaseError> {
        let designation = sqlx::query_as::<_, Designation>("SELECT * FROM designations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(designation)
    }
}
