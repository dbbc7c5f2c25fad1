use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether any user account holds this (normalized) email.
    async fn email_taken(&self, email: &str) -> Result<bool, DatabaseError>;

    /// Remove the account linked to a deleted employee, if one exists.
    async fn delete_by_person_id(&self, person_id: &str) -> Result<u64, DatabaseError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn email_taken(&self, email: &str) -> Result<bool, DatabaseError> {
        let taken = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(taken)
    }

    async fn delete_by_person_id(&self, person_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE person_id = $1")
            .bind(person_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
