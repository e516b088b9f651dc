//! User repository implementation

use sqlx::SqlitePool;
use crate::models::user::User;
use crate::utils::errors::BudgetBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the user unless a record with this id already exists.
    ///
    /// Returns `true` when a new record was created.
    pub async fn insert_if_absent(&self, id: i64, username: &str) -> Result<bool, BudgetBotError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username) VALUES (?1, ?2) ON CONFLICT(id) DO NOTHING"
        )
        .bind(id)
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find user by Telegram ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, BudgetBotError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = ?1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

}
