//! Operation repository implementation

use sqlx::{SqliteConnection, SqlitePool};
use crate::models::operation::{NewOperation, Operation};
use crate::utils::errors::BudgetBotError;

const OPERATION_COLUMNS: &str = "id, user_id, type, amount, category, date";

#[derive(Clone)]
#[derive(Debug)]
pub struct OperationRepository {
    pool: SqlitePool,
}

impl OperationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a completed operation on an existing connection or transaction
    pub async fn insert_with(conn: &mut SqliteConnection, operation: &NewOperation) -> Result<Operation, BudgetBotError> {
        let query = format!(
            "INSERT INTO operations (user_id, type, amount, category) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
            OPERATION_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Operation>(&query)
            .bind(operation.user_id)
            .bind(operation.kind.as_str())
            .bind(operation.amount.to_string())
            .bind(&operation.category)
            .fetch_one(conn)
            .await?;

        Ok(inserted)
    }

    /// List all operations of a user in insertion order
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Operation>, BudgetBotError> {
        let query = format!(
            "SELECT {} FROM operations WHERE user_id = ?1 ORDER BY id",
            OPERATION_COLUMNS
        );
        let operations = sqlx::query_as::<_, Operation>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(operations)
    }

}
