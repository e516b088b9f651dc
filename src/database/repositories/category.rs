//! Expense category repository implementation

use sqlx::{SqliteConnection, SqlitePool};
use crate::models::category::ExpenseCategory;
use crate::utils::errors::BudgetBotError;

#[derive(Clone)]
#[derive(Debug)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a category name unless it is already known.
    ///
    /// Returns `true` when a new row was created.
    pub async fn insert_if_absent(&self, name: &str) -> Result<bool, BudgetBotError> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_if_absent_with(&mut conn, name).await
    }

    /// Same as [`insert_if_absent`](Self::insert_if_absent) on an existing connection or transaction
    pub async fn insert_if_absent_with(conn: &mut SqliteConnection, name: &str) -> Result<bool, BudgetBotError> {
        let result = sqlx::query(
            "INSERT INTO expense_categories (name) VALUES (?1) ON CONFLICT(name) DO NOTHING"
        )
        .bind(name)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All known categories in insertion order
    pub async fn list(&self) -> Result<Vec<ExpenseCategory>, BudgetBotError> {
        let categories = sqlx::query_as::<_, ExpenseCategory>(
            "SELECT id, name FROM expense_categories ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// All known category names in insertion order
    pub async fn list_names(&self) -> Result<Vec<String>, BudgetBotError> {
        Ok(self.list().await?.into_iter().map(|category| category.name).collect())
    }
}
