//! Test database helper utilities
//!
//! Every test gets its own in-memory SQLite database with the schema applied.

use std::sync::Once;
use family_budget_bot::database::{create_pool, run_migrations, DatabaseConfig, DatabasePool, DatabaseService};
use family_budget_bot::utils::errors::BudgetBotError;

static INIT: Once = Once::new();

/// Test database backed by a single in-memory SQLite connection
pub struct TestDatabase {
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Create a new test database instance
    pub async fn new() -> Result<Self, BudgetBotError> {
        Self::new_with_migrations(true).await
    }

    /// Create a new test database instance with optional migrations
    pub async fn new_with_migrations(migrate: bool) -> Result<Self, BudgetBotError> {
        // Initialize logging once
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        // One connection that never expires keeps the in-memory database alive
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config).await?;

        if migrate {
            run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Database service over this pool
    pub fn service(&self) -> DatabaseService {
        DatabaseService::new(self.pool.clone())
    }

    /// Count rows in a table
    pub async fn count_records(&self, table: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Names of the application tables
    pub async fn table_names(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'operations', 'expense_categories') ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
