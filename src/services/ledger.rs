//! Ledger service
//! 
//! Records operations and answers balance questions on top of the database
//! service.

use tracing::{info, debug};
use crate::database::DatabaseService;
use crate::models::operation::{BalanceSummary, NewOperation, Operation};
use crate::utils::errors::Result;
use crate::utils::logging::log_operation_recorded;

#[derive(Clone)]
pub struct LedgerService {
    database: DatabaseService,
}

impl LedgerService {
    pub fn new(database: DatabaseService) -> Self {
        Self { database }
    }

    /// Store a finished operation (and its expense category) atomically
    pub async fn record(&self, operation: &NewOperation) -> Result<Operation> {
        let stored = self.database.record_operation(operation).await?;
        log_operation_recorded(operation.user_id, operation.kind, operation.amount, &operation.category);
        Ok(stored)
    }

    /// All operations of a user
    pub async fn operations(&self, user_id: i64) -> Result<Vec<Operation>> {
        self.database.operations.list_by_user(user_id).await
    }

    /// Income and expense totals of a user
    pub async fn balance(&self, user_id: i64) -> Result<BalanceSummary> {
        let operations = self.operations(user_id).await?;
        let summary = BalanceSummary::from_operations(&operations)?;
        debug!(user_id = user_id, operations = summary.operations, "Balance calculated");
        Ok(summary)
    }

    /// Known expense categories in the order they were first used
    pub async fn expense_categories(&self) -> Result<Vec<String>> {
        self.database.categories.list_names().await
    }

    /// Make sure the configured default categories exist
    pub async fn seed_expense_categories(&self, names: &[String]) -> Result<()> {
        let created = self.database.seed_expense_categories(names).await?;
        if created > 0 {
            info!(created = created, "Seeded default expense categories");
        }
        Ok(())
    }
}
