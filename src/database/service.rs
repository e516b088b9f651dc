//! Database service layer
//! 
//! This module provides a high-level interface to database operations

use std::time::Instant;
use crate::database::{DatabasePool, UserRepository, OperationRepository, CategoryRepository};
use crate::models::*;
use crate::utils::errors::BudgetBotError;
use crate::utils::logging::log_database_operation;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub operations: OperationRepository,
    pub categories: CategoryRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            operations: OperationRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create the schema if needed. Safe to call more than once.
    pub async fn ensure_schema(&self) -> Result<(), BudgetBotError> {
        super::run_migrations(&self.pool).await
    }

    /// Check that the storage answers
    pub async fn health_check(&self) -> Result<(), BudgetBotError> {
        super::health_check(&self.pool).await
    }

    /// Store a completed operation.
    ///
    /// Expense categories are inserted into the known set in the same
    /// transaction, so either both rows land or neither does.
    pub async fn record_operation(&self, operation: &NewOperation) -> Result<Operation, BudgetBotError> {
        let started = Instant::now();
        let result = self.record_operation_in_transaction(operation).await;
        log_database_operation(
            "record_operation",
            "operations",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        result
    }

    async fn record_operation_in_transaction(&self, operation: &NewOperation) -> Result<Operation, BudgetBotError> {
        let mut tx = self.pool.begin().await?;

        let stored = OperationRepository::insert_with(&mut tx, operation).await?;
        if operation.kind == OperationKind::Expense {
            CategoryRepository::insert_if_absent_with(&mut tx, &operation.category).await?;
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// Insert-if-absent every name, returning how many were new
    pub async fn seed_expense_categories(&self, names: &[String]) -> Result<usize, BudgetBotError> {
        let mut created = 0;
        for name in names {
            if self.categories.insert_if_absent(name).await? {
                created += 1;
            }
        }
        Ok(created)
    }
}
