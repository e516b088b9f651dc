//! Operation model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use crate::utils::errors::BudgetBotError;

/// Kind of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Income,
    Expense,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Income => "income",
            OperationKind::Expense => "expense",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = BudgetBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(OperationKind::Income),
            "expense" => Ok(OperationKind::Expense),
            other => Err(BudgetBotError::InvalidInput(format!("Unknown operation type: {}", other))),
        }
    }
}

/// A persisted income or expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub amount: Decimal,
    pub category: String,
    pub created_at: NaiveDateTime,
}

// Amounts are stored as exact decimal text
impl<'r> FromRow<'r, SqliteRow> for Operation {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let amount: String = row.try_get("amount")?;
        let amount = Decimal::from_str(&amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            kind: row.try_get("type")?,
            amount,
            category: row.try_get("category")?,
            created_at: row.try_get("date")?,
        })
    }
}

impl Operation {
    /// Parsed operation kind
    pub fn kind(&self) -> Result<OperationKind, BudgetBotError> {
        self.kind.parse()
    }
}

/// A completed dialog ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOperation {
    pub user_id: i64,
    pub kind: OperationKind,
    pub amount: Decimal,
    pub category: String,
}

/// Running totals over a user's operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub operations: usize,
}

impl BalanceSummary {
    /// Sum operations by kind
    pub fn from_operations(operations: &[Operation]) -> Result<Self, BudgetBotError> {
        let mut summary = Self::default();
        for operation in operations {
            summary.add(operation.kind()?, operation.amount);
        }
        Ok(summary)
    }

    pub fn add(&mut self, kind: OperationKind, amount: Decimal) {
        match kind {
            OperationKind::Income => self.income += amount,
            OperationKind::Expense => self.expense += amount,
        }
        self.operations += 1;
    }

    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}
