//! Dialog state of a single user
//! 
//! Each user walks a linear dialog: idle → amount → category → idle. The
//! state is transient and lives only in memory.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::operation::{NewOperation, OperationKind};
use crate::utils::errors::{BudgetBotError, Result};

/// Which piece of information the bot is waiting for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogStep {
    #[default]
    Idle,
    ExpenseAmount,
    ExpenseCategory,
    IncomeAmount,
    IncomeCategory,
}

impl DialogStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogStep::Idle => "idle",
            DialogStep::ExpenseAmount => "expense_amount",
            DialogStep::ExpenseCategory => "expense_category",
            DialogStep::IncomeAmount => "income_amount",
            DialogStep::IncomeCategory => "income_category",
        }
    }

    /// Step that asks for the amount of the given kind
    pub fn amount_step(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Expense => DialogStep::ExpenseAmount,
            OperationKind::Income => DialogStep::IncomeAmount,
        }
    }

    /// Step that asks for the category of the given kind
    pub fn category_step(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Expense => DialogStep::ExpenseCategory,
            OperationKind::Income => DialogStep::IncomeCategory,
        }
    }

    /// Operation kind this step belongs to, `None` for idle
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            DialogStep::Idle => None,
            DialogStep::ExpenseAmount | DialogStep::ExpenseCategory => Some(OperationKind::Expense),
            DialogStep::IncomeAmount | DialogStep::IncomeCategory => Some(OperationKind::Income),
        }
    }

    pub fn is_amount(&self) -> bool {
        matches!(self, DialogStep::ExpenseAmount | DialogStep::IncomeAmount)
    }

    pub fn is_category(&self) -> bool {
        matches!(self, DialogStep::ExpenseCategory | DialogStep::IncomeCategory)
    }
}

impl std::fmt::Display for DialogStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partially built operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub kind: Option<OperationKind>,
    pub amount: Option<Decimal>,
}

/// Dialog state of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserState {
    /// User ID this state belongs to
    pub user_id: i64,
    /// Current step
    pub step: DialogStep,
    /// Data collected so far
    pub operation: PendingOperation,
    /// When this state was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserState {
    /// Fresh idle state
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            step: DialogStep::Idle,
            operation: PendingOperation::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.step == DialogStep::Idle
    }

    /// Start collecting an operation of `kind`; only valid from idle
    pub fn begin(&mut self, kind: OperationKind) -> Result<()> {
        let next = DialogStep::amount_step(kind);
        self.ensure(self.is_idle(), next)?;

        self.operation = PendingOperation {
            kind: Some(kind),
            amount: None,
        };
        self.move_to(next);
        Ok(())
    }

    /// Store the amount and ask for the category; only valid at an amount step
    pub fn set_amount(&mut self, amount: Decimal) -> Result<()> {
        let kind = self.step.kind();
        let next = kind.map(DialogStep::category_step).unwrap_or(DialogStep::Idle);
        self.ensure(self.step.is_amount() && !amount.is_sign_negative(), next)?;

        self.operation.amount = Some(amount);
        self.move_to(next);
        Ok(())
    }

    /// Build the finished operation from the collected data; only valid at a category step.
    ///
    /// The state itself is left untouched, call [`reset`](Self::reset) once it is stored.
    pub fn complete(&self, category: &str) -> Result<NewOperation> {
        self.ensure(self.step.is_category(), DialogStep::Idle)?;

        match (self.operation.kind, self.operation.amount) {
            (Some(kind), Some(amount)) => Ok(NewOperation {
                user_id: self.user_id,
                kind,
                amount,
                category: category.to_string(),
            }),
            _ => Err(BudgetBotError::InvalidStateTransition {
                from: format!("{} (incomplete)", self.step),
                to: DialogStep::Idle.to_string(),
            }),
        }
    }

    /// Drop any collected data and return to idle
    pub fn reset(&mut self) {
        self.operation = PendingOperation::default();
        self.move_to(DialogStep::Idle);
    }

    fn move_to(&mut self, step: DialogStep) {
        self.step = step;
        self.updated_at = Utc::now();
    }

    fn ensure(&self, allowed: bool, to: DialogStep) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(BudgetBotError::InvalidStateTransition {
                from: self.step.to_string(),
                to: to.to_string(),
            })
        }
    }
}
