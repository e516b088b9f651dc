//! Dialog controller
//!
//! Interprets a user's text against their current [`DialogStep`], moves the
//! state along and talks to the ledger when an entry is complete.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::i18n::{I18n, TranslationParams};
use crate::models::operation::OperationKind;
use crate::services::LedgerService;
use crate::utils::errors::{BudgetBotError, Result};
use crate::utils::helpers::{format_amount, parse_amount};
use crate::utils::logging::log_user_action;
use super::context::{DialogStep, UserState};
use super::policy::{AcceptAnyCategory, CategoryPolicy};
use super::reply::{KeyboardLayout, Reply};
use super::storage::StateStorage;

/// Columns of the income category keyboard
const INCOME_KEYBOARD_COLUMNS: usize = 2;

/// Main menu command recognized from idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    AddExpense,
    AddIncome,
    Analytics,
}

#[derive(Clone)]
pub struct DialogController {
    storage: StateStorage,
    ledger: LedgerService,
    i18n: Arc<I18n>,
    policy: Arc<dyn CategoryPolicy>,
}

impl DialogController {
    pub fn new(storage: StateStorage, ledger: LedgerService, i18n: Arc<I18n>) -> Self {
        Self {
            storage,
            ledger,
            i18n,
            policy: Arc::new(AcceptAnyCategory),
        }
    }

    /// Replace the category acceptance policy
    pub fn with_policy(mut self, policy: Arc<dyn CategoryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Current step of a user
    pub async fn step(&self, user_id: i64) -> DialogStep {
        self.storage.step(user_id).await
    }

    /// Main menu keyboard, one command per row
    pub fn main_menu(&self) -> KeyboardLayout {
        KeyboardLayout::column(&[
            self.i18n.t("menu.add_expense", None),
            self.i18n.t("menu.add_income", None),
            self.i18n.t("menu.analytics", None),
        ])
    }

    /// Reply with the main menu attached
    pub fn menu_reply(&self, text: impl Into<String>) -> Reply {
        Reply::with_keyboard(text, self.main_menu())
    }

    /// Handle one text message from a user.
    ///
    /// The new state is saved only when handling succeeds, so a failed write
    /// leaves the user at the same step and re-sending retries it.
    pub async fn handle(&self, user_id: i64, text: &str) -> Result<Reply> {
        let mut state = self.storage.load_or_create(user_id).await;
        let step = state.step;
        debug!(user_id = user_id, step = %step, "Handling dialog message");

        let reply = match step {
            DialogStep::Idle => self.handle_idle(&mut state, text).await?,
            DialogStep::ExpenseAmount | DialogStep::IncomeAmount => self.handle_amount(&mut state, text).await?,
            DialogStep::ExpenseCategory | DialogStep::IncomeCategory => self.handle_category(&mut state, text).await?,
        };

        if state.step != step {
            debug!(user_id = user_id, from = %step, to = %state.step, "Dialog step changed");
        }
        self.storage.save(state).await;
        Ok(reply)
    }

    /// Abandon the entry in progress and return to idle
    pub async fn cancel(&self, user_id: i64) -> Reply {
        let mut state = self.storage.load_or_create(user_id).await;
        if state.is_idle() {
            return self.menu_reply(self.i18n.t("commands.cancel.nothing_to_cancel", None));
        }

        log_user_action(user_id, "cancel", Some(state.step.as_str()));
        state.reset();
        self.storage.save(state).await;
        self.menu_reply(self.i18n.t("commands.cancel.cancelled", None))
    }

    async fn handle_idle(&self, state: &mut UserState, text: &str) -> Result<Reply> {
        match self.parse_menu_command(text) {
            Some(MenuCommand::AddExpense) => {
                state.begin(OperationKind::Expense)?;
                Ok(Reply::text(self.i18n.t("dialog.expense_amount", None)))
            }
            Some(MenuCommand::AddIncome) => {
                state.begin(OperationKind::Income)?;
                Ok(Reply::text(self.i18n.t("dialog.income_amount", None)))
            }
            Some(MenuCommand::Analytics) => self.analytics(state.user_id).await,
            None => Ok(self.menu_reply(self.i18n.t("menu.choose_command", None))),
        }
    }

    async fn handle_amount(&self, state: &mut UserState, text: &str) -> Result<Reply> {
        let amount = match parse_amount(text) {
            Ok(amount) => amount,
            Err(BudgetBotError::InvalidAmount(input)) => {
                debug!(user_id = state.user_id, input = %input, "Rejected amount");
                return Ok(Reply::text(self.i18n.t("dialog.invalid_amount", None)));
            }
            Err(e) => return Err(e),
        };

        state.set_amount(amount)?;
        match state.step {
            DialogStep::ExpenseCategory => self.expense_category_prompt().await,
            DialogStep::IncomeCategory => Ok(Reply::with_keyboard(
                self.i18n.t("dialog.income_category", None),
                KeyboardLayout::grid(&self.i18n.list("categories.income"), INCOME_KEYBOARD_COLUMNS),
            )),
            step @ (DialogStep::Idle | DialogStep::ExpenseAmount | DialogStep::IncomeAmount) => {
                Err(BudgetBotError::InvalidStateTransition {
                    from: step.to_string(),
                    to: "category".to_string(),
                })
            }
        }
    }

    async fn expense_category_prompt(&self) -> Result<Reply> {
        let categories = self.ledger.expense_categories().await?;
        if categories.is_empty() {
            return Ok(Reply::text(self.i18n.t("dialog.expense_category_free_text", None)));
        }

        Ok(Reply::with_keyboard(
            self.i18n.t("dialog.expense_category", None),
            KeyboardLayout::column(&categories),
        ))
    }

    async fn handle_category(&self, state: &mut UserState, text: &str) -> Result<Reply> {
        let kind = state.step.kind().ok_or_else(|| BudgetBotError::InvalidStateTransition {
            from: state.step.to_string(),
            to: DialogStep::Idle.to_string(),
        })?;

        let category = match self.policy.accept(kind, text) {
            Ok(category) => category,
            Err(reason) => {
                warn!(user_id = state.user_id, reason = %reason, "Category rejected by policy");
                return Ok(Reply::text(self.i18n.t_with("dialog.category_rejected", "reason", reason)));
            }
        };

        let operation = state.complete(&category)?;
        self.ledger.record(&operation).await?;
        state.reset();

        let mut params = TranslationParams::new();
        params.insert("amount".to_string(), format_amount(operation.amount));
        params.insert("category".to_string(), operation.category);
        let key = match kind {
            OperationKind::Expense => "dialog.expense_added",
            OperationKind::Income => "dialog.income_added",
        };
        Ok(self.menu_reply(self.i18n.t(key, Some(&params))))
    }

    async fn analytics(&self, user_id: i64) -> Result<Reply> {
        let summary = self.ledger.balance(user_id).await?;
        info!(user_id = user_id, operations = summary.operations, "Analytics requested");

        let mut params = TranslationParams::new();
        params.insert("income".to_string(), format_amount(summary.income));
        params.insert("expense".to_string(), format_amount(summary.expense));
        params.insert("balance".to_string(), format_amount(summary.balance()));

        let text = format!(
            "{}\n{}",
            self.i18n.t("analytics.summary", Some(&params)),
            self.i18n.tp("analytics.operations", summary.operations as i64, None),
        );
        Ok(Reply::text(text))
    }

    fn parse_menu_command(&self, text: &str) -> Option<MenuCommand> {
        [
            ("menu.add_expense", MenuCommand::AddExpense),
            ("menu.add_income", MenuCommand::AddIncome),
            ("menu.analytics", MenuCommand::Analytics),
        ]
        .into_iter()
        .find(|(key, _)| self.i18n.t(key, None) == text)
        .map(|(_, command)| command)
    }
}
