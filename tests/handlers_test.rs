//! Integration tests for the replies the handlers send back

mod helpers;

use assert_matches::assert_matches;
use family_budget_bot::handlers::{start_replies, text_replies, Handled};
use family_budget_bot::state::{DialogStep, Reply};
use family_budget_bot::utils::errors::BudgetBotError;
use helpers::*;

async fn unregistered_context() -> TestContext {
    TestContext::new_with_config(TestConfig {
        register_known_users: false,
        ..TestConfig::default()
    })
    .await
    .expect("Failed to create test context")
}

async fn text(ctx: &TestContext, user_id: i64, text: &str) -> Handled {
    text_replies(&ctx.services, &ctx.controller, &ctx.i18n, user_id, "Гость", text).await
}

async fn drop_table(ctx: &TestContext, table: &str) {
    sqlx::query(&format!("DROP TABLE {}", table))
        .execute(&ctx.database.pool)
        .await
        .expect("Table should drop");
}

#[tokio::test]
async fn test_user_without_start_finishes_an_entry() {
    let ctx = unregistered_context().await;

    for message in [ADD_EXPENSE, "250"] {
        assert!(text(&ctx, STRANGER_ID, message).await.is_ok());
    }
    let handled = text(&ctx, STRANGER_ID, "Еда").await;

    assert!(handled.is_ok());
    assert_eq!(handled.replies.len(), 1);
    assert!(handled.replies[0].text.contains("250"));
    assert_eq!(ctx.database.count_records("users").await.unwrap(), 1);
    assert_eq!(ctx.database.count_records("operations").await.unwrap(), 1);
}

#[tokio::test]
async fn test_failed_analytics_gets_generic_notice() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    drop_table(&ctx, "operations").await;

    let handled = text(&ctx, FIRST_USER_ID, ANALYTICS).await;

    assert_eq!(handled.replies, vec![Reply::text(ctx.t("errors.generic"))]);
    assert_matches!(handled.error, Some(BudgetBotError::Database(_)));
    assert_eq!(ctx.step(FIRST_USER_ID).await, DialogStep::Idle);
}

#[tokio::test]
async fn test_failed_category_prompt_gets_generic_notice() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    assert!(text(&ctx, FIRST_USER_ID, ADD_EXPENSE).await.is_ok());
    drop_table(&ctx, "expense_categories").await;

    let handled = text(&ctx, FIRST_USER_ID, "10").await;

    assert_eq!(handled.replies, vec![Reply::text(ctx.t("errors.generic"))]);
    assert!(handled.error.as_ref().is_some_and(BudgetBotError::is_storage_error));
    assert_eq!(ctx.step(FIRST_USER_ID).await, DialogStep::ExpenseAmount);
}

#[tokio::test]
async fn test_failed_write_gets_save_failed_notice() {
    let ctx = TestContext::new().await.expect("Failed to create test context");
    for message in [ADD_EXPENSE, "10"] {
        assert!(text(&ctx, FIRST_USER_ID, message).await.is_ok());
    }
    drop_table(&ctx, "operations").await;

    let handled = text(&ctx, FIRST_USER_ID, "Еда").await;

    assert_eq!(handled.replies, vec![Reply::text(ctx.t("dialog.save_failed"))]);
    assert_matches!(handled.error, Some(BudgetBotError::Database(_)));
    assert_eq!(ctx.step(FIRST_USER_ID).await, DialogStep::ExpenseCategory);
}

#[tokio::test]
async fn test_failed_registration_still_answers() {
    let ctx = unregistered_context().await;
    drop_table(&ctx, "users").await;

    let handled = text(&ctx, STRANGER_ID, ADD_EXPENSE).await;
    assert_eq!(handled.replies, vec![Reply::text(ctx.t("errors.generic"))]);
    assert_matches!(handled.error, Some(BudgetBotError::Database(_)));
    assert_eq!(ctx.step(STRANGER_ID).await, DialogStep::Idle);

    let handled = start_replies(&ctx.services, &ctx.controller, &ctx.i18n, STRANGER_ID, "Гость").await;
    assert_eq!(handled.replies, vec![Reply::text(ctx.t("errors.generic"))]);
    assert!(!handled.is_ok());
}

#[tokio::test]
async fn test_start_greets_then_shows_menu() {
    let ctx = unregistered_context().await;

    let handled = start_replies(&ctx.services, &ctx.controller, &ctx.i18n, FIRST_USER_ID, "Arseny T.").await;

    assert!(handled.is_ok());
    assert_eq!(
        handled.replies,
        vec![
            Reply::text("Привет, ARSENY!"),
            Reply::with_keyboard(ctx.t("menu.title"), ctx.controller.main_menu()),
        ]
    );
}

#[tokio::test]
async fn test_repeated_start_registers_once() {
    let ctx = unregistered_context().await;

    for _ in 0..3 {
        let handled = start_replies(&ctx.services, &ctx.controller, &ctx.i18n, STRANGER_ID, "Гость").await;
        assert!(handled.is_ok());
        assert_eq!(handled.replies[0].text, "Привет, Гость!");
    }

    assert_eq!(ctx.database.count_records("users").await.unwrap(), 1);
}
