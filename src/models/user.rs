//! User model

use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use sqlx::FromRow;

/// A Telegram user who has pressed /start at least once
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Telegram user id
    pub id: i64,
    pub username: String,
    pub created_at: NaiveDateTime,
}
