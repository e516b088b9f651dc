//! Logging middleware
//! 
//! This module provides logging for inbound bot messages and the time spent
//! handling them.

use std::time::Instant;
use teloxide::types::Message;
use tracing::{info, debug, warn};

/// Logging middleware for bot interactions
#[derive(Clone, Debug)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_user_interactions: bool) -> Self {
        Self { log_user_interactions }
    }

    /// Log message details
    pub fn log_message(&self, message: &Message) {
        if !self.log_user_interactions {
            return;
        }

        let user_id = message.from.as_ref().map(|user| user.id.0);
        let chat_type = if message.chat.is_private() { "private" } else { "group" };

        match message.text() {
            Some(text) => {
                debug!(user_id = ?user_id, text = %text, "Text message received");
                info!(
                    user_id = ?user_id,
                    chat_id = message.chat.id.0,
                    chat_type = chat_type,
                    message_id = message.id.0,
                    text_length = text.chars().count(),
                    "Message received"
                );
            }
            None => {
                info!(
                    user_id = ?user_id,
                    chat_id = message.chat.id.0,
                    chat_type = chat_type,
                    message_id = message.id.0,
                    "Non-text message received"
                );
            }
        }
    }

    /// Start timing a handler
    pub fn start_timer(&self) -> Instant {
        Instant::now()
    }

    /// Log how long a handler took; slow handlers are reported as warnings
    pub fn log_handled(&self, user_id: i64, started: Instant, success: bool) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms > 1000 {
            warn!(user_id = user_id, elapsed_ms = elapsed_ms, success = success, "Slow message handling");
        } else {
            debug!(user_id = user_id, elapsed_ms = elapsed_ms, success = success, "Message handled");
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true)
    }
}
