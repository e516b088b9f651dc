//! Reply keyboard rendering

use teloxide::{prelude::*, types::{ChatId, KeyboardButton, KeyboardMarkup}};
use crate::state::{KeyboardLayout, Reply};
use crate::utils::errors::{BudgetBotError, Result};

/// Build a resized reply keyboard from a layout
pub fn reply_keyboard(layout: &KeyboardLayout) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = layout
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Send a dialog reply to a chat
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<Message> {
    let request = bot.send_message(chat_id, reply.text);
    let message = match reply.keyboard {
        Some(layout) => request.reply_markup(reply_keyboard(&layout)).await?,
        None => request.await?,
    };
    Ok(message)
}

/// Replies produced for one update, plus the error that cut it short
#[derive(Debug)]
pub struct Handled {
    pub replies: Vec<Reply>,
    pub error: Option<BudgetBotError>,
}

impl Handled {
    pub fn replies(replies: Vec<Reply>) -> Self {
        Self { replies, error: None }
    }

    pub fn reply(reply: Reply) -> Self {
        Self::replies(vec![reply])
    }

    /// A user-facing notice for a failure that is still reported upstream
    pub fn failed(reply: Reply, error: BudgetBotError) -> Self {
        Self { replies: vec![reply], error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Send every reply in order, then hand back the error if there was one
    pub async fn send(self, bot: &Bot, chat_id: ChatId) -> Result<()> {
        for reply in self.replies {
            send_reply(bot, chat_id, reply).await?;
        }

        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_keyboard_keeps_rows() {
        let labels: Vec<String> = ["Salary", "Gift", "Other"].iter().map(|s| s.to_string()).collect();
        let markup = reply_keyboard(&KeyboardLayout::grid(&labels, 2));

        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0].len(), 2);
        assert_eq!(markup.keyboard[1][0].text, "Other");
        assert!(markup.resize_keyboard);
    }

    #[test]
    fn test_failed_outcome_keeps_notice_and_error() {
        let handled = Handled::failed(Reply::text("oops"), BudgetBotError::InvalidInput("x".to_string()));
        assert!(!handled.is_ok());
        assert_eq!(handled.replies, vec![Reply::text("oops")]);

        assert!(Handled::reply(Reply::text("ok")).is_ok());
    }
}
