//! User service implementation
//! 
//! This service handles user registration and the names users are greeted by.

use tracing::{info, debug};
use crate::database::repositories::UserRepository;
use crate::middleware::AllowList;
use crate::models::user::User;
use crate::utils::errors::{BudgetBotError, Result};

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
    allow_list: AllowList,
}

/// Outcome of a /start registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    /// Name to greet the user by
    pub display_name: String,
    /// Whether the record was created by this call
    pub created: bool,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository, allow_list: AllowList) -> Self {
        Self {
            user_repository,
            allow_list,
        }
    }

    /// Name to greet the user by
    pub fn display_name(&self, telegram_id: i64, transport_name: &str) -> String {
        self.allow_list.display_name(telegram_id, transport_name)
    }

    /// Register a new user or get the existing record.
    ///
    /// The record is created once; later calls never modify it.
    pub async fn register(&self, telegram_id: i64, transport_name: &str) -> Result<Registration> {
        debug!(telegram_id = telegram_id, "Attempting to register or get user");

        let display_name = self.display_name(telegram_id, transport_name);
        let created = self.user_repository.insert_if_absent(telegram_id, &display_name).await?;
        if created {
            info!(telegram_id = telegram_id, known = self.allow_list.is_known(telegram_id), "New user registered successfully");
        } else {
            debug!(telegram_id = telegram_id, "User already exists");
        }

        let user = self.user_repository.find_by_id(telegram_id).await?
            .ok_or(BudgetBotError::UserNotFound { user_id: telegram_id })?;

        Ok(Registration {
            user,
            display_name,
            created,
        })
    }

}
