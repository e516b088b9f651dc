//! Services module
//!
//! This module contains business logic services

pub mod ledger;
pub mod user;

// Re-export commonly used services
pub use ledger::LedgerService;
pub use user::{Registration, UserService};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::AllowList;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub ledger_service: LedgerService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Self {
        let allow_list = AllowList::new(&settings.known_users);
        let user_service = UserService::new(database.users.clone(), allow_list);
        let ledger_service = LedgerService::new(database);

        Self {
            user_service,
            ledger_service,
        }
    }
}
