//! Allow-list of known users
//! 
//! The bot serves anyone who writes to it; the allow-list only decides
//! which name a known user is greeted by.

use std::collections::HashMap;
use tracing::debug;
use crate::config::KnownUser;

/// Known user ids mapped to their display names
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    known_users: HashMap<i64, String>,
}

impl AllowList {
    /// Create a new AllowList from configured users
    pub fn new(known_users: &[KnownUser]) -> Self {
        let known_users = known_users
            .iter()
            .map(|user| (user.id, user.name.clone()))
            .collect();

        Self { known_users }
    }

    /// Check if user is on the allow-list
    pub fn is_known(&self, user_id: i64) -> bool {
        self.known_users.contains_key(&user_id)
    }

    /// Name to greet the user by: the configured name for known users,
    /// otherwise whatever the transport provided
    pub fn display_name(&self, user_id: i64, transport_name: &str) -> String {
        match self.known_users.get(&user_id) {
            Some(name) => {
                debug!(user_id = user_id, "Known user, using configured name");
                name.clone()
            }
            None => transport_name.to_string(),
        }
    }
}
