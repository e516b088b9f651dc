//! In-memory state storage
//! 
//! Keeps one [`UserState`] per user id. State is not persisted and is lost on
//! restart, which only drops an in-progress entry.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use super::context::{DialogStep, UserState};

/// Shared map from user id to dialog state
#[derive(Clone, Default)]
pub struct StateStorage {
    states: Arc<Mutex<HashMap<i64, UserState>>>,
}

impl StateStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the state of a user, creating an idle one on first contact
    pub async fn load_or_create(&self, user_id: i64) -> UserState {
        let mut states = self.states.lock().await;
        states
            .entry(user_id)
            .or_insert_with(|| {
                debug!(user_id = user_id, "Creating dialog state on first contact");
                UserState::new(user_id)
            })
            .clone()
    }

    /// Load the state of a user without creating it
    pub async fn load(&self, user_id: i64) -> Option<UserState> {
        self.states.lock().await.get(&user_id).cloned()
    }

    /// Store the state, replacing any previous one for the same user
    pub async fn save(&self, state: UserState) {
        debug!(user_id = state.user_id, step = %state.step, "Saving dialog state");
        self.states.lock().await.insert(state.user_id, state);
    }

    /// Current step of a user, idle when unknown
    pub async fn step(&self, user_id: i64) -> DialogStep {
        self.load(user_id)
            .await
            .map(|state| state.step)
            .unwrap_or_default()
    }

    /// Get storage statistics
    pub async fn stats(&self) -> StorageStats {
        let states = self.states.lock().await;
        StorageStats {
            tracked_users: states.len(),
            in_progress: states.values().filter(|state| !state.is_idle()).count(),
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    pub tracked_users: usize,
    pub in_progress: usize,
}
