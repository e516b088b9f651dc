//! State management module
//! 
//! This module handles the per-user dialog: the state record, its in-memory
//! storage, and the controller that drives it.

pub mod context;
pub mod dialog;
pub mod policy;
pub mod reply;
pub mod storage;

// Re-export commonly used state components
pub use context::{DialogStep, PendingOperation, UserState};
pub use dialog::DialogController;
pub use policy::{AcceptAnyCategory, CategoryPolicy};
pub use reply::{KeyboardLayout, Reply};
pub use storage::{StateStorage, StorageStats};
