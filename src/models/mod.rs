//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod operation;
pub mod category;

// Re-export commonly used models
pub use user::User;
pub use operation::{Operation, OperationKind, NewOperation, BalanceSummary};
pub use category::ExpenseCategory;
