//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod operation;
pub mod category;

// Re-export repositories
pub use user::UserRepository;
pub use operation::OperationRepository;
pub use category::CategoryRepository;
