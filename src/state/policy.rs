//! Category acceptance policy
//!
//! The dialog asks a [`CategoryPolicy`] whether a typed category is accepted
//! before storing an operation. The default accepts any text verbatim.

use crate::models::operation::OperationKind;

/// Decides whether a category string is accepted and how it is stored
pub trait CategoryPolicy: Send + Sync {
    /// Return the category to store, or a human-readable rejection reason
    fn accept(&self, kind: OperationKind, category: &str) -> Result<String, String>;
}

/// Accepts every category exactly as typed
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAnyCategory;

impl CategoryPolicy for AcceptAnyCategory {
    fn accept(&self, _kind: OperationKind, category: &str) -> Result<String, String> {
        Ok(category.to_string())
    }
}
