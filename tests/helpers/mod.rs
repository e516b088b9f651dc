//! Test helpers module
//!
//! This module provides utilities and helpers for testing the budget bot:
//! an in-memory database, a context wiring the services and the dialog
//! together, and fixture data.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;
