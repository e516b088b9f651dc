//! Helper functions and utilities
//! 
//! Amount parsing and formatting shared by the dialog and the analytics reply.

use std::str::FromStr;
use rust_decimal::Decimal;
use crate::utils::errors::{BudgetBotError, Result};

/// Parse a user-typed amount.
///
/// Accepts ASCII digits with at most one decimal separator, either `.` or `,`.
/// Signs, exponents, grouping and anything else are rejected.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let text = input.trim();
    let invalid = || BudgetBotError::InvalidAmount(input.to_string());

    let mut separators = 0;
    let mut digits = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' | ',' => separators += 1,
            _ => return Err(invalid()),
        }
    }
    if digits == 0 || separators > 1 {
        return Err(invalid());
    }

    let mut normalized = text.replace(',', ".");
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if normalized.ends_with('.') {
        normalized.push('0');
    }

    Decimal::from_str(&normalized).map_err(|_| invalid())
}

/// Format an amount for display, without trailing zeros
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Split labels into rows of at most `columns` entries
pub fn chunk_labels(labels: &[String], columns: usize) -> Vec<Vec<String>> {
    labels
        .chunks(columns.max(1))
        .map(|row| row.to_vec())
        .collect()
}
