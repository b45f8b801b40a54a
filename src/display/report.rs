//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the report renderers.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::models::Money;

/// Format a date with a user-supplied strftime pattern
///
/// Falls back to ISO format when the pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return date.to_string();
    }
    date.format(pattern).to_string()
}

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text) // Green for positive
    } else {
        text
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
