//! Presentation-only formatting helpers. No business semantics live here.

use chrono::{DateTime, Utc};

/// Format a money amount with the currency symbol, rounded half-up to two
/// decimal places.
///
/// # Examples
/// ```
/// use contracts::format::format_money;
/// assert_eq!(format_money(61100.0), "$61100.00");
/// assert_eq!(format_money(9.996), "$10.00");
/// ```
pub fn format_money(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("${:.2}", rounded)
}

/// Format a timestamp the way the forms display it: `DD/MM/YYYY, HH.MM.SS`.
pub fn format_ui_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y, %H.%M.%S").to_string()
}
