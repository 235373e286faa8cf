//! Display formatting for the dashboard.
//!
//! Currency formatting lives on [`Money`](crate::Money)'s `Display` impl.

use chrono::{DateTime, Utc};

/// Formats a timestamp as a short US date, e.g. `Jan 15, 2024`
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
