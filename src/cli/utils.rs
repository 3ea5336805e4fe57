//! Shared utilities for CLI commands

use std::io::{self, BufRead, Write};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tabled::{Table, settings::Style};

use crate::controllers::{Confirm, FieldName, RemoteCollection};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Display text for an optional cell
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
        .ok_or_else(|| format!("invalid date '{}': expected YYYY-MM-DD or RFC 3339", s))
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

/// `Page 2 of 5 (43 total)` line printed under list tables
pub fn page_footer<T, S, K>(collection: &RemoteCollection<T, S, K>) -> String
where
    T: DeserializeOwned,
    S: FieldName,
    K: FieldName,
{
    let pagination = collection.pagination();
    format!(
        "Page {} of {} ({} total)",
        pagination.page(),
        pagination.total_pages(),
        collection.total_elements()
    )
}

/// Asks on stderr and reads the answer from stdin. Only `y`/`yes` agree.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
