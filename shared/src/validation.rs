//! Input validation functions
//!
//! Range checks on request types use the `validator` derive macros
//! (see [`crate::types`]). This module holds the checks that span several
//! fields or need normalization first.

use chrono::{DateTime, Duration, Utc};

/// Longest accepted food search query, in characters
pub const MAX_SEARCH_QUERY_CHARS: usize = 100;

/// Validate a sleep window: wake after bed, at most 24 hours
pub fn validate_sleep_window(bed_time: DateTime<Utc>, wake_time: DateTime<Utc>) -> Result<(), String> {
    if wake_time <= bed_time {
        return Err("Wake time must be after bed time".to_string());
    }
    if wake_time - bed_time > Duration::hours(24) {
        return Err("Sleep window cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate a food search query and return it trimmed
pub fn validate_search_query(query: &str) -> Result<&str, String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err("Search query cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_SEARCH_QUERY_CHARS {
        return Err(format!(
            "Search query must be at most {} characters",
            MAX_SEARCH_QUERY_CHARS
        ));
    }
    Ok(trimmed)
}

/// Clamp an optional list limit into `1..=max`, using `default` when absent
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}
