//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Placeholder shown for preferences that are not set.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the value, or "Not specified" when it is empty.
///
/// Usage in templates: `{{ preferences.gender|or_not_specified }}`
#[askama::filter_fn]
pub fn or_not_specified(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(placeholder_if_empty(&value.to_string()))
}

fn placeholder_if_empty(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        value.to_string()
    }
}
