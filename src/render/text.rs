// File: src/render/text.rs
// Human-readable strings embedded in the image
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipStyle {
    /// `3 contributions on March 5th`
    #[default]
    Ordinal,
    /// `2024-03-05: 3 contributions`
    DatePrefixed,
}

/// Escapes the markup-reserved characters for text and attribute positions.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `1 contribution`, otherwise `N contributions`.
pub fn pluralize(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Full month name for 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Three-letter label for 1..=12.
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    month_name(month).map(|m| &m[..3])
}

/// Unescaped tooltip text. An `Ordinal` style with a date that does not
/// parse as `YYYY-MM-DD` falls back to the date-prefixed form.
pub fn tooltip(date: &str, count: u32, style: TooltipStyle) -> String {
    let contributions = pluralize(count, "contribution");
    if style == TooltipStyle::Ordinal
        && let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        && let Some(month) = month_name(parsed.month())
    {
        return format!("{} on {} {}", contributions, month, ordinal(parsed.day()));
    }
    format!("{}: {}", date, contributions)
}

pub fn summary(total: u32) -> String {
    format!("{} in the last year", pluralize(total, "contribution"))
}
