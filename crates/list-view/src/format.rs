//! Display Formatters
//!
//! en-US formatting for dates, currency and phone numbers, plus the input
//! validators used before writes. All functions are pure.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

/// Returned for missing or zero amounts
pub const EMPTY_CURRENCY: &str = "$0.00";

/// Parse the date and datetime shapes the backend emits.
///
/// Timestamps keep their own wall-clock time; no conversion to local time happens.
fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `2024-01-05` -> `Jan 5, 2024`. Empty input gives `""`; unparseable input is returned as is.
pub fn format_date(input: Option<&str>) -> String {
    match input.map(str::trim) {
        None | Some("") => String::new(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// `2024-01-05T14:30:00Z` -> `Jan 5, 2024, 02:30 PM`.
pub fn format_datetime(input: Option<&str>) -> String {
    match input.map(str::trim) {
        None | Some("") => String::new(),
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%b %-d, %Y, %I:%M %p").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// USD with thousands separators; `None`, zero and non-finite values give `$0.00`.
pub fn format_currency(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => return EMPTY_CURRENCY.to_string(),
    };

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.001 rounds to 0.00 and must not keep its sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Currency from a JSON value; DRF sends decimals as strings (`"150.00"`).
pub fn format_currency_value(value: Option<&Value>) -> String {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_currency(s),
        _ => None,
    };
    format_currency(amount)
}

/// Read back an amount, accepting formatted output (`-$1,234.50`).
pub fn parse_currency(input: &str) -> Option<f64> {
    let cleaned: String = input.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// `5551234567` -> `(555) 123-4567`, `15551234567` -> `+1 (555) 123-4567`; other lengths unchanged.
pub fn format_phone(input: Option<&str>) -> String {
    let raw = match input {
        None | Some("") => return String::new(),
        Some(raw) => raw,
    };
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..]),
        _ => raw.to_string(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
        .is_match(email)
}

/// Checks the digits of `phone` only, so punctuation is tolerated.
pub fn is_valid_phone(phone: &str) -> bool {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    PHONE
        .get_or_init(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"))
        .is_match(&digits)
}
