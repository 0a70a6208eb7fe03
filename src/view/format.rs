//! Pure display formatters for subscription fields.
//!
//! Locale and currency are fixed at compile time (ru-RU / RUB), matching the
//! page these fragments are rendered into.

use chrono::NaiveDate;

/// Grouping separator used by the ru-RU number format.
const GROUP_SEP: char = '\u{a0}';

const INTERVAL_LABELS: [(&str, &str); 2] = [("monthly", "Ежемесячно"), ("yearly", "Ежегодно")];

/// Formats a monetary amount as a ru-RU currency string, e.g. `1 234,56 ₽`.
pub fn format_amount(amount: f64) -> String {
    let sign = if amount.is_sign_negative() && amount != 0.0 {
        "-"
    } else {
        ""
    };
    // Round to kopecks first so 9.995 renders as 10,00 rather than 9,99.
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEP);
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{frac:02}{GROUP_SEP}₽")
}

/// Maps an interval code to its display label. Unknown codes pass through
/// unchanged.
pub fn format_interval(interval: &str) -> &str {
    INTERVAL_LABELS
        .iter()
        .find(|(code, _)| *code == interval)
        .map(|(_, label)| *label)
        .unwrap_or(interval)
}

/// Formats an ISO `YYYY-MM-DD` date as a ru-RU short date (`dd.mm.yyyy`).
///
/// Absent or empty input yields an empty string; anything unparseable is
/// passed through raw rather than turning into an error.
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return String::new();
    };

    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%d.%m.%Y").to_string(),
        Err(_) => date.to_string(),
    }
}
