//! Calendar helpers: day-first date parsing, month labels and the
//! "next month" period used for the spending recommendation.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Month names ───────────────────────────────────────────────────────────────

/// English month names, indexed by `month0`.
pub const MONTH_NAMES: [&str; 12] = [
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

/// English name of the month `date` falls in, independent of the host locale.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

// ── Day-first parsing ─────────────────────────────────────────────────────────

/// Day-first layouts with a four digit year, tried in order.
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Day-first layouts with a two digit year (`31/01/24`).
const DAY_FIRST_SHORT_YEAR_FORMATS: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

/// Unambiguous ISO layouts. A year-first string is never read day-first.
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const ISO_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date written day-first (e.g. `31/01/2024`).
///
/// ISO dates (`2024-01-31`), optionally followed by a time of day, are also
/// accepted since that is how the canonical table writes dates back out.
/// Returns `None` for empty or unparseable input.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ledger_core::calendar::parse_day_first;
///
/// assert_eq!(parse_day_first("05/02/2024"), NaiveDate::from_ymd_opt(2024, 2, 5));
/// assert_eq!(parse_day_first("2024-02-05"), NaiveDate::from_ymd_opt(2024, 2, 5));
/// assert_eq!(parse_day_first("31/02/2024"), None);
/// ```
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let year_first = s.len() >= 5 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    if year_first {
        return ISO_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                ISO_DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            });
    }

    // chrono's `%Y` happily reads "24" as the year 24, so pick the layout
    // family from the width of the trailing year component.
    let year_digits = s
        .rsplit(|c: char| c == '/' || c == '-' || c == '.')
        .next()
        .map(str::len)
        .unwrap_or(0);
    let formats = if year_digits == 2 {
        DAY_FIRST_SHORT_YEAR_FORMATS
    } else {
        DAY_FIRST_FORMATS
    };

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

// ── Budget period ─────────────────────────────────────────────────────────────

/// A calendar month in a specific year, e.g. "January 2025".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    /// English month name.
    pub month: String,
    pub year: i32,
}

impl BudgetPeriod {
    /// The calendar month immediately after the one `date` falls in.
    ///
    /// December rolls over into January of the following year.
    pub fn following(date: NaiveDate) -> Self {
        let (month0, year) = if date.month() == 12 {
            (0, date.year() + 1)
        } else {
            (date.month0() + 1, date.year())
        };
        Self {
            month: MONTH_NAMES[month0 as usize].to_string(),
            year,
        }
    }

    /// Human readable label, e.g. `"January 2025"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
