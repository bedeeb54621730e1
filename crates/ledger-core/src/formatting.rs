//! Number, money and percentage formatting for rendered metrics.

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use ledger_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 2), "1,234.50");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // "-0.00" reads badly; only keep the sign when something non-zero survives.
    if negative && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a monetary amount with two decimal places, thousands separators and
/// the given currency symbol in front.
///
/// # Examples
///
/// ```
/// use ledger_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56, "₹"), "₹1,234.56");
/// assert_eq!(format_currency(0.0, "$"), "$0.00");
/// assert_eq!(format_currency(-9.99, "₹"), "-₹9.99");
/// ```
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let body = format_number(amount.abs(), 2);
    if amount < 0.0 && body != "0.00" {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Format a percent change with an explicit sign, e.g. `"+50.00%"`.
///
/// # Examples
///
/// ```
/// use ledger_core::formatting::format_percent;
///
/// assert_eq!(format_percent(50.0), "+50.00%");
/// assert_eq!(format_percent(-20.0), "-20.00%");
/// assert_eq!(format_percent(0.0), "0.00%");
/// ```
pub fn format_percent(value: f64) -> String {
    let body = format_number(value, 2);
    if value > 0.0 && body != "0.00" {
        format!("+{body}%")
    } else {
        format!("{body}%")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ──────────────────────────────────────────────────────────────────────
