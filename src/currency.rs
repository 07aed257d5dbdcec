//! Currency display formatting.
//!
//! Amounts are rendered with en-US conventions: the currency symbol
//! goes in front, thousands are grouped with `,` and negatives carry a
//! leading `-`.  Rounding is half away from zero and is applied to the
//! shortest decimal form of the amount, so `1.005` shows as `1.01`
//! rather than whatever the nearest binary float happens to round to.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const NO_BREAK_SPACE: char = '\u{a0}';

/// en-US display symbol for a currency code, if it has one.
fn symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "MXN" => "MX$",
        "HKD" => "HK$",
        "TWD" => "NT$",
        "BRL" => "R$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "PHP" => "₱",
        _ => return None,
    };
    Some(symbol)
}

/// Number of minor-unit digits shown for a currency.
fn minor_units(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" | "PYG" | "XAF" | "XOF" => 0,
        "KWD" | "BHD" | "JOD" | "OMR" | "TND" | "IQD" | "LYD" => 3,
        _ => 2,
    }
}

/// Formats `amount` in `currency` for display, e.g. `1234.5` in `"USD"`
/// becomes `"$1,234.50"`.
///
/// Unknown codes are shown as the upper-cased code followed by a
/// non-breaking space (`"XYZ 1,234.50"`).  The result only depends on the
/// two arguments.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let prefix = match symbol(&code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{code}{NO_BREAK_SPACE}"),
    };

    if amount.is_nan() {
        return format!("{prefix}NaN");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{prefix}∞");
    }

    let digits = minor_units(&code);
    let magnitude = format_magnitude(amount.abs(), digits);
    let is_zero = magnitude.bytes().all(|b| matches!(b, b'0' | b'.' | b','));
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}{prefix}{magnitude}")
}

/// Renders a non-negative amount with `digits` decimals and grouped
/// thousands.
fn format_magnitude(amount: f64, digits: u32) -> String {
    // `Display` for f64 gives the shortest round-tripping decimal and never
    // uses exponent notation.
    let decimal = Decimal::from_str(&amount.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(amount));

    let fixed = match decimal {
        Some(decimal) => {
            let rounded =
                decimal.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", digits as usize, rounded)
        }
        // Beyond the range of `Decimal`; rounding no longer affects the
        // integer digits at this size.
        None => format!("{:.*}", digits as usize, amount),
    };

    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = group_thousands(integer);
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
