//! Line-item text parsing.
//!
//! Line items arrive as free text straight from a form: one item per
//! line, fields separated by `|`.  Materials use
//! `description | quantity | unit | rate` and labour uses
//! `description | hours`.  Parsing never fails.  A line without a
//! description is dropped and any field that is missing or not a plain
//! number falls back to its default.
//!
//! Numbers are parsed as-is: `"$100"` or `"1,200"` are not plain
//! numbers and therefore take the default.

use crate::models::{LineItem, LineItemKind};
use tracing::trace;

const DEFAULT_QUANTITY: f64 = 1.0;
const DEFAULT_RATE: f64 = 0.0;
const DEFAULT_MATERIAL_UNIT: &str = "ea";
const LABOR_UNIT: &str = "hr";

/// Parsed labour lines together with their summed hours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaborItems {
    pub items: Vec<LineItem>,
    /// Sum of every parsed line's hours, accumulated while parsing.
    pub total_hours: f64,
}

/// Parse material lines of the form `description | quantity | unit | rate`.
///
/// Quantity defaults to 1, unit to `"ea"` and rate to 0.  Fields after
/// the fourth are ignored.
pub fn parse_material_line_items(text: &str) -> Vec<LineItem> {
    text.split('\n')
        .filter_map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let description = described(fields.next(), line)?;
            let quantity = parse_number(fields.next(), DEFAULT_QUANTITY);
            let unit = match fields.next() {
                Some(unit) if !unit.is_empty() => unit,
                _ => DEFAULT_MATERIAL_UNIT,
            };
            let rate = parse_number(fields.next(), DEFAULT_RATE);
            Some(LineItem::new(
                description,
                quantity,
                unit,
                rate,
                LineItemKind::Material,
            ))
        })
        .collect()
}

/// Parse labour lines of the form `description | hours`.
///
/// Every line is billed at `labor_rate` in `"hr"`; lines cannot carry
/// their own rate.  Hours default to 1.
pub fn parse_labor_line_items(text: &str, labor_rate: f64) -> LaborItems {
    let mut total_hours = 0.0;
    let items = text
        .split('\n')
        .filter_map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let description = described(fields.next(), line)?;
            let hours = parse_number(fields.next(), DEFAULT_QUANTITY);
            total_hours += hours;
            Some(LineItem::new(
                description,
                hours,
                LABOR_UNIT,
                labor_rate,
                LineItemKind::Labor,
            ))
        })
        .collect();
    LaborItems { items, total_hours }
}

/// Returns the description if it is non-empty, otherwise `None` so the
/// line is skipped.
fn described<'a>(field: Option<&'a str>, line: &str) -> Option<&'a str> {
    match field {
        Some(description) if !description.is_empty() => Some(description),
        _ => {
            if !line.trim().is_empty() {
                trace!(line, "dropping line item without a description");
            }
            None
        }
    }
}

/// Parse a trimmed field as a decimal number.  Empty, non-numeric and
/// non-finite values (`inf`, `NaN`) take `default`.
pub(crate) fn parse_number(field: Option<&str>, default: f64) -> f64 {
    field
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}
