//! Proposal helpers that sit next to the quote: numbering and adding
//! upsell suggestions to a package.

/// Formats a proposal number as `PREFIX-YEAR-NNNN`.
///
/// The counter is zero-padded to four digits; larger counters are
/// written out in full.
pub fn format_proposal_number(prefix: &str, year: i32, counter: u32) -> String {
    format!("{prefix}-{year}-{counter:04}")
}

/// Appends an upsell suggestion to a package's material text.
///
/// The suggestion is added with a quantity of one and a zero rate so the
/// contractor can price it before sending.  A newline is always inserted
/// first; when `material_text` is empty that leaves a blank first line,
/// which the parser skips.
pub fn append_upsell(material_text: &str, name: &str) -> String {
    format!("{material_text}\n{} | 1 | ea | 0", name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_material_line_items;

    #[test]
    fn test_proposal_number_is_padded() {
        assert_eq!(format_proposal_number("SPA", 2025, 7), "SPA-2025-0007");
        assert_eq!(format_proposal_number("PUR", 2026, 12345), "PUR-2026-12345");
    }

    #[test]
    fn test_upsell_adds_zero_priced_line() {
        let text = append_upsell("Panel | 1 | kit | 550", "Whole-Home Surge Protector");
        assert_eq!(text, "Panel | 1 | kit | 550\nWhole-Home Surge Protector | 1 | ea | 0");

        let items = parse_material_line_items(&text);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].description, "Whole-Home Surge Protector");
        assert_eq!(items[1].amount, 0.0);
    }

    #[test]
    fn test_upsell_into_empty_package() {
        let text = append_upsell("", "Smart Dimmer");
        assert_eq!(text, "\nSmart Dimmer | 1 | ea | 0");
        assert_eq!(parse_material_line_items(&text).len(), 1);
    }
}
