//! Quote computation engine.
//!
//! The `engine` module is responsible for turning raw line-item text
//! and a [`PricingConfiguration`] into a [`Quote`].  Every function
//! here is pure: the same inputs always produce the same quote, so
//! callers are free to recompute on every keystroke or memoise by
//! input equality.  Package quoting uses the [`rayon`] crate to price
//! each tier independently.

use crate::models::{JobDetails, PackageQuotes, PackageTier, PricingConfiguration, Quote};
use crate::parser::{parse_labor_line_items, parse_material_line_items, LaborItems};
use rayon::prelude::*;
use tracing::debug;

/// Computes a complete quote.
///
/// The order of the arithmetic matters and is fixed: material total,
/// markup, labour total (from the summed hours), subtotal, discount,
/// tax on the discounted subtotal, grand total, deposit and balance.
/// Empty text produces an empty quote with zero totals.
pub fn calculate_quote(
    material_text: &str,
    labor_text: &str,
    config: &PricingConfiguration,
) -> Quote {
    let materials = parse_material_line_items(material_text);
    let LaborItems {
        items: labor,
        total_hours,
    } = parse_labor_line_items(labor_text, config.labor_rate);

    let total_material_cost: f64 = materials.iter().map(|item| item.amount).sum();
    let markup_amount = total_material_cost * (config.material_markup_percent / 100.0);
    let total_labor_cost = total_hours * config.labor_rate;

    let sub_total = total_material_cost + markup_amount + total_labor_cost;

    let discount_amount = sub_total * (config.discount / 100.0);
    let taxed_base = sub_total - discount_amount;
    let tax_amount = taxed_base * (config.tax / 100.0);
    let grand_total = taxed_base + tax_amount;
    let deposit_due = grand_total * (config.deposit / 100.0);
    let balance_after_deposit = grand_total - deposit_due;

    debug!(
        materials = materials.len(),
        labor = labor.len(),
        total_hours,
        grand_total,
        currency = %config.currency,
        "quote calculated"
    );

    let mut items = materials;
    items.extend(labor);

    Quote {
        items,
        total_material_cost,
        markup_amount,
        total_labor_cost,
        total_hours,
        sub_total,
        discount_amount,
        tax_amount,
        grand_total,
        deposit_due,
        balance_after_deposit,
        currency: config.currency.clone(),
        material_markup_percent: config.material_markup_percent,
        labor_rate: config.labor_rate,
        tax_percent: config.tax,
        discount_percent: config.discount,
        deposit_percent: config.deposit,
    }
}

/// Quotes every package tier of a job.
///
/// A tier is priced only when it is quotable (see
/// [`PackageDetails::is_quotable`](crate::models::PackageDetails::is_quotable));
/// all tiers share the job's pricing configuration.
pub fn quote_packages(job: &JobDetails) -> PackageQuotes {
    let quoted: Vec<(PackageTier, Quote)> = PackageTier::ALL
        .into_par_iter()
        .filter_map(|tier| {
            let package = job.packages.get(tier);
            if !package.is_quotable() {
                return None;
            }
            let quote = calculate_quote(
                &package.material_line_items,
                &package.labor_line_items,
                &job.pricing,
            );
            Some((tier, quote))
        })
        .collect();

    let mut quotes = PackageQuotes::default();
    for (tier, quote) in quoted {
        quotes.set(tier, quote);
    }
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItemKind, PackageDetails, Packages};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn config(
        markup: f64,
        labor_rate: f64,
        tax: f64,
        discount: f64,
        deposit: f64,
    ) -> PricingConfiguration {
        PricingConfiguration {
            material_markup_percent: markup,
            labor_rate,
            tax,
            discount,
            deposit,
            currency: "CAD".to_string(),
        }
    }

    #[test]
    fn test_end_to_end_panel_quote() {
        let quote = calculate_quote(
            "Panel | 1 | kit | 550",
            "Install | 8",
            &config(30.0, 110.0, 5.0, 0.0, 40.0),
        );
        assert_close(quote.total_material_cost, 550.0);
        assert_close(quote.markup_amount, 165.0);
        assert_close(quote.total_labor_cost, 880.0);
        assert_close(quote.total_hours, 8.0);
        assert_close(quote.sub_total, 1595.0);
        assert_close(quote.discount_amount, 0.0);
        assert_close(quote.tax_amount, 79.75);
        assert_close(quote.grand_total, 1674.75);
        assert_close(quote.deposit_due, 669.90);
        assert_close(quote.balance_after_deposit, 1004.85);
        assert_eq!(quote.currency, "CAD");
        assert_eq!(quote.items.len(), 2);
        assert_eq!(quote.materials().count(), 1);
        assert_eq!(quote.items[0].kind, LineItemKind::Material);
        assert_eq!(quote.items[1].kind, LineItemKind::Labor);
    }

    #[test]
    fn test_tax_applies_after_discount() {
        let quote = calculate_quote("Job | 1 | ea | 100", "", &config(0.0, 0.0, 10.0, 10.0, 0.0));
        assert_close(quote.sub_total, 100.0);
        assert_close(quote.discount_amount, 10.0);
        assert_close(quote.tax_amount, 9.0);
        assert_close(quote.grand_total, 99.0);
    }

    #[test]
    fn test_empty_input_gives_zero_quote() {
        let quote = calculate_quote("", "", &config(30.0, 110.0, 5.0, 10.0, 40.0));
        assert!(quote.items.is_empty());
        for total in [
            quote.total_material_cost,
            quote.markup_amount,
            quote.total_labor_cost,
            quote.total_hours,
            quote.sub_total,
            quote.discount_amount,
            quote.tax_amount,
            quote.grand_total,
            quote.deposit_due,
            quote.balance_after_deposit,
        ] {
            assert_eq!(total, 0.0);
        }
    }

    #[test]
    fn test_labor_total_matches_item_sum() {
        let quote = calculate_quote(
            "",
            "Task A | 3\nTask B | 5",
            &config(0.0, 100.0, 0.0, 0.0, 0.0),
        );
        assert_close(quote.total_hours, 8.0);
        assert_close(quote.total_labor_cost, 800.0);
        let summed: f64 = quote.labor().map(|item| item.amount).sum();
        assert_close(summed, quote.total_labor_cost);
    }

    #[test]
    fn test_markup_is_never_a_line_item() {
        let quote = calculate_quote("Wire | 10 | m | 2", "", &config(25.0, 0.0, 0.0, 0.0, 0.0));
        assert_eq!(quote.items.len(), 1);
        assert_close(quote.markup_amount, 5.0);
        assert_close(quote.sub_total, 25.0);
    }

    #[test]
    fn test_negative_discount_is_a_surcharge() {
        let quote = calculate_quote("Job | 1 | ea | 200", "", &config(0.0, 0.0, 0.0, -5.0, 0.0));
        assert_close(quote.discount_amount, -10.0);
        assert_close(quote.grand_total, 210.0);
    }

    #[test]
    fn test_items_keep_source_order() {
        let quote = calculate_quote(
            "B | 1 | ea | 1\nA | 1 | ea | 1",
            "Second | 1\nFirst | 1",
            &config(0.0, 50.0, 0.0, 0.0, 0.0),
        );
        let names: Vec<&str> = quote.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "Second", "First"]);
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let cfg = config(12.5, 87.0, 13.0, 3.0, 25.0);
        let first = calculate_quote("Tile | 40 | sqft | 6.25", "Lay | 6.5", &cfg);
        let second = calculate_quote("Tile | 40 | sqft | 6.25", "Lay | 6.5", &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_echoes_configuration() {
        let quote = calculate_quote("", "", &config(30.0, 110.0, 5.0, 2.0, 40.0));
        assert_eq!(quote.material_markup_percent, 30.0);
        assert_eq!(quote.labor_rate, 110.0);
        assert_eq!(quote.tax_percent, 5.0);
        assert_eq!(quote.discount_percent, 2.0);
        assert_eq!(quote.deposit_percent, 40.0);
    }

    #[test]
    fn test_quote_packages_skips_unfilled_tiers() {
        let job = JobDetails {
            packages: Packages {
                good: PackageDetails {
                    scope: "- Basic".into(),
                    material_line_items: "Materials | 1 | lot | 600".into(),
                    labor_line_items: "Labor | 4 | hrs".into(),
                },
                better: PackageDetails {
                    scope: String::new(),
                    material_line_items: "Materials | 1 | lot | 900".into(),
                    labor_line_items: String::new(),
                },
                best: PackageDetails {
                    scope: "- Premium".into(),
                    material_line_items: "Materials | 1 | lot | 1400".into(),
                    labor_line_items: "Labor | 8 | hrs".into(),
                },
            },
            pricing: config(25.0, 95.0, 5.0, 0.0, 40.0),
            ..JobDetails::default()
        };

        let quotes = quote_packages(&job);
        assert!(quotes.better.is_none());
        let good = quotes.good.as_ref().unwrap();
        let best = quotes.best.as_ref().unwrap();
        assert_eq!(
            good,
            &calculate_quote("Materials | 1 | lot | 600", "Labor | 4 | hrs", &job.pricing)
        );
        // 600 + 150 markup + 380 labour, plus 5% tax
        assert_close(good.grand_total, 1186.5);
        assert!(best.grand_total > good.grand_total);
        assert_eq!(quotes.cheapest().map(|(tier, _)| tier), Some(PackageTier::Good));
    }

    #[test]
    fn test_quote_packages_empty_job() {
        let quotes = quote_packages(&JobDetails::default());
        assert!(quotes.is_empty());
        assert!(quotes.cheapest().is_none());
    }
}
