//! Data models for the Quote Engine.
//!
//! The `models` module defines the serialisable structs and enums
//! representing line items, pricing configuration, job packages and
//! computed quotes.  These data types derive `Serialize` and
//! `Deserialize` so that they can be handed to a renderer or
//! transmitted over a network.  They form the basis of the engine's
//! input and output structures.

use serde::{Deserialize, Serialize};

/// Which subtotal a [`LineItem`] contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemKind {
    /// Counted towards the material cost (and therefore the markup).
    Material,
    /// Counted towards the labour hours.
    Labor,
}

/// One priced row of a quote.
///
/// The wire names (`desc`, `qty`, `type`) match what the proposal
/// renderer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Non-empty label taken from the first field of the source line.
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "qty")]
    pub quantity: f64,
    /// Unit label such as `"ea"` or `"hr"`.
    pub unit: String,
    pub rate: f64,
    /// Always `quantity * rate`.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
}

impl LineItem {
    /// Builds an item and derives its amount.  This is the only way the
    /// engine creates items, so `amount` can never drift from
    /// `quantity * rate`.
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        rate: f64,
        kind: LineItemKind,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            rate,
            amount: quantity * rate,
            kind,
        }
    }
}

/// The non-package pricing fields of the job form.
///
/// All percentages are expressed 0-100.  Nothing here is validated:
/// negative values flow straight through the arithmetic.  Missing fields
/// deserialise to zero so a half-filled form still produces a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfiguration {
    pub material_markup_percent: f64,
    /// Hourly rate applied to every labour line.
    pub labor_rate: f64,
    /// Tax percentage, applied after the discount.
    pub tax: f64,
    /// Discount percentage of the subtotal.
    pub discount: f64,
    /// Deposit percentage of the grand total.
    pub deposit: f64,
    /// ISO 4217-like currency code.  Free text; only the formatter
    /// looks at it.
    pub currency: String,
}

impl Default for PricingConfiguration {
    fn default() -> Self {
        Self {
            material_markup_percent: 0.0,
            labor_rate: 0.0,
            tax: 0.0,
            discount: 0.0,
            deposit: 0.0,
            currency: "USD".to_string(),
        }
    }
}

/// A fully computed quote.
///
/// Quotes are plain derived values: recompute one from its inputs
/// whenever any of them change instead of patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Material items first, then labour items, each in source order.
    pub items: Vec<LineItem>,
    pub total_material_cost: f64,
    pub markup_amount: f64,
    /// Derived from `total_hours * labor_rate`, not from summing items.
    pub total_labor_cost: f64,
    pub total_hours: f64,
    pub sub_total: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub deposit_due: f64,
    pub balance_after_deposit: f64,
    pub currency: String,
    pub material_markup_percent: f64,
    pub labor_rate: f64,
    pub tax_percent: f64,
    pub discount_percent: f64,
    pub deposit_percent: f64,
}

impl Quote {
    /// Iterates the material rows only.
    pub fn materials(&self) -> impl Iterator<Item = &LineItem> {
        self.items
            .iter()
            .filter(|item| item.kind == LineItemKind::Material)
    }

    /// Iterates the labour rows only.
    pub fn labor(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.kind == LineItemKind::Labor)
    }
}

/// The three package tiers offered on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Good,
    Better,
    Best,
}

impl PackageTier {
    /// All tiers in display order.
    pub const ALL: [PackageTier; 3] = [PackageTier::Good, PackageTier::Better, PackageTier::Best];
}

/// Scope and raw line-item text for one package tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageDetails {
    pub scope: String,
    /// Newline separated `desc | qty | unit | rate` lines.
    pub material_line_items: String,
    /// Newline separated `desc | hours` lines.
    pub labor_line_items: String,
}

impl PackageDetails {
    /// A package is only quoted once it has a scope and at least one
    /// block of line items.
    pub fn is_quotable(&self) -> bool {
        !self.scope.is_empty()
            && (!self.material_line_items.is_empty() || !self.labor_line_items.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Packages {
    pub good: PackageDetails,
    pub better: PackageDetails,
    pub best: PackageDetails,
}

impl Packages {
    pub fn get(&self, tier: PackageTier) -> &PackageDetails {
        match tier {
            PackageTier::Good => &self.good,
            PackageTier::Better => &self.better,
            PackageTier::Best => &self.best,
        }
    }
}

/// The job form as submitted by the user.
///
/// Only `packages` and `pricing` feed the calculation; the remaining
/// fields are carried for the proposal renderer.  Unknown fields (logo,
/// colours, attachments) are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetails {
    pub site_address: String,
    pub client_type: String,
    pub summary: String,
    pub packages: Packages,
    #[serde(flatten)]
    pub pricing: PricingConfiguration,
    pub constraints: String,
    /// Warranty length in months.
    pub warranty: f64,
    /// Number of days the proposal stays valid.
    pub validity: f64,
    pub timeline: String,
    pub brand: String,
    pub license: String,
    pub proposal_number_prefix: String,
}

/// Quotes for each tier of a job.  A tier is `None` when it has not
/// been filled in enough to be quoted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageQuotes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<Quote>,
}

impl PackageQuotes {
    pub fn get(&self, tier: PackageTier) -> Option<&Quote> {
        match tier {
            PackageTier::Good => self.good.as_ref(),
            PackageTier::Better => self.better.as_ref(),
            PackageTier::Best => self.best.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, tier: PackageTier, quote: Quote) {
        match tier {
            PackageTier::Good => self.good = Some(quote),
            PackageTier::Better => self.better = Some(quote),
            PackageTier::Best => self.best = Some(quote),
        }
    }

    /// The quoted tier with the lowest grand total.  Ties go to the
    /// earlier tier.
    pub fn cheapest(&self) -> Option<(PackageTier, &Quote)> {
        let mut cheapest: Option<(PackageTier, &Quote)> = None;
        for tier in PackageTier::ALL {
            let Some(quote) = self.get(tier) else {
                continue;
            };
            match cheapest {
                Some((_, current)) if current.grand_total <= quote.grand_total => {}
                _ => cheapest = Some((tier, quote)),
            }
        }
        cheapest
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_none() && self.better.is_none() && self.best.is_none()
    }
}
