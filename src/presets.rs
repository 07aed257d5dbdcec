//! Starting points for new proposals.
//!
//! Every proposal starts from a preset: the user picks a trade and a
//! job title and gets a fully filled [`JobDetails`] to edit.  A handful
//! of jobs carry hand-written presets with real line items; every other
//! job gets a generated placeholder with lot-priced tiers.

use crate::models::{JobDetails, PackageDetails, Packages, PricingConfiguration};
use serde::Serialize;

/// A trade and the job titles offered for it, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradeJobs {
    pub trade: &'static str,
    pub jobs: &'static [&'static str],
}

const ELECTRICAL_JOBS: &[&str] = &[
    "Panel Upgrade (200A)",
    "Level-2 EV Charger Install (240V)",
    "Pot Light Package (12x LED + Dimmer)",
    "Kitchen Remodel Wiring",
    "Basement Suite Rough-In",
    "Bathroom Fan Replace + GFCI Updates",
    "Hot Tub / Spa Circuit (GFCI + Disconnect)",
    "Whole-Home Surge Protector (Type 2 SPD)",
    "Smoke/CO Alarm Upgrade (Hardwired Interconnect)",
    "Dedicated Appliance Circuit (Range/Microwave/Freezer)",
    "Garage Sub-Panel + Outlets/Lighting",
    "Exterior / Landscape Lighting Install",
    "Service Mast / Meter Base Repair",
    "Generator Interlock / Transfer Switch",
    "Troubleshooting & Small Repairs",
];

const RENOVATION_JOBS: &[&str] = &[
    "Bathroom Renovation (Standard)",
    "Kitchen Renovation (Cabinets, Counters, Lighting)",
    "Basement Development / Suite Conversion",
    "Framing & Drywall (Room Addition)",
    "Flooring Replace (LVP/Tile)",
    "Interior Doors & Trim Package",
    "Window & Exterior Door Replacement",
    "Deck Build or Re-Decking",
    "Fence Build / Repair",
    "Exterior Siding Repair/Replace",
    "Insulation & Vapour Barrier Upgrade",
    "Tile Shower Rebuild (Waterproofing + Niche)",
    "Interior Paint (Whole Home or Per Room)",
    "Garage Build / Remodel (Shelving + Lighting)",
    "Insurance Restoration (Water/Fire Repair)",
];

const PLUMBING_JOBS: &[&str] = &[
    "Hot Water Tank Replacement (40–50 gal)",
    "Tankless Water Heater Install",
    "Kitchen Faucet & Sink Replace",
    "Bathroom Rough-In (Renovation)",
    "Toilet Install or Replace",
    "Tub/Shower Valve Replacement",
    "Drain Cleaning / Snaking",
    "Main Water Shutoff & PRV Replacement",
    "Water Softener Install",
    "Reverse Osmosis System Install",
    "Sump Pump Install or Replace",
    "Dishwasher Hookup",
    "Laundry Box & Hose Bib Upgrade",
    "Gas Line Install (BBQ/Range)",
    "Leak Detection & Small Repairs",
];

const HVAC_JOBS: &[&str] = &[
    "Furnace Replacement (High-Efficiency)",
    "Air Conditioner Install (Split)",
    "Heat Pump Install (Ducted or Ductless)",
    "Thermostat Upgrade (Smart)",
    "Duct Cleaning & Sanitizing",
    "Ductwork Add/Modify (Basement/Addition)",
    "HRV/ERV Install (Fresh Air System)",
    "Garage Heater Install",
    "Humidifier Install (Bypass/Powered)",
    "AC Recharge/Service (Diagnostic)",
    "Gas Line for Furnace/Appliance (HVAC Scope)",
    "Mini-Split Install (Single Zone)",
    "Mini-Split Install (Multi-Zone)",
    "Combustion Air / Venting Correction",
    "Annual Furnace/AC Tune-Up",
];

/// The full catalogue, in menu order.  The first job of the first trade
/// is the form's initial state.
pub const CATALOGUE: &[TradeJobs] = &[
    TradeJobs {
        trade: "Electrical",
        jobs: ELECTRICAL_JOBS,
    },
    TradeJobs {
        trade: "Renovation",
        jobs: RENOVATION_JOBS,
    },
    TradeJobs {
        trade: "Plumbing",
        jobs: PLUMBING_JOBS,
    },
    TradeJobs {
        trade: "HVAC",
        jobs: HVAC_JOBS,
    },
];

/// Default company brand and licence number for a trade.
fn trade_identity(trade: &str) -> Option<(&'static str, &'static str)> {
    match trade {
        "Electrical" => Some(("SparkSafe Electrical", "EL-98765")),
        "Renovation" => Some(("SolidBuild Renovations", "GC-54321")),
        "Plumbing" => Some(("PureFlow Plumbing", "PL-12345")),
        "HVAC" => Some(("ComfortZone HVAC", "HV-67890")),
        _ => None,
    }
}

/// Job titles offered for `trade`.
pub fn job_titles(trade: &str) -> Option<&'static [&'static str]> {
    CATALOGUE
        .iter()
        .find(|entry| entry.trade == trade)
        .map(|entry| entry.jobs)
}

/// The preset for a trade and job title.  Returns `None` when the pair
/// is not in the catalogue.
pub fn preset(trade: &str, job_title: &str) -> Option<JobDetails> {
    let jobs = job_titles(trade)?;
    if !jobs.iter().any(|job| *job == job_title) {
        return None;
    }
    Some(
        detailed_preset(trade, job_title)
            .unwrap_or_else(|| placeholder_preset(job_title, trade)),
    )
}

/// The preset the job form opens with.
pub fn initial_preset() -> Option<JobDetails> {
    let first = CATALOGUE.first()?;
    preset(first.trade, first.jobs.first()?)
}

/// Generates a generic preset for a job without hand-written details.
///
/// Tiers are priced as single material lots (600 / 900 / 1400) with 4, 6
/// and 8 labour hours.  The proposal prefix is the first three letters of
/// the trade's brand, upper-cased.
pub fn placeholder_preset(job_title: &str, trade: &str) -> JobDetails {
    let (brand, license) = trade_identity(trade).unwrap_or(("", ""));
    let tier = |level: &str, scope: String, lot: u32, hours: u32| PackageDetails {
        scope,
        material_line_items: format!("{job_title} Materials ({level}) | 1 | lot | {lot}"),
        labor_line_items: format!("{job_title} Labor ({level}) | {hours} | hrs"),
    };

    JobDetails {
        site_address: "123 Example St, City, ST".to_string(),
        client_type: "Homeowner".to_string(),
        summary: format!(
            "Standard project to perform: {job_title}. Includes all necessary materials \
             and labor for a complete installation."
        ),
        packages: Packages {
            good: tier(
                "Basic",
                format!("- Basic scope for {job_title}\n- Standard materials"),
                600,
                4,
            ),
            better: tier(
                "Standard",
                format!(
                    "- Standard scope for {job_title}\n- Mid-grade materials\n- Includes cleanup"
                ),
                900,
                6,
            ),
            best: tier(
                "Premium",
                format!(
                    "- Premium scope for {job_title}\n- High-end materials\n- Extended warranty"
                ),
                1400,
                8,
            ),
        },
        pricing: PricingConfiguration {
            material_markup_percent: 25.0,
            labor_rate: 95.0,
            tax: 5.0,
            discount: 0.0,
            deposit: 40.0,
            currency: "CAD".to_string(),
        },
        constraints: "Standard work hours (9am-5pm). \
                      Client to provide clear access to the work area."
            .to_string(),
        warranty: 12.0,
        validity: 30.0,
        timeline: "1-3 days".to_string(),
        brand: brand.to_string(),
        license: license.to_string(),
        proposal_number_prefix: brand.chars().take(3).collect::<String>().to_uppercase(),
    }
}

fn package(scope: &str, materials: &str, labor: &str) -> PackageDetails {
    PackageDetails {
        scope: scope.to_string(),
        material_line_items: materials.to_string(),
        labor_line_items: labor.to_string(),
    }
}

fn pricing(
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

/// Hand-written presets with real line items.
fn detailed_preset(trade: &str, job_title: &str) -> Option<JobDetails> {
    let job = match (trade, job_title) {
        ("Electrical", "Panel Upgrade (200A)") => JobDetails {
            site_address: "123 Main St, Calgary, AB".to_string(),
            client_type: "Homeowner".to_string(),
            summary: "Upgrade main electrical panel to 200A service to accommodate modern loads. \
                      Includes new breakers and panel labeling."
                .to_string(),
            packages: Packages {
                good: package(
                    "- Supply & install 150A panel\n- Standard breakers\n- Label circuits",
                    "150A Panel Kit | 1 | kit | 400\nStandard Breakers | 12 | ea | 15",
                    "Panel installation | 6 | hrs",
                ),
                better: package(
                    "- Supply & install 200A panel\n\
                     - Combination AFCI/GFCI breakers on required circuits\n- Label circuits",
                    "200A Panel Kit | 1 | kit | 550\nAFCI/GFCI Breakers | 4 | ea | 65",
                    "Panel installation & advanced wiring | 8 | hrs",
                ),
                best: package(
                    "- Supply & install 200A panel\n- Combination AFCI/GFCI breakers\n\
                     - Whole-home surge protector\n- Label circuits",
                    "200A Panel Kit | 1 | kit | 550\nAFCI/GFCI Breakers | 6 | ea | 65\n\
                     Whole-Home Surge Protector | 1 | ea | 250",
                    "Panel & surge protector installation | 9 | hrs",
                ),
            },
            pricing: pricing(30.0, 110.0, 5.0, 0.0, 40.0),
            constraints: "Power will be off for 4-6 hours during installation. \
                          ESA inspection coordinated."
                .to_string(),
            warranty: 24.0,
            validity: 30.0,
            timeline: "1 day".to_string(),
            brand: "TrueCan Power Systems".to_string(),
            license: "AB-ELC-123456".to_string(),
            proposal_number_prefix: "TPS".to_string(),
        },
        ("Electrical", "Level-2 EV Charger Install (240V)") => JobDetails {
            site_address: "456 Tech Ave, Toronto, ON".to_string(),
            client_type: "Homeowner".to_string(),
            summary: "Install a Level 2 EV charger in the garage. \
                      Includes running a new dedicated circuit from the main panel."
                .to_string(),
            packages: Packages {
                good: package(
                    "- Install customer-provided Level 2 EV charger\n\
                     - Run 40A circuit with 8/3 NMD wire (up to 15m)\n\
                     - Install 40A 2-pole breaker",
                    "40A breaker | 1 | ea | 40\n8/3 NMD wire | 15 | m | 8\n\
                     Misc. materials | 1 | lot | 50",
                    "Install customer-provided EV charger | 3 | hrs",
                ),
                better: package(
                    "- Supply & install Tesla Wall Connector (Gen 3)\n\
                     - Run 60A circuit with 6/3 NMD wire (up to 15m)\n\
                     - Install 60A 2-pole breaker",
                    "Tesla Wall Connector | 1 | ea | 650\n60A breaker | 1 | ea | 60\n\
                     6/3 NMD wire | 15 | m | 12\nMisc. materials | 1 | lot | 60",
                    "Supply & Install EV charger | 4 | hrs",
                ),
                best: package(
                    "- Supply & install Tesla Wall Connector (Gen 3)\n\
                     - Run 60A circuit with 6/3 armored cable (up to 15m)\n\
                     - Install 60A 2-pole GFCI breaker for added safety",
                    "Tesla Wall Connector | 1 | ea | 650\n60A GFCI breaker | 1 | ea | 150\n\
                     6/3 Armored Cable | 15 | m | 18\nMisc. materials | 1 | lot | 75",
                    "Premium EV charger installation | 4.5 | hrs",
                ),
            },
            pricing: pricing(25.0, 115.0, 13.0, 0.0, 50.0),
            constraints: "Garage access required. \
                          Installation location to be confirmed with client."
                .to_string(),
            warranty: 24.0,
            validity: 30.0,
            timeline: "1 day".to_string(),
            brand: "ChargeRight Electrical".to_string(),
            license: "ON-ELC-789012".to_string(),
            proposal_number_prefix: "CRE".to_string(),
        },
        ("Plumbing", "Hot Water Tank Replacement (40–50 gal)") => JobDetails {
            site_address: "789 Waterfront Rd, Vancouver, BC".to_string(),
            client_type: "Property Manager".to_string(),
            summary: "Replace a leaking 40-gallon electric hot water tank with a new, \
                      efficient model. Includes removal and disposal of the old unit."
                .to_string(),
            packages: Packages {
                good: package(
                    "- Supply & install standard 40-gallon electric hot water tank\n\
                     - New flexible connectors\n- Disposal of old tank",
                    "40-Gallon Electric HWT | 1 | ea | 650\n\
                     Flex connectors & fittings | 1 | lot | 50\nDisposal Fee | 1 | ea | 50",
                    "Standard HWT replacement | 2 | hrs",
                ),
                better: package(
                    "- Supply & install high-efficiency 50-gallon electric hot water tank\n\
                     - New ball valve shutoff\n- New drain pan\n- Disposal of old tank",
                    "50-Gallon HE HWT | 1 | ea | 950\nBall valve shutoff | 1 | ea | 40\n\
                     Drain pan | 1 | ea | 30\nDisposal Fee | 1 | ea | 50",
                    "HE HWT replacement | 2.5 | hrs",
                ),
                best: package(
                    "- Supply & install premium 50-gallon electric hot water tank \
                     with 12-year warranty\n\
                     - New ball valve shutoff & drain pan\n\
                     - Thermal expansion tank for code compliance\n- Disposal of old tank",
                    "50-Gallon Premium HWT | 1 | ea | 1200\nBall valve shutoff | 1 | ea | 40\n\
                     Drain pan | 1 | ea | 30\nThermal expansion tank | 1 | ea | 120\n\
                     Disposal Fee | 1 | ea | 50",
                    "Premium HWT & expansion tank install | 3 | hrs",
                ),
            },
            pricing: pricing(35.0, 120.0, 12.0, 5.0, 50.0),
            constraints: "Clear access to mechanical room required. \
                          Water will be shut off for 2-3 hours."
                .to_string(),
            warranty: 12.0,
            validity: 30.0,
            timeline: "3-4 hours".to_string(),
            brand: "Flow Masters Plumbing".to_string(),
            license: "BC-PLM-334455".to_string(),
            proposal_number_prefix: "FMP".to_string(),
        },
        _ => return None,
    };
    Some(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::quote_packages;
    use crate::parser::parse_material_line_items;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_every_catalogue_job_has_a_quotable_preset() {
        for entry in CATALOGUE {
            assert_eq!(entry.jobs.len(), 15, "{}", entry.trade);
            for job in entry.jobs {
                let details = preset(entry.trade, job).unwrap();
                let quotes = quote_packages(&details);
                assert!(quotes.good.is_some(), "{} / {}", entry.trade, job);
                assert!(quotes.better.is_some(), "{} / {}", entry.trade, job);
                assert!(quotes.best.is_some(), "{} / {}", entry.trade, job);
            }
        }
    }

    #[test]
    fn test_placeholder_preset_pricing() {
        let job = placeholder_preset("Dishwasher Hookup", "Plumbing");
        assert_eq!(job.brand, "PureFlow Plumbing");
        assert_eq!(job.license, "PL-12345");
        assert_eq!(job.proposal_number_prefix, "PUR");
        assert_eq!(job.pricing.currency, "CAD");
        assert_eq!(
            job.packages.good.material_line_items,
            "Dishwasher Hookup Materials (Basic) | 1 | lot | 600"
        );

        let quotes = quote_packages(&job);
        // 600 + 25% markup + 4h at 95, plus 5% tax
        let good = quotes.good.unwrap();
        assert_close(good.sub_total, 1130.0);
        assert_close(good.grand_total, 1186.5);
        assert_close(good.deposit_due, 474.6);
        // 1400 + 350 markup + 8h at 95
        assert_close(quotes.best.unwrap().sub_total, 2510.0);
    }

    #[test]
    fn test_placeholder_prefix_follows_brand() {
        assert_eq!(placeholder_preset("x", "Electrical").proposal_number_prefix, "SPA");
        assert_eq!(placeholder_preset("x", "Renovation").proposal_number_prefix, "SOL");
        assert_eq!(placeholder_preset("x", "HVAC").proposal_number_prefix, "COM");
    }

    #[test]
    fn test_detailed_preset_quotes() {
        let job = preset("Electrical", "Panel Upgrade (200A)").unwrap();
        assert_eq!(job.proposal_number_prefix, "TPS");
        let better = quote_packages(&job).better.unwrap();
        // 550 + 4 x 65 = 810, 30% markup 243, 8h at 110 = 880
        assert_close(better.total_material_cost, 810.0);
        assert_close(better.sub_total, 1933.0);
        assert_close(better.grand_total, 2029.65);
    }

    #[test]
    fn test_detailed_preset_line_items_parse_cleanly() {
        let job = preset("Plumbing", "Hot Water Tank Replacement (40–50 gal)").unwrap();
        let items = parse_material_line_items(&job.packages.best.material_line_items);
        assert_eq!(items.len(), 5);
        assert_eq!(items[3].description, "Thermal expansion tank");
        assert_eq!(job.pricing.discount, 5.0);
    }

    #[test]
    fn test_unknown_pairs_have_no_preset() {
        assert!(preset("Roofing", "Panel Upgrade (200A)").is_none());
        assert!(preset("Electrical", "Hot Water Tank Replacement (40–50 gal)").is_none());
        assert!(job_titles("Roofing").is_none());
    }

    #[test]
    fn test_initial_preset_is_first_electrical_job() {
        let job = initial_preset().unwrap();
        assert_eq!(job.brand, "TrueCan Power Systems");
    }
}
