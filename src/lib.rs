//! Quote Engine library crate.
//!
//! This crate exposes the quote calculation core and API components as
//! reusable modules.  External applications may depend on the
//! `quote_engine` crate and call into `engine::calculate_quote`
//! directly or embed the API via `api::build_router`.

pub mod models;
pub mod parser;
pub mod engine;
pub mod currency;
pub mod proposal;
pub mod presets;
pub mod config;
pub mod error;
pub mod api;

pub use currency::format_currency;
pub use engine::{calculate_quote, quote_packages};
pub use models::{LineItem, LineItemKind, PricingConfiguration, Quote};
