//! Storefront audit report
//!
//! Loads sales, channel, region and inventory collections, derives the audit
//! figures through `wow_metrics` and renders them to the console and CSV.

pub mod config;
pub mod constants;
pub mod loader;
pub mod reports;
