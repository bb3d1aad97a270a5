//! Centralized constants for the audit tool
//!
//! Store-specific settings are loaded from config.toml.

// =============================================================================
// Input Files (data dir)
// =============================================================================

/// Monthly sales CSV filename
pub const MONTHLY_FILENAME: &str = "monthly.csv";

/// Channel performance CSV filename
pub const CHANNELS_FILENAME: &str = "channels.csv";

/// Region performance CSV filename
pub const REGIONS_FILENAME: &str = "regions.csv";

/// SKU inventory CSV filename
pub const SKUS_FILENAME: &str = "skus.csv";

/// Slow mover CSV filename
pub const SLOW_MOVERS_FILENAME: &str = "slow_movers.csv";

// =============================================================================
// Output Files (output dir)
// =============================================================================

/// Monthly summary CSV filename
pub const MONTHLY_SUMMARY_FILENAME: &str = "monthly_summary.csv";

/// Channel summary CSV filename
pub const CHANNEL_SUMMARY_FILENAME: &str = "channel_summary.csv";

/// Region shares CSV filename
pub const REGION_SHARES_FILENAME: &str = "region_shares.csv";

/// Restock plan CSV filename
pub const RESTOCK_PLAN_FILENAME: &str = "restock_plan.csv";

/// Audit summary JSON filename
pub const SUMMARY_JSON_FILENAME: &str = "audit_summary.json";

// =============================================================================
// Defaults
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "config.toml";

/// Currency used when config.toml does not name one
pub const DEFAULT_CURRENCY: &str = "EGP";

/// Decimal places for percentage shares
pub const DEFAULT_SHARE_DECIMALS: u32 = 1;

/// Largest accepted share precision
pub const MAX_SHARE_DECIMALS: u32 = 4;

/// Month label format in monthly.csv ("Aug 23"), parsed with a leading day
pub const MONTH_LABEL_FORMAT: &str = "%d %b %y";
