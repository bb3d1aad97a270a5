//! Storefront analytics derivations
//!
//! Pure functions that turn record collections into the figures shown on the
//! dashboard and in the audit report. Nothing here performs I/O or mutates input;
//! failures are returned as [`MetricsError`] rather than NaN or Infinity.

pub mod agents;
pub mod aggregate;
pub mod channels;
pub mod error;
pub mod finance;
pub mod format;
pub mod inventory;
pub mod records;
pub mod trend;

pub use agents::{AgentRecord, AgentStatus, configured_count, filter_agents};
pub use aggregate::{Direction, Share, average, average_order_value, extremum_by, ratio, round_half_up, share_of_total, sum};
pub use channels::{ChannelReturn, rank_by_return_on_spend, return_on_spend};
pub use error::{MetricsError, Result};
pub use format::{PLACEHOLDER, format_money, format_percent, or_placeholder};
pub use inventory::{RestockLine, StockStatus, reorder_quantity, restock_plan};
pub use records::{
    ChannelMetric, CostLine, MonthlyMetric, Record, RegionMetric, SkuInventoryRecord, SlowMoverRecord,
    SubscriptionSnapshot,
};
pub use trend::{PeriodChange, percent_change, period_changes};
