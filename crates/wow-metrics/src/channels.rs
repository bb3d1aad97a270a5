//! Marketing channel efficiency

use serde::Serialize;

use crate::aggregate::ratio;
use crate::error::Result;
use crate::records::ChannelMetric;

/// Channel name with its revenue per unit of spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReturn {
    pub name: String,
    pub revenue: f64,
    pub spend: f64,
    pub return_on_spend: f64,
}

/// Revenue divided by spend; zero spend is a `DivideByZero` failure
pub fn return_on_spend(channel: &ChannelMetric) -> Result<f64> {
    ratio(channel.revenue, channel.spend, "return_on_spend")
}

/// Channels ordered by return on spend, best first
///
/// Equal returns keep input order. A single zero-spend channel fails the whole ranking.
pub fn rank_by_return_on_spend(channels: &[ChannelMetric]) -> Result<Vec<ChannelReturn>> {
    let mut ranked = channels
        .iter()
        .map(|c| {
            Ok(ChannelReturn {
                name: c.name.clone(),
                revenue: c.revenue,
                spend: c.spend,
                return_on_spend: return_on_spend(c)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable
    ranked.sort_by(|a, b| b.return_on_spend.total_cmp(&a.return_on_spend));
    Ok(ranked)
}
