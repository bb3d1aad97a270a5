//! Store configuration and sample record collections
//!
//! The collections are fixed fixtures: the dashboard renders them directly and the
//! audit tool falls back to them when no CSV data is present.

use wow_metrics::{
    AgentRecord, AgentStatus, ChannelMetric, CostLine, MonthlyMetric, RegionMetric, SkuInventoryRecord, SlowMoverRecord, SubscriptionSnapshot,
};

/// Static store configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,
    /// Currency code for store revenue figures
    pub currency: &'static str,
    /// Currency symbol for platform subscription figures
    pub platform_currency: &'static str,
    pub audit_period: &'static str,
    pub links: Links,
}

pub struct Links {
    pub audit: &'static str,
    pub inventory: &'static str,
    pub finance: &'static str,
    pub agents: &'static str,
}

pub static CONFIG: Config = Config {
    name: "WoW AI",
    tagline: "Store audit, inventory agent and platform finances",
    currency: "EGP",
    platform_currency: "$",
    audit_period: "Aug 23 - Jul 24",
    links: Links {
        audit: "/",
        inventory: "/inventory",
        finance: "/finance",
        agents: "/agents",
    },
};

// =============================================================================
// Store audit (last 12 months)
// =============================================================================

/// Monthly sales, oldest first
pub fn monthly_metrics() -> Vec<MonthlyMetric> {
    vec![
        MonthlyMetric::new("Aug 23", 780_000.0, 350, 0.16),
        MonthlyMetric::new("Sep 23", 810_000.0, 365, 0.15),
        MonthlyMetric::new("Oct 23", 910_000.0, 402, 0.15),
        MonthlyMetric::new("Nov 23", 1_160_000.0, 540, 0.21),
        MonthlyMetric::new("Dec 23", 1_240_000.0, 565, 0.23),
        MonthlyMetric::new("Jan 24", 690_000.0, 310, 0.12),
        MonthlyMetric::new("Feb 24", 740_000.0, 330, 0.12),
        MonthlyMetric::new("Mar 24", 890_000.0, 385, 0.14),
        MonthlyMetric::new("Apr 24", 960_000.0, 420, 0.13),
        MonthlyMetric::new("May 24", 990_000.0, 435, 0.12),
        MonthlyMetric::new("Jun 24", 920_000.0, 392, 0.13),
        MonthlyMetric::new("Jul 24", 900_000.0, 388, 0.14),
    ]
}

pub fn channel_metrics() -> Vec<ChannelMetric> {
    vec![
        ChannelMetric::new("Paid Search", 2_600_000.0, 1150, 620_000.0),
        ChannelMetric::new("Paid Social", 2_100_000.0, 980, 520_000.0),
        ChannelMetric::new("Email", 1_450_000.0, 720, 70_000.0),
        ChannelMetric::new("Organic", 1_850_000.0, 850, 90_000.0),
        ChannelMetric::new("Referral", 850_000.0, 345, 25_000.0),
    ]
}

pub fn region_metrics() -> Vec<RegionMetric> {
    vec![
        RegionMetric::new("Cairo", 3_900_000.0, 1700),
        RegionMetric::new("Giza", 1_600_000.0, 720),
        RegionMetric::new("Alexandria", 1_200_000.0, 520),
        RegionMetric::new("Dakahlia", 600_000.0, 270),
        RegionMetric::new("Sharqia", 480_000.0, 210),
    ]
}

// =============================================================================
// Supply chain agent
// =============================================================================

/// SKUs on the restock watchlist
pub fn sku_inventory() -> Vec<SkuInventoryRecord> {
    vec![
        SkuInventoryRecord::new("SKU-1029", 18, 6.0, 7.0, 10),
        SkuInventoryRecord::new("SKU-2044", 22, 4.0, 10.0, 12),
        SkuInventoryRecord::new("SKU-7781", 15, 3.0, 8.0, 8),
        SkuInventoryRecord::new("SKU-8800", 46, 2.0, 10.0, 10),
    ]
}

pub fn slow_movers() -> Vec<SlowMoverRecord> {
    vec![
        SlowMoverRecord::new("SKU-5512", 2, 240),
        SlowMoverRecord::new("SKU-3301", 4, 140),
        SlowMoverRecord::new("SKU-9907", 0, 60),
    ]
}

// =============================================================================
// Platform finances
// =============================================================================

pub fn subscription_snapshot() -> SubscriptionSnapshot {
    SubscriptionSnapshot {
        paid_brands: 38,
        freemium_brands: 8,
        arpu: 109.0,
        ai_costs: 248.0,
        data_costs: 175.0,
        at_risk_brands: 3,
    }
}

/// Monthly operating costs of a snapshot, so the breakdown cannot drift from the KPIs
pub fn cost_lines_for(snapshot: &SubscriptionSnapshot) -> Vec<CostLine> {
    vec![
        CostLine::new("AI Costs", snapshot.ai_costs),
        CostLine::new("Data Costs", snapshot.data_costs),
    ]
}

pub fn cost_lines() -> Vec<CostLine> {
    cost_lines_for(&subscription_snapshot())
}

/// Platform MRR for the last five months, oldest first
pub fn revenue_growth() -> Vec<MonthlyMetric> {
    [("Jan", 3800.0), ("Feb", 4200.0), ("Mar", 4650.0), ("Apr", 4850.0), ("May", 5014.0)]
        .into_iter()
        .map(|(label, revenue)| MonthlyMetric::new(label, revenue, 0, 0.0))
        .collect()
}

// =============================================================================
// Automation agents
// =============================================================================

pub fn agents() -> Vec<AgentRecord> {
    vec![
        AgentRecord::new(
            "inventory",
            "Inventory & Supply Chain",
            "Flags low stock, suggests restocks, and identifies slow movers based on velocity.",
            AgentStatus::Active,
            "6 SKUs need restock",
            "Last run: 2h ago",
        ),
        AgentRecord::new(
            "promotions",
            "Offers & Promotions",
            "Ranks promo codes by net revenue and flags high-return promotions.",
            AgentStatus::Active,
            "Best code: +31% AOV",
            "Last run: 3h ago",
        ),
        AgentRecord::new(
            "pricing",
            "Pricing Strategist",
            "Suggests price moves and markdowns; tracks elasticity and bundle uplift.",
            AgentStatus::Scheduled,
            "2 SKUs suggested up",
            "Next run: in 6h",
        ),
        AgentRecord::new(
            "fulfillment",
            "Fulfillment & Logistics",
            "Monitors unfulfilled orders, delays, and partner SLA performance.",
            AgentStatus::Paused,
            "3 delayed orders",
            "Paused 12h ago",
        ),
        AgentRecord::new(
            "finance",
            "Finance & Profitability",
            "Surfaces margin leaks, below-cost sales, and contribution by category.",
            AgentStatus::Active,
            "1 SKU sold below cost",
            "Last run: 1h ago",
        ),
        AgentRecord::new(
            "customer-care",
            "Customer Care Signals",
            "Analyzes support tags and NPS comments to surface product and CX issues.",
            AgentStatus::NeedsSetup,
            "Setup to start insights",
            "Connect: Helpdesk, NPS",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wow_metrics::Record;
    use wow_metrics::finance::monthly_recurring_revenue;

    #[test]
    fn test_fixtures_validate() {
        assert!(monthly_metrics().iter().all(|m| m.validate().is_ok()));
        assert!(channel_metrics().iter().all(|c| c.validate().is_ok()));
        assert!(region_metrics().iter().all(|r| r.validate().is_ok()));
        assert!(sku_inventory().iter().all(|s| s.validate().is_ok()));
        assert!(slow_movers().iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn test_latest_growth_point_matches_snapshot_mrr() {
        let latest = revenue_growth().last().map(|m| m.revenue);
        assert_eq!(latest, Some(monthly_recurring_revenue(&subscription_snapshot())));
    }

    #[test]
    fn test_agent_ids_are_unique() {
        let agents = agents();
        let mut ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), agents.len());
    }

    #[test]
    fn test_twelve_months_of_sales() {
        assert_eq!(monthly_metrics().len(), 12);
    }
}
