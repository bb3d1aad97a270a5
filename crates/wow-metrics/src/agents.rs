//! Automation agent directory: setup progress and filtering

use serde::Serialize;

/// Lifecycle state of an automation agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentStatus {
    Active,
    Scheduled,
    Paused,
    NeedsSetup,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Active,
        AgentStatus::Scheduled,
        AgentStatus::Paused,
        AgentStatus::NeedsSetup,
    ];

    /// Stable identifier used as the filter value, e.g. "needs-setup"
    pub fn slug(self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Scheduled => "scheduled",
            AgentStatus::Paused => "paused",
            AgentStatus::NeedsSetup => "needs-setup",
        }
    }

    /// `None` for anything that is not a status slug, including "all"
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn is_configured(self) -> bool {
        self != AgentStatus::NeedsSetup
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "Active"),
            AgentStatus::Scheduled => write!(f, "Scheduled"),
            AgentStatus::Paused => write!(f, "Paused"),
            AgentStatus::NeedsSetup => write!(f, "Needs setup"),
        }
    }
}

/// One automation agent as listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: AgentStatus,
    /// Headline finding of the latest run
    pub kpi: String,
    /// Run schedule or setup hint
    pub meta: String,
}

impl AgentRecord {
    pub fn new(id: &str, name: &str, description: &str, status: AgentStatus, kpi: &str, meta: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status,
            kpi: kpi.to_string(),
            meta: meta.to_string(),
        }
    }
}

/// Configured agents and the total, as `(configured, total)`
pub fn configured_count(agents: &[AgentRecord]) -> (usize, usize) {
    let configured = agents.iter().filter(|a| a.status.is_configured()).count();
    (configured, agents.len())
}

/// Agents whose name or description contains `query` (case insensitive), narrowed to
/// `status` when given. An empty query matches every agent. Input order is kept.
pub fn filter_agents<'a>(agents: &'a [AgentRecord], query: &str, status: Option<AgentStatus>) -> Vec<&'a AgentRecord> {
    let needle = query.trim().to_lowercase();
    agents
        .iter()
        .filter(|a| status.is_none_or(|s| a.status == s))
        .filter(|a| {
            needle.is_empty() || a.name.to_lowercase().contains(&needle) || a.description.to_lowercase().contains(&needle)
        })
        .collect()
}
