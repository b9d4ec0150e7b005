use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A discrete feature an implementation can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // basic operations
    BasicRead,
    BasicWrite,

    // advanced operations
    BulkOperations,
    AdvancedSearch,
    CustomFields,

    // integration features
    Webhooks,
    WorkflowAutomation,
    RealTimeUpdates,

    // API-specific
    ApiAccess,
    RateLimiting,

    // CLI-specific
    CliAvailable,
    InteractiveMode,
}

impl Capability {
    pub const ALL: [Capability; 12] = [
        Capability::BasicRead,
        Capability::BasicWrite,
        Capability::BulkOperations,
        Capability::AdvancedSearch,
        Capability::CustomFields,
        Capability::Webhooks,
        Capability::WorkflowAutomation,
        Capability::RealTimeUpdates,
        Capability::ApiAccess,
        Capability::RateLimiting,
        Capability::CliAvailable,
        Capability::InteractiveMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::BasicRead => "basic_read",
            Capability::BasicWrite => "basic_write",
            Capability::BulkOperations => "bulk_operations",
            Capability::AdvancedSearch => "advanced_search",
            Capability::CustomFields => "custom_fields",
            Capability::Webhooks => "webhooks",
            Capability::WorkflowAutomation => "workflow_automation",
            Capability::RealTimeUpdates => "real_time_updates",
            Capability::ApiAccess => "api_access",
            Capability::RateLimiting => "rate_limiting",
            Capability::CliAvailable => "cli_available",
            Capability::InteractiveMode => "interactive_mode",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    /// Accepts `advanced_search` as well as `advanced-search` and upper case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown capability '{}'", s))
    }
}

/// Set of capabilities. Iteration and display follow declaration order of
/// [`Capability`], never insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_superset(&self, required: &CapabilitySet) -> bool {
        self.0.is_superset(&required.0)
    }

    /// Capabilities in `required` that this set lacks.
    pub fn missing(&self, required: &CapabilitySet) -> CapabilitySet {
        Self(required.0.difference(&self.0).copied().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.iter().map(|c| c.as_str()).collect::<Vec<_>>();
        write!(f, "[{}]", names.join(", "))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Capability; N]> for CapabilitySet {
    fn from(caps: [Capability; N]) -> Self {
        caps.into_iter().collect()
    }
}

impl IntoIterator for CapabilitySet {
    type Item = Capability;
    type IntoIter = std::collections::btree_set::IntoIter<Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = &'a Capability;
    type IntoIter = std::collections::btree_set::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
