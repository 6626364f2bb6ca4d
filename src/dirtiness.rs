use crate::error::UnknownReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

/// Why a previously executed node has to be considered stale.
///
/// Variants are declared in precedence order: when several reasons apply,
/// the node carries the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirtinessReason {
    ParametersUpdated,
    IncomingConnectionsUpdated,
    PinnedDataUpdated,
    UpstreamDirty,
}

impl DirtinessReason {
    pub const ALL: [DirtinessReason; 4] = [
        DirtinessReason::ParametersUpdated,
        DirtinessReason::IncomingConnectionsUpdated,
        DirtinessReason::PinnedDataUpdated,
        DirtinessReason::UpstreamDirty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirtinessReason::ParametersUpdated => "parameters-updated",
            DirtinessReason::IncomingConnectionsUpdated => "incoming-connections-updated",
            DirtinessReason::PinnedDataUpdated => "pinned-data-updated",
            DirtinessReason::UpstreamDirty => "upstream-dirty",
        }
    }
}

impl fmt::Display for DirtinessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirtinessReason {
    type Err = UnknownReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| UnknownReason(s.to_string()))
    }
}

/// Node name to dirtiness reason. A missing key means the node is not dirty.
///
/// Ordered by node name so that equal inputs always iterate and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirtinessMap(BTreeMap<String, DirtinessReason>);

impl DirtinessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &str) -> Option<DirtinessReason> {
        self.0.get(node).copied()
    }

    pub fn is_dirty(&self, node: &str) -> bool {
        self.0.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DirtinessReason)> {
        self.0.iter().map(|(name, reason)| (name.as_str(), *reason))
    }

    /// Names of the nodes carrying `reason`, sorted.
    pub fn by_reason(&self, reason: DirtinessReason) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| *r == reason)
            .map(|(name, _)| name)
            .collect()
    }
}

impl<'a> IntoIterator for &'a DirtinessMap {
    type Item = (&'a String, &'a DirtinessReason);
    type IntoIter = btree_map::Iter<'a, String, DirtinessReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for DirtinessMap {
    type Item = (String, DirtinessReason);
    type IntoIter = btree_map::IntoIter<String, DirtinessReason>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, DirtinessReason)> for DirtinessMap {
    fn from_iter<T: IntoIterator<Item = (String, DirtinessReason)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
