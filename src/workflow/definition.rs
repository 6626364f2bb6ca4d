use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch. `0` is reserved for "never happened".
pub type Timestamp = u64;

/// A single workflow step, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
}

impl NodeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The kind of an edge between two nodes.
///
/// `Main` is ordinary data flow. Every other kind models a sub-node that is
/// executed as part of the node it feeds (a tool or a model attached to an agent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionType {
    Main,
    Auxiliary(String),
}

impl ConnectionType {
    pub const MAIN: &'static str = "main";

    pub fn is_main(&self) -> bool {
        matches!(self, ConnectionType::Main)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConnectionType::Main => Self::MAIN,
            ConnectionType::Auxiliary(name) => name,
        }
    }
}

impl From<String> for ConnectionType {
    fn from(value: String) -> Self {
        if value == Self::MAIN {
            ConnectionType::Main
        } else {
            ConnectionType::Auxiliary(value)
        }
    }
}

impl From<&str> for ConnectionType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ConnectionType> for String {
    fn from(value: ConnectionType) -> Self {
        match value {
            ConnectionType::Main => ConnectionType::MAIN.to_string(),
            ConnectionType::Auxiliary(name) => name,
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge `source --[source_type]--> destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDefinition {
    pub source: String,
    pub source_type: ConnectionType,
    pub destination: String,
}

impl ConnectionDefinition {
    pub fn main(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            source_type: ConnectionType::Main,
            destination: destination.into(),
        }
    }

    pub fn auxiliary(
        source: impl Into<String>,
        connection_type: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            source_type: ConnectionType::from(connection_type.into()),
            destination: destination.into(),
        }
    }
}

/// What happened to a node's pinned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinnedDataEvent {
    /// The node's current output was pinned as-is.
    Pinned,
    /// Existing pinned data was replaced with something else.
    Updated,
    /// The pin was dropped, so the node has to produce its output again.
    Removed,
}

/// Per-node edit bookkeeping kept by the graph store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_last_updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_data_last_updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_data_last_removed_at: Option<Timestamp>,
}

impl NodeMetadata {
    pub fn record_parameters_update(&mut self, at: Timestamp) {
        self.parameters_last_updated_at = Some(at);
    }

    /// Records a pin change.
    ///
    /// Pinning the output a node already produced changes nothing for its consumers,
    /// so `Pinned` leaves the metadata untouched.
    pub fn record_pinned_data(&mut self, event: PinnedDataEvent, at: Timestamp) {
        match event {
            PinnedDataEvent::Pinned => {}
            PinnedDataEvent::Updated => self.pinned_data_last_updated_at = Some(at),
            PinnedDataEvent::Removed => self.pinned_data_last_removed_at = Some(at),
        }
    }
}
