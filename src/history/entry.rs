use crate::workflow::Timestamp;
use serde::{Deserialize, Serialize};

/// A reversible structural edit, as recorded by the editor's undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    AddNode { node: String },
    RemoveNode { node: String },
    AddConnection { source: String, destination: String },
    RemoveConnection { source: String, destination: String },
    ToggleDisabled { node: String },
    /// Several edits recorded as one undoable step.
    Bulk { entries: Vec<HistoryEntry> },
}

/// A timestamped history command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: Timestamp,
    #[serde(flatten)]
    pub command: Command,
}

impl HistoryEntry {
    pub fn new(at: Timestamp, command: Command) -> Self {
        Self { at, command }
    }

    pub fn add_node(at: Timestamp, node: impl Into<String>) -> Self {
        Self::new(at, Command::AddNode { node: node.into() })
    }

    pub fn remove_node(at: Timestamp, node: impl Into<String>) -> Self {
        Self::new(at, Command::RemoveNode { node: node.into() })
    }

    pub fn add_connection(
        at: Timestamp,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self::new(
            at,
            Command::AddConnection {
                source: source.into(),
                destination: destination.into(),
            },
        )
    }

    pub fn remove_connection(
        at: Timestamp,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self::new(
            at,
            Command::RemoveConnection {
                source: source.into(),
                destination: destination.into(),
            },
        )
    }

    pub fn toggle_disabled(at: Timestamp, node: impl Into<String>) -> Self {
        Self::new(at, Command::ToggleDisabled { node: node.into() })
    }

    pub fn bulk(at: Timestamp, entries: Vec<HistoryEntry>) -> Self {
        Self::new(at, Command::Bulk { entries })
    }
}
