use crate::error::{ConversionError, LoadError};
use crate::history::HistoryEntry;
use crate::settings::{DirtinessConfig, PartialExecutionSettings};
use crate::workflow::{
    ConnectionDefinition, ConnectionType, IntoSnapshot, NodeDefinition, NodeMetadata, Timestamp,
    WorkflowSnapshot,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A dump of the editor stores, matching the JSON the CLI reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub nodes: Vec<NodeDefinition>,
    /// `source -> connection type -> output index -> targets`.
    #[serde(default)]
    pub connections: BTreeMap<String, BTreeMap<String, Vec<Option<Vec<ConnectionTarget>>>>>,
    #[serde(default)]
    pub run_data: AHashMap<String, Vec<TaskRun>>,
    #[serde(default)]
    pub node_metadata: AHashMap<String, NodeMetadata>,
    /// Undo stack, oldest entry first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub settings: EditorSettings,
}

/// One end of a connection as stored by the editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    #[serde(default)]
    pub index: u32,
}

/// A single recorded execution of a node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRun {
    pub start_time: Timestamp,
    #[serde(default)]
    pub execution_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    #[serde(default)]
    pub partial_execution: PartialExecutionSettings,
}

impl WorkflowState {
    /// Load a workflow state from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The evaluator configuration implied by the dumped settings.
    pub fn config(&self) -> DirtinessConfig {
        DirtinessConfig::from_settings(&self.settings.partial_execution)
    }

    /// Adds a connection in the editor's nested layout.
    pub fn connect(&mut self, connection: &ConnectionDefinition) {
        let outputs = self
            .connections
            .entry(connection.source.clone())
            .or_default()
            .entry(connection.source_type.to_string())
            .or_default();
        if outputs.is_empty() {
            outputs.push(Some(Vec::new()));
        }
        let targets = outputs[0].get_or_insert_with(Vec::new);
        targets.push(ConnectionTarget {
            node: connection.destination.clone(),
            connection_type: connection.source_type.clone(),
            index: 0,
        });
    }

    fn connection_definitions(&self) -> impl Iterator<Item = ConnectionDefinition> + '_ {
        self.connections.iter().flat_map(|(source, by_type)| {
            by_type.iter().flat_map(move |(connection_type, outputs)| {
                outputs
                    .iter()
                    .flatten()
                    .flatten()
                    .map(move |target| ConnectionDefinition {
                        source: source.clone(),
                        source_type: ConnectionType::from(connection_type.as_str()),
                        destination: target.node.clone(),
                    })
            })
        })
    }
}

impl IntoSnapshot for WorkflowState {
    fn into_snapshot(self) -> Result<WorkflowSnapshot, ConversionError> {
        let mut builder = WorkflowSnapshot::builder()
            .connections(self.connection_definitions().collect::<Vec<_>>())
            .history_entries(self.history)
            .nodes(self.nodes);

        for (node, runs) in self.run_data {
            // Only the first recorded run carries the start time that counts.
            if let Some(run) = runs.first() {
                builder = builder.run_started_at(node, run.start_time);
            }
        }
        for (node, metadata) in self.node_metadata {
            builder = builder.metadata(node, metadata);
        }

        Ok(builder.build()?)
    }
}
