use super::definition::{ConnectionDefinition, NodeDefinition, NodeMetadata, Timestamp};
use super::graph::ConnectionIndex;
use crate::error::SnapshotError;
use crate::history::{HistoryEntry, UndoStack};
use ahash::{AHashMap, AHashSet};

/// A read-only view of everything dirtiness depends on.
///
/// The graph store, the run-data cache and the undo history are owned elsewhere;
/// a snapshot copies what is needed so evaluation never reaches into shared state.
#[derive(Debug, Clone)]
pub struct WorkflowSnapshot {
    nodes: Vec<NodeDefinition>,
    connections: ConnectionIndex,
    run_started_at: AHashMap<String, Timestamp>,
    metadata: AHashMap<String, NodeMetadata>,
    history: Vec<HistoryEntry>,
}

impl WorkflowSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Nodes in the order they were added.
    pub fn nodes(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    pub fn connections(&self) -> &ConnectionIndex {
        &self.connections
    }

    /// Start time of the node's own last successful run, if it has one.
    pub fn run_started_at(&self, node: &str) -> Option<Timestamp> {
        self.run_started_at.get(node).copied().filter(|at| *at > 0)
    }

    pub fn metadata(&self, node: &str) -> Option<&NodeMetadata> {
        self.metadata.get(node)
    }

    /// The undo stack, oldest entry first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn parameters_last_update(&self, node: &str) -> Option<Timestamp> {
        self.metadata(node)?.parameters_last_updated_at
    }

    /// The latest pinned-data change that affects what `node` computes.
    ///
    /// That is the later of the node's own pin removal and any replacement of
    /// pinned data on one of its main-connection sources.
    pub fn pinned_data_last_update(&self, node: &str) -> Option<Timestamp> {
        let removed = self
            .metadata(node)
            .and_then(|meta| meta.pinned_data_last_removed_at);

        let upstream_updated = self
            .connections
            .incoming_main(node)
            .iter()
            .filter_map(|source| self.metadata(source)?.pinned_data_last_updated_at)
            .max();

        removed.max(upstream_updated)
    }
}

/// Assembles a `WorkflowSnapshot` and checks the caller contract.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    nodes: Vec<NodeDefinition>,
    connections: Vec<ConnectionDefinition>,
    run_started_at: AHashMap<String, Timestamp>,
    metadata: AHashMap<String, NodeMetadata>,
    history: Vec<HistoryEntry>,
}

impl SnapshotBuilder {
    pub fn node(mut self, node: NodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeDefinition>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn connection(mut self, connection: ConnectionDefinition) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn connections(
        mut self,
        connections: impl IntoIterator<Item = ConnectionDefinition>,
    ) -> Self {
        self.connections.extend(connections);
        self
    }

    /// Records the start time of the node's latest run. A later call overrides an earlier one.
    pub fn run_started_at(mut self, node: impl Into<String>, at: Timestamp) -> Self {
        self.run_started_at.insert(node.into(), at);
        self
    }

    pub fn metadata(mut self, node: impl Into<String>, metadata: NodeMetadata) -> Self {
        self.metadata.insert(node.into(), metadata);
        self
    }

    pub fn history(mut self, history: &UndoStack) -> Self {
        self.history = history.entries().to_vec();
        self
    }

    pub fn history_entries(mut self, entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        self.history.extend(entries);
        self
    }

    pub fn build(self) -> Result<WorkflowSnapshot, SnapshotError> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if node.name.is_empty() {
                return Err(SnapshotError::EmptyNodeName);
            }
            if !seen.insert(node.name.as_str()) {
                return Err(SnapshotError::DuplicateNode(node.name.clone()));
            }
        }

        // Connections to unknown nodes have no effect anywhere.
        let connections: Vec<ConnectionDefinition> = self
            .connections
            .into_iter()
            .filter(|c| seen.contains(c.source.as_str()) && seen.contains(c.destination.as_str()))
            .collect();

        Ok(WorkflowSnapshot {
            connections: ConnectionIndex::new(&connections),
            nodes: self.nodes,
            run_started_at: self.run_started_at,
            metadata: self.metadata,
            history: self.history,
        })
    }
}
