//! Common test utilities for building workflow snapshots from diagrams.
#![allow(dead_code)]

use dirtiness::prelude::*;
use std::collections::{HashMap, HashSet};

/// 2025-01-01T00:00:01Z
pub const NODE_RUN_AT: Timestamp = 1_735_689_601_000;
/// 2025-01-01T00:00:10Z
pub const WORKFLOW_UPDATED_AT: Timestamp = 1_735_689_610_000;

/// Connection type used for edges leaving a sub-node in diagrams.
pub const SUB_NODE_CONNECTION: &str = "ai_agent";

/// A small stand-in for the editor stores, driven by a clock the test controls.
///
/// Every edit is stamped with `now`, and structural edits are recorded on the undo stack
/// the way the canvas would record them.
pub struct TestWorkflow {
    nodes: Vec<NodeDefinition>,
    connections: Vec<ConnectionDefinition>,
    runs: HashMap<String, Timestamp>,
    metadata: HashMap<String, NodeMetadata>,
    pinned: HashSet<String>,
    history: UndoStack,
    now: Timestamp,
}

impl TestWorkflow {
    /// Builds a workflow from a diagram and records a run at `NODE_RUN_AT`.
    ///
    /// Nodes are single characters. Comma or newline separates chains, `->` links nodes.
    ///
    /// * ✅: node with run data
    /// * 🚫: disabled node
    /// * 📌: node with pinned data
    /// * 🧠: sub-node; its outgoing edges are non-main
    ///
    /// The clock is left at `WORKFLOW_UPDATED_AT`, ready for edits.
    pub fn from_diagram(diagram: &str) -> Self {
        let mut workflow = Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            runs: HashMap::new(),
            metadata: HashMap::new(),
            pinned: HashSet::new(),
            history: UndoStack::new(),
            now: NODE_RUN_AT,
        };

        let chains = diagram
            .split(['\n', ','])
            .map(str::trim)
            .filter(|chain| !chain.is_empty());

        for chain in chains {
            let elements: Vec<&str> = chain.split("->").map(str::trim).collect();

            for element in &elements {
                let mut chars = element.chars();
                let name = chars.next().expect("diagram element without a name").to_string();
                let attributes: String = chars.collect();

                if !workflow.nodes.iter().any(|n| n.name == name) {
                    workflow
                        .nodes
                        .push(NodeDefinition::new(name.clone()).disabled(attributes.contains('🚫')));
                }
                if attributes.contains('✅') {
                    workflow.runs.insert(name.clone(), NODE_RUN_AT);
                }
                if attributes.contains('📌') {
                    workflow.pinned.insert(name.clone());
                }
            }

            for pair in elements.windows(2) {
                let from = name_of(pair[0]);
                let to = name_of(pair[1]);
                let connection = if pair[0].contains('🧠') {
                    ConnectionDefinition::auxiliary(from, SUB_NODE_CONNECTION, to)
                } else {
                    ConnectionDefinition::main(from, to)
                };
                workflow.connections.push(connection);
            }
        }

        workflow.now = WORKFLOW_UPDATED_AT;
        workflow
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn advance(&mut self, millis: Timestamp) {
        self.now += millis;
    }

    pub fn set_node_parameters(&mut self, node: &str) {
        let now = self.now;
        self.metadata_mut(node).record_parameters_update(now);
    }

    /// Pins data on a node. Replacing data that is already pinned counts as an update.
    pub fn pin_data(&mut self, node: &str) {
        let event = if self.pinned.insert(node.to_string()) {
            PinnedDataEvent::Pinned
        } else {
            PinnedDataEvent::Updated
        };
        let now = self.now;
        self.metadata_mut(node).record_pinned_data(event, now);
    }

    pub fn unpin_data(&mut self, node: &str) {
        if self.pinned.remove(node) {
            let now = self.now;
            self.metadata_mut(node)
                .record_pinned_data(PinnedDataEvent::Removed, now);
        }
    }

    pub fn record_run(&mut self, node: &str, at: Timestamp) {
        self.runs.insert(node.to_string(), at);
    }

    pub fn toggle_disabled(&mut self, node: &str) {
        if let Some(definition) = self.nodes.iter_mut().find(|n| n.name == node) {
            definition.disabled = !definition.disabled;
        }
        self.history
            .record(HistoryEntry::toggle_disabled(self.now, node));
    }

    pub fn create_connection(&mut self, from: &str, to: &str) {
        self.connections.push(ConnectionDefinition::main(from, to));
        self.history
            .record(HistoryEntry::add_connection(self.now, from, to));
    }

    /// Adds `node` on the existing main connection `from -> to`, like dropping a node on an edge.
    pub fn insert_node_between(&mut self, node: &str, from: &str, to: &str) {
        let now = self.now;
        self.nodes.push(NodeDefinition::new(node));
        self.connections
            .retain(|c| !(c.source == from && c.destination == to));
        self.connections.push(ConnectionDefinition::main(from, node));
        self.connections.push(ConnectionDefinition::main(node, to));

        self.history.record(HistoryEntry::bulk(
            now,
            vec![
                HistoryEntry::add_node(now, node),
                HistoryEntry::remove_connection(now, from, to),
                HistoryEntry::add_connection(now, from, node),
                HistoryEntry::add_connection(now, node, to),
            ],
        ));
    }

    /// Deletes a node. A single parent is reconnected to every child, as the canvas does.
    pub fn delete_node(&mut self, node: &str) {
        let now = self.now;
        let mut entries = Vec::new();

        let parents: Vec<String> = self
            .connections
            .iter()
            .filter(|c| c.destination == node && c.source_type.is_main())
            .map(|c| c.source.clone())
            .collect();
        let children: Vec<String> = self
            .connections
            .iter()
            .filter(|c| c.source == node && c.source_type.is_main())
            .map(|c| c.destination.clone())
            .collect();

        for connection in self
            .connections
            .iter()
            .filter(|c| c.source == node || c.destination == node)
        {
            entries.push(HistoryEntry::remove_connection(
                now,
                connection.source.clone(),
                connection.destination.clone(),
            ));
        }
        self.connections
            .retain(|c| c.source != node && c.destination != node);
        self.nodes.retain(|n| n.name != node);
        entries.push(HistoryEntry::remove_node(now, node));

        if let [parent] = parents.as_slice() {
            for child in &children {
                self.connections
                    .push(ConnectionDefinition::main(parent.clone(), child.clone()));
                entries.push(HistoryEntry::add_connection(now, parent.clone(), child.clone()));
            }
        }

        self.history.record(HistoryEntry::bulk(now, entries));
    }

    pub fn undo(&mut self) {
        let Some(entry) = self.history.undo().cloned() else {
            return;
        };
        if let Command::ToggleDisabled { node } = &entry.command {
            if let Some(definition) = self.nodes.iter_mut().find(|n| &n.name == node) {
                definition.disabled = !definition.disabled;
            }
        }
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let mut builder = WorkflowSnapshot::builder()
            .nodes(self.nodes.iter().cloned())
            .connections(self.connections.iter().cloned())
            .history(&self.history);
        for (node, at) in &self.runs {
            builder = builder.run_started_at(node.clone(), *at);
        }
        for (node, metadata) in &self.metadata {
            builder = builder.metadata(node.clone(), metadata.clone());
        }
        builder.build().expect("test workflow should form a valid snapshot")
    }

    /// Dirtiness with the default configuration.
    pub fn dirtiness(&self) -> DirtinessMap {
        self.dirtiness_with(DirtinessConfig::default())
    }

    /// Dirtiness with sub-node to host propagation only.
    pub fn legacy_dirtiness(&self) -> DirtinessMap {
        self.dirtiness_with(DirtinessConfig::default().with_downstream_propagation(false))
    }

    pub fn dirtiness_with(&self, config: DirtinessConfig) -> DirtinessMap {
        Evaluator::new(config).evaluate(&self.snapshot())
    }

    fn metadata_mut(&mut self, node: &str) -> &mut NodeMetadata {
        self.metadata.entry(node.to_string()).or_default()
    }
}

fn name_of(element: &str) -> String {
    element.chars().take(1).collect()
}

/// Builds an expected map from `(node, reason)` pairs.
pub fn expected(pairs: &[(&str, DirtinessReason)]) -> DirtinessMap {
    pairs
        .iter()
        .map(|(node, reason)| (node.to_string(), *reason))
        .collect()
}
