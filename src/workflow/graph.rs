use super::definition::ConnectionDefinition;
use ahash::AHashMap;

/// Connection lookups in both directions, split by main and non-main edges.
///
/// Built once per snapshot. Every list is deduplicated and keeps the order in
/// which connections were first seen; unknown node names yield empty slices.
#[derive(Debug, Clone, Default)]
pub struct ConnectionIndex {
    incoming_main: AHashMap<String, Vec<String>>,
    outgoing_main: AHashMap<String, Vec<String>>,
    incoming_non_main: AHashMap<String, Vec<String>>,
    outgoing_non_main: AHashMap<String, Vec<String>>,
}

impl ConnectionIndex {
    pub fn new(connections: &[ConnectionDefinition]) -> Self {
        let mut index = Self::default();

        for connection in connections {
            let (incoming, outgoing) = if connection.source_type.is_main() {
                (&mut index.incoming_main, &mut index.outgoing_main)
            } else {
                (&mut index.incoming_non_main, &mut index.outgoing_non_main)
            };
            push_unique(incoming, &connection.destination, &connection.source);
            push_unique(outgoing, &connection.source, &connection.destination);
        }

        index
    }

    /// Sources of main connections ending at `node`.
    pub fn incoming_main(&self, node: &str) -> &[String] {
        lookup(&self.incoming_main, node)
    }

    /// Destinations of main connections leaving `node`.
    pub fn outgoing_main(&self, node: &str) -> &[String] {
        lookup(&self.outgoing_main, node)
    }

    /// Sub-nodes attached to `node` through non-main connections.
    pub fn incoming_non_main(&self, node: &str) -> &[String] {
        lookup(&self.incoming_non_main, node)
    }

    /// Hosts that `node` is executed as part of.
    pub fn outgoing_non_main(&self, node: &str) -> &[String] {
        lookup(&self.outgoing_non_main, node)
    }
}

fn lookup<'a>(map: &'a AHashMap<String, Vec<String>>, node: &str) -> &'a [String] {
    map.get(node).map(|v| v.as_slice()).unwrap_or(&[])
}

fn push_unique(map: &mut AHashMap<String, Vec<String>>, key: &str, value: &str) {
    let entries = map.entry(key.to_string()).or_default();
    if !entries.iter().any(|existing| existing == value) {
        entries.push(value.to_string());
    }
}
