use crate::workflow::{Timestamp, WorkflowSnapshot};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use tracing::trace;

/// Returns the latest time at which `node`'s work is considered done, or `0` if never.
///
/// A node reached through a non-main connection runs as part of the node it feeds, so
/// its effective run time is the latest own run start of every node reachable from it
/// along non-main connections, itself included. Cycles add nothing new.
pub fn effective_run_time<'a>(snapshot: &'a WorkflowSnapshot, node: &'a str) -> Timestamp {
    let mut seen: AHashSet<&'a str> = AHashSet::new();
    let mut queue: VecDeque<&'a str> = VecDeque::new();
    seen.insert(node);
    queue.push_back(node);

    let mut latest = 0;
    while let Some(current) = queue.pop_front() {
        latest = latest.max(snapshot.run_started_at(current).unwrap_or(0));
        for host in snapshot.connections().outgoing_non_main(current) {
            if seen.insert(host.as_str()) {
                queue.push_back(host);
            }
        }
    }
    latest
}

/// Effective run times of every node in the snapshot.
///
/// Run records are visited latest first. Each one is handed backwards to every
/// sub-node that reaches it and has no value yet, so every node is resolved once.
pub(crate) fn resolve_run_times<'a>(
    snapshot: &'a WorkflowSnapshot,
) -> AHashMap<&'a str, Timestamp> {
    let mut sources: Vec<(&'a str, Timestamp)> = snapshot
        .nodes()
        .iter()
        .filter_map(|node| Some((node.name.as_str(), snapshot.run_started_at(&node.name)?)))
        .collect();
    sources.sort_by(|a, b| b.1.cmp(&a.1));

    let mut resolved: AHashMap<&'a str, Timestamp> =
        AHashMap::with_capacity(snapshot.nodes().len());
    let mut queue: VecDeque<&'a str> = VecDeque::new();

    for (source, at) in sources {
        if resolved.contains_key(source) {
            continue;
        }
        resolved.insert(source, at);
        queue.push_back(source);

        while let Some(host) = queue.pop_front() {
            for sub_node in snapshot.connections().incoming_non_main(host) {
                if resolved.contains_key(sub_node.as_str()) {
                    continue;
                }
                trace!(node = %sub_node, host, at, "run time inherited from host");
                resolved.insert(sub_node, at);
                queue.push_back(sub_node);
            }
        }
    }

    for node in snapshot.nodes() {
        resolved.entry(node.name.as_str()).or_insert(0);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{ConnectionDefinition, NodeDefinition};

    fn snapshot(
        nodes: &[&str],
        runs: &[(&str, Timestamp)],
        aux: &[(&str, &str)],
    ) -> WorkflowSnapshot {
        let mut builder = WorkflowSnapshot::builder()
            .nodes(nodes.iter().map(|n| NodeDefinition::new(*n)))
            .connections(
                aux.iter()
                    .map(|(from, to)| ConnectionDefinition::auxiliary(*from, "ai_tool", *to)),
            );
        for (node, at) in runs {
            builder = builder.run_started_at(*node, *at);
        }
        builder.build().unwrap()
    }

    #[test]
    fn sub_node_inherits_latest_host_run() {
        let snap = snapshot(
            &["tool", "agent", "other"],
            &[("agent", 50), ("other", 70)],
            &[("tool", "agent"), ("tool", "other")],
        );
        assert_eq!(effective_run_time(&snap, "tool"), 70);
        assert_eq!(effective_run_time(&snap, "agent"), 50);
    }

    #[test]
    fn own_run_wins_when_later_than_host() {
        let snap = snapshot(
            &["tool", "agent"],
            &[("tool", 90), ("agent", 50)],
            &[("tool", "agent")],
        );
        assert_eq!(effective_run_time(&snap, "tool"), 90);
    }

    #[test]
    fn cycles_terminate() {
        let snap = snapshot(&["x", "y"], &[("y", 40)], &[("x", "y"), ("y", "x")]);
        assert_eq!(effective_run_time(&snap, "x"), 40);
        assert_eq!(effective_run_time(&snap, "y"), 40);

        let self_loop = snapshot(&["s"], &[], &[("s", "s")]);
        assert_eq!(effective_run_time(&self_loop, "s"), 0);
    }

    #[test]
    fn whole_graph_pass_matches_single_queries() {
        let snap = snapshot(
            &["a", "b", "c", "d", "e"],
            &[("d", 30), ("b", 10), ("e", 50)],
            &[("a", "b"), ("b", "c"), ("c", "b"), ("c", "d")],
        );
        let all = resolve_run_times(&snap);
        assert_eq!(all.len(), 5);
        for node in ["a", "b", "c", "d", "e"] {
            assert_eq!(all[node], effective_run_time(&snap, node), "{}", node);
        }
        assert_eq!(all["a"], 30);
        assert_eq!(all["e"], 50);
    }

    #[test]
    fn dense_sub_node_cycles_resolve_every_node() {
        let names: Vec<String> = (0..40).map(|i| format!("n{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str)> = refs
            .iter()
            .flat_map(|from| refs.iter().filter(move |to| *to != from).map(move |to| (*from, *to)))
            .collect();
        let snap = snapshot(&refs, &[("n0", 7)], &edges);

        let all = resolve_run_times(&snap);
        assert!(refs.iter().all(|node| all[node] == 7));
        assert_eq!(effective_run_time(&snap, "n39"), 7);
    }

    #[test]
    fn dangling_hosts_are_ignored() {
        let snap = snapshot(&["tool"], &[("tool", 5)], &[("tool", "ghost")]);
        assert_eq!(effective_run_time(&snap, "tool"), 5);
    }
}
