use crate::dirtiness::DirtinessReason;
use crate::workflow::{Timestamp, WorkflowSnapshot};
use ahash::AHashMap;
use std::collections::VecDeque;

/// Spreads `upstream-dirty` from every dirty node until nothing changes.
///
/// A dirty node marks the hosts it is executed as part of and, when `downstream` is set,
/// its main-connection successors. Only nodes with an effective run time that are not
/// already dirty get marked, so each node is queued at most once even on cyclic graphs.
pub(super) fn propagate_upstream_dirty<'a>(
    snapshot: &'a WorkflowSnapshot,
    run_times: &AHashMap<&'a str, Timestamp>,
    dirty: &mut AHashMap<&'a str, DirtinessReason>,
    downstream: bool,
) {
    let mut queue: VecDeque<&'a str> = snapshot
        .nodes()
        .iter()
        .map(|node| node.name.as_str())
        .filter(|name| dirty.contains_key(name))
        .collect();

    while let Some(node) = queue.pop_front() {
        let connections = snapshot.connections();
        let hosts = connections.outgoing_non_main(node).iter();
        let successors: &[String] = if downstream {
            connections.outgoing_main(node)
        } else {
            &[]
        };

        for next in hosts.chain(successors.iter()) {
            let next = next.as_str();
            let has_run = run_times.get(next).is_some_and(|at| *at > 0);
            if !has_run || dirty.contains_key(next) {
                continue;
            }
            dirty.insert(next, DirtinessReason::UpstreamDirty);
            queue.push_back(next);
        }
    }
}
