use crate::dirtiness::DirtinessReason;
use crate::history::affects;
use crate::workflow::{Timestamp, WorkflowSnapshot};

/// A reason a node can be dirty on its own, independent of its neighbours.
#[derive(Clone, Copy)]
pub struct DirectRule {
    pub reason: DirtinessReason,
    predicate: fn(&WorkflowSnapshot, &str, Timestamp) -> bool,
}

impl DirectRule {
    pub fn applies(&self, snapshot: &WorkflowSnapshot, node: &str, run_at: Timestamp) -> bool {
        (self.predicate)(snapshot, node, run_at)
    }
}

/// Direct rules in precedence order. The first rule that applies decides the reason.
pub const DIRECT_RULES: [DirectRule; 3] = [
    DirectRule {
        reason: DirtinessReason::ParametersUpdated,
        predicate: parameters_updated,
    },
    DirectRule {
        reason: DirtinessReason::IncomingConnectionsUpdated,
        predicate: incoming_connections_updated,
    },
    DirectRule {
        reason: DirtinessReason::PinnedDataUpdated,
        predicate: pinned_data_updated,
    },
];

/// The first direct reason that applies to `node`, if any.
pub fn direct_reason(
    snapshot: &WorkflowSnapshot,
    node: &str,
    run_at: Timestamp,
) -> Option<DirtinessReason> {
    DIRECT_RULES
        .iter()
        .find(|rule| rule.applies(snapshot, node, run_at))
        .map(|rule| rule.reason)
}

fn parameters_updated(snapshot: &WorkflowSnapshot, node: &str, run_at: Timestamp) -> bool {
    snapshot
        .parameters_last_update(node)
        .is_some_and(|at| at > run_at)
}

fn incoming_connections_updated(
    snapshot: &WorkflowSnapshot,
    node: &str,
    run_at: Timestamp,
) -> bool {
    let incoming = snapshot.connections().incoming_main(node);
    let has_run = |source: &str| snapshot.run_started_at(source).is_some();
    snapshot
        .history()
        .iter()
        .any(|entry| affects(entry, node, run_at, incoming, &has_run))
}

fn pinned_data_updated(snapshot: &WorkflowSnapshot, node: &str, run_at: Timestamp) -> bool {
    snapshot
        .pinned_data_last_update(node)
        .is_some_and(|at| at > run_at)
}
