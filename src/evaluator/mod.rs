use crate::dirtiness::{DirtinessMap, DirtinessReason};
use crate::settings::DirtinessConfig;
use crate::workflow::{Timestamp, WorkflowSnapshot};
use ahash::AHashMap;
use tracing::{debug, instrument};

mod propagation;
pub mod rules;
mod run_time;

use propagation::propagate_upstream_dirty;
use rules::direct_reason;
use run_time::resolve_run_times;

pub use rules::{DIRECT_RULES, DirectRule};
pub use run_time::effective_run_time;

/// Derives which executed nodes went stale since their last run.
///
/// An `Evaluator` holds no state between calls. Every call re-derives the map from the
/// snapshot, so it can be invoked as often as the surrounding stores change.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: DirtinessConfig,
}

impl Evaluator {
    pub fn new(config: DirtinessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirtinessConfig {
        &self.config
    }

    /// Classifies every node of the snapshot.
    ///
    /// 1. Nodes whose effective run time is `0` are skipped.
    /// 2. Every other node gets the first direct reason that applies: parameters,
    ///    then incoming connections, then pinned data.
    /// 3. Dirtiness then spreads as `upstream-dirty` to hosts of dirty sub-nodes and,
    ///    if enabled, to executed main-connection successors.
    ///
    /// Only nodes with a run record of their own appear in the result. A sub-node that
    /// merely inherits its host's run time can make the host dirty but is never listed.
    #[instrument(
        name = "dirtiness_evaluate",
        skip_all,
        fields(
            nodes = snapshot.nodes().len(),
            history = snapshot.history().len(),
        )
    )]
    pub fn evaluate(&self, snapshot: &WorkflowSnapshot) -> DirtinessMap {
        if !self.config.enabled {
            debug!("dirtiness disabled by partial execution settings");
            return DirtinessMap::new();
        }

        let run_times: AHashMap<&str, Timestamp> = resolve_run_times(snapshot);

        let mut dirty: AHashMap<&str, DirtinessReason> = AHashMap::new();
        for node in snapshot.nodes() {
            let name = node.name.as_str();
            let run_at = run_times.get(name).copied().unwrap_or(0);
            if run_at == 0 {
                continue;
            }
            if let Some(reason) = direct_reason(snapshot, name, run_at) {
                debug!(node = name, %reason, run_at, "node is dirty");
                dirty.insert(name, reason);
            }
        }

        propagate_upstream_dirty(
            snapshot,
            &run_times,
            &mut dirty,
            self.config.propagate_downstream,
        );

        let map: DirtinessMap = snapshot
            .nodes()
            .iter()
            .filter(|node| snapshot.run_started_at(&node.name).is_some())
            .filter_map(|node| {
                let reason = dirty.get(node.name.as_str())?;
                Some((node.name.clone(), *reason))
            })
            .collect();

        debug!(dirty = map.len(), "dirtiness evaluated");
        map
    }
}

/// Evaluates a snapshot once with the given configuration.
pub fn evaluate(config: &DirtinessConfig, snapshot: &WorkflowSnapshot) -> DirtinessMap {
    Evaluator::new(*config).evaluate(snapshot)
}
