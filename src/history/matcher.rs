use super::entry::{Command, HistoryEntry};
use crate::workflow::Timestamp;

/// Decides whether a history entry changed the incoming connections of `node`.
///
/// Entries recorded before `run_at` are ignored; an edit sharing the run's
/// millisecond still counts.
///
/// * Connection edits count when the connection ends at `node`.
/// * Adding or removing a node counts when that node is a main-connection source
///   of `node`. Sub-node changes surface through the effective run time instead.
/// * Toggling a main-connection source counts only if `has_run` says the source has
///   a run record. A source that was disabled during the run never fed `node`, so
///   enabling it again changes nothing that was computed.
/// * Bulk entries count when any nested entry counts.
pub fn affects(
    entry: &HistoryEntry,
    node: &str,
    run_at: Timestamp,
    incoming_main: &[String],
    has_run: &dyn Fn(&str) -> bool,
) -> bool {
    if entry.at < run_at {
        return false;
    }

    match &entry.command {
        Command::AddConnection { destination, .. }
        | Command::RemoveConnection { destination, .. } => destination == node,
        Command::AddNode { node: target } | Command::RemoveNode { node: target } => {
            incoming_main.iter().any(|source| source == target)
        }
        Command::ToggleDisabled { node: target } => {
            has_run(target.as_str()) && incoming_main.iter().any(|source| source == target)
        }
        Command::Bulk { entries } => entries
            .iter()
            .any(|nested| affects(nested, node, run_at, incoming_main, has_run)),
    }
}
