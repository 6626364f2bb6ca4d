use crate::dirtiness::{DirtinessMap, DirtinessReason};
use itertools::Itertools;

/// Formats dirtiness maps into human-readable reports.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Groups dirty nodes by reason, in precedence order, one line per reason.
    pub fn format_report(map: &DirtinessMap) -> String {
        if map.is_empty() {
            return "No dirty nodes".to_string();
        }

        DirtinessReason::ALL
            .into_iter()
            .filter_map(|reason| {
                let nodes = map.by_reason(reason);
                if nodes.is_empty() {
                    return None;
                }
                Some(format!(
                    "{} ({}): {}",
                    reason,
                    nodes.len(),
                    nodes.join(", ")
                ))
            })
            .join("\n")
    }

    /// A single line like `3 dirty nodes (1 parameters-updated, 2 upstream-dirty)`.
    pub fn format_summary(map: &DirtinessMap) -> String {
        let noun = if map.len() == 1 { "node" } else { "nodes" };
        if map.is_empty() {
            return format!("0 dirty {}", noun);
        }

        let counts = map
            .iter()
            .map(|(_, reason)| reason)
            .counts()
            .into_iter()
            .sorted()
            .map(|(reason, count)| format!("{} {}", count, reason))
            .join(", ");
        format!("{} dirty {} ({})", map.len(), noun, counts)
    }
}
