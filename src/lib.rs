//! # Dirtiness - Incremental Staleness Engine for Workflow Graphs
//!
//! **Dirtiness** decides which previously executed nodes of a workflow graph have gone
//! stale, so that a partial re-run only recomputes what actually changed. It is a pure,
//! read-only derivation: it never executes, mutates or persists anything, and it is
//! cheap enough to recompute on every change of the stores it reads.
//!
//! ## Core Workflow
//!
//! 1.  **Snapshot Your State**: Copy the graph, the run data, node edit times and the undo
//!     history into a `WorkflowSnapshot`, either with `WorkflowSnapshot::builder()` or by
//!     implementing `IntoSnapshot` for your own editor format.
//! 2.  **Evaluate**: Create an `Evaluator` from a `DirtinessConfig` and call `evaluate`.
//!     The result is a `DirtinessMap` holding at most one `DirtinessReason` per node.
//! 3.  **Render**: Highlight the nodes, feed them to a partial-execution planner, or print
//!     them with the `ReportFormatter`.
//!
//! A node is classified by the first reason that applies:
//!
//! | Reason                         | When                                                        |
//! |--------------------------------|-------------------------------------------------------------|
//! | `parameters-updated`           | its parameters were edited after it ran                     |
//! | `incoming-connections-updated` | an edge into it, or a main-connection parent, changed since |
//! | `pinned-data-updated`          | its pin was removed, or a parent's pinned data was replaced |
//! | `upstream-dirty`               | a sub-node it hosts, or a main-connection parent, is dirty  |
//!
//! ## Quick Start
//!
//! ```rust
//! use dirtiness::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut edited = NodeMetadata::default();
//!     edited.record_parameters_update(10_000);
//!
//!     let snapshot = WorkflowSnapshot::builder()
//!         .nodes(["a", "b", "c"].map(NodeDefinition::new))
//!         .connection(ConnectionDefinition::main("a", "b"))
//!         .connection(ConnectionDefinition::main("b", "c"))
//!         .run_started_at("a", 1_000)
//!         .run_started_at("b", 1_000)
//!         .run_started_at("c", 1_000)
//!         .metadata("b", edited)
//!         .build()?;
//!
//!     let evaluator = Evaluator::new(DirtinessConfig::default());
//!     let dirtiness = evaluator.evaluate(&snapshot);
//!
//!     assert_eq!(dirtiness.get("b"), Some(DirtinessReason::ParametersUpdated));
//!     assert_eq!(dirtiness.get("c"), Some(DirtinessReason::UpstreamDirty));
//!     assert!(!dirtiness.is_dirty("a"));
//!
//!     println!("{}", ReportFormatter::format_report(&dirtiness));
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod dirtiness;
pub mod error;
pub mod evaluator;
pub mod history;
pub mod prelude;
pub mod report;
pub mod settings;
pub mod workflow;
