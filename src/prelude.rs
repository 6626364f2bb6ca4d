//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build a snapshot, evaluate it and read the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtiness::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let state = WorkflowState::from_file("path/to/workflow_state.json")?;
//! let config = state.config();
//! let snapshot = state.into_snapshot()?;
//!
//! let dirtiness = Evaluator::new(config).evaluate(&snapshot);
//! println!("{}", ReportFormatter::format_report(&dirtiness));
//! # Ok(())
//! # }
//! ```

// Evaluation
pub use crate::evaluator::{Evaluator, effective_run_time, evaluate};
pub use crate::settings::{DirtinessConfig, PartialExecutionSettings};

// Results
pub use crate::dirtiness::{DirtinessMap, DirtinessReason};

// Inputs
pub use crate::data::WorkflowState;
pub use crate::history::{Command, HistoryEntry, UndoStack, affects};
pub use crate::workflow::{
    ConnectionDefinition, ConnectionType, IntoSnapshot, NodeDefinition, NodeMetadata,
    PinnedDataEvent, Timestamp, WorkflowSnapshot,
};

// Error types
pub use crate::error::{ConversionError, LoadError, SnapshotError};

// Report formatting
pub use crate::report::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
