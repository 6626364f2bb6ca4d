use thiserror::Error;

/// Errors raised when a snapshot is assembled with inputs that break the caller contract.
///
/// Dangling references (connections, run data or history entries naming unknown nodes)
/// are not errors; they are tolerated and never match anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Node '{0}' is defined more than once in the workflow snapshot")]
    DuplicateNode(String),

    #[error("A node in the workflow snapshot has an empty name")]
    EmptyNodeName,
}

/// Errors that can occur when converting a custom editor format into a `WorkflowSnapshot`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    Validation(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors that can occur while loading a workflow state dump from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read workflow state: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse workflow state JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to convert workflow state: {0}")]
    Conversion(#[from] ConversionError),
}

/// Returned when parsing a string that names no dirtiness reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dirtiness reason: '{0}'")]
pub struct UnknownReason(pub String);
