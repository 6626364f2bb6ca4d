use super::snapshot::WorkflowSnapshot;
use crate::error::ConversionError;

/// A trait for editor-specific state formats that can be turned into a `WorkflowSnapshot`.
///
/// This is the seam between the stores that own the workflow and the engine. Implement it
/// on whatever structure your editor keeps, and the evaluator never has to know about it.
///
/// # Example
///
/// ```rust
/// use dirtiness::prelude::*;
/// use dirtiness::error::ConversionError;
///
/// struct Canvas {
///     steps: Vec<(String, Option<u64>)>,
///     links: Vec<(String, String)>,
/// }
///
/// impl IntoSnapshot for Canvas {
///     fn into_snapshot(self) -> std::result::Result<WorkflowSnapshot, ConversionError> {
///         let mut builder = WorkflowSnapshot::builder();
///         for (name, ran_at) in self.steps {
///             if let Some(at) = ran_at {
///                 builder = builder.run_started_at(name.clone(), at);
///             }
///             builder = builder.node(NodeDefinition::new(name));
///         }
///         for (from, to) in self.links {
///             builder = builder.connection(ConnectionDefinition::main(from, to));
///         }
///         Ok(builder.build()?)
///     }
/// }
///
/// let canvas = Canvas {
///     steps: vec![("a".into(), Some(1_000)), ("b".into(), Some(1_000))],
///     links: vec![("a".into(), "b".into())],
/// };
/// let snapshot = canvas.into_snapshot().unwrap();
/// assert!(evaluate(&DirtinessConfig::default(), &snapshot).is_empty());
/// ```
pub trait IntoSnapshot {
    /// Consumes the object and converts it into a snapshot the evaluator can read.
    fn into_snapshot(self) -> Result<WorkflowSnapshot, ConversionError>;
}

impl IntoSnapshot for WorkflowSnapshot {
    fn into_snapshot(self) -> Result<WorkflowSnapshot, ConversionError> {
        Ok(self)
    }
}
