pub mod conversion;
pub mod definition;
pub mod graph;
pub mod snapshot;

pub use conversion::*;
pub use definition::*;
pub use graph::ConnectionIndex;
pub use snapshot::*;
