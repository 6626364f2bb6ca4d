pub mod entry;
pub mod matcher;
pub mod stack;

pub use entry::*;
pub use matcher::affects;
pub use stack::UndoStack;
