use super::entry::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Undo/redo bookkeeping for history entries.
///
/// Only the undo side is an input to dirtiness: an undone edit no longer counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoStack {
    #[serde(default)]
    undo_stack: Vec<HistoryEntry>,
    #[serde(default)]
    redo_stack: Vec<HistoryEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a freshly performed edit. Any redoable entries are discarded.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(entry);
        self.redo_stack.last()
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(entry);
        self.undo_stack.last()
    }

    /// The undo stack, oldest entry first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for UndoStack {
    fn from(undo_stack: Vec<HistoryEntry>) -> Self {
        Self {
            undo_stack,
            redo_stack: Vec::new(),
        }
    }
}
