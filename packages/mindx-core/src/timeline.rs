use std::sync::Arc;

use crate::error::{Error, Result};
use crate::node::Node;

/// Linear undo/redo history of tree snapshots.
///
/// Invariants: never empty, `cursor < snapshots.len()`, and a snapshot is never edited once
/// pushed. New writes discard everything after the cursor.
#[derive(Clone, Debug)]
pub struct Timeline {
    snapshots: Vec<Arc<Node>>,
    cursor: usize,
}

impl Timeline {
    pub fn new(seed: Node) -> Self {
        Self {
            snapshots: vec![Arc::new(seed)],
            cursor: 0,
        }
    }

    /// Tree at the cursor.
    pub fn current(&self) -> &Arc<Node> {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: a timeline always holds its seed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Append a snapshot after the cursor, dropping any redo states, and move onto it.
    ///
    /// Only the dispatch pipeline may grow the history.
    pub(crate) fn save(&mut self, tree: Node) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::new(tree));
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        let previous = self.cursor;
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor != previous
    }

    /// Step forward one snapshot. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        let previous = self.cursor;
        self.cursor = (self.cursor + 1).min(self.snapshots.len() - 1);
        self.cursor != previous
    }

    /// Intended for tests and debugging.
    pub fn validate_invariants(&self) -> Result<()> {
        if self.snapshots.is_empty() {
            return Err(Error::InconsistentState("timeline is empty".into()));
        }
        if self.cursor >= self.snapshots.len() {
            return Err(Error::InconsistentState(format!(
                "cursor {} out of range for {} snapshots",
                self.cursor,
                self.snapshots.len()
            )));
        }
        Ok(())
    }
}
