use std::sync::Arc;

use crate::action::Action;
use crate::ids::NodeId;
use crate::node::{default_root, Node};
use crate::reducers::{self, Reduction};
use crate::timeline::Timeline;
use crate::traits::{ChangeListener, NoopListener, NoopSelection, SelectionSink};
use crate::walker;

#[cfg(feature = "serde")]
use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction-time options for a [`MindmapStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StoreConfig {
    /// Ignore every dispatch while set.
    pub readonly: bool,
    /// First snapshot of the history. Falls back to the built-in sample document.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub root: Option<Node>,
}

impl StoreConfig {
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_root(mut self, root: Node) -> Self {
        self.root = Some(root);
        self
    }
}

#[cfg(feature = "serde")]
impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidPayload(format!("store config: {e}")))
    }
}

/// What a dispatch did. The change listener runs for every outcome except `ReadOnly` and
/// `Rejected`, so this is the only way to tell an edit from an attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// A new snapshot was recorded, or undo/redo moved the cursor.
    Applied,
    /// The action referenced nothing it could act on, or the cursor was already at the end.
    Unchanged,
    /// Read-only mode; nothing ran.
    ReadOnly,
    /// A string-keyed dispatch named a reserved or unknown action.
    Rejected,
}

impl DispatchOutcome {
    fn moved(moved: bool) -> Self {
        if moved {
            DispatchOutcome::Applied
        } else {
            DispatchOutcome::Unchanged
        }
    }
}

/// Session state of one editor: the snapshot history, its hooks, and the read-only flag.
///
/// All mutation goes through [`MindmapStore::dispatch`]; readers only ever see the tree at the
/// history cursor.
pub struct MindmapStore<L = NoopListener, S = NoopSelection>
where
    L: ChangeListener,
    S: SelectionSink,
{
    timeline: Timeline,
    readonly: bool,
    listener: L,
    selection: S,
}

impl MindmapStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_hooks(config, NoopListener, NoopSelection)
    }
}

impl Default for MindmapStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<L, S> MindmapStore<L, S>
where
    L: ChangeListener,
    S: SelectionSink,
{
    pub fn with_hooks(config: StoreConfig, listener: L, selection: S) -> Self {
        let root = config.root.unwrap_or_else(default_root);
        tracing::debug!(root = %root.id, readonly = config.readonly, "mindmap store initialized");
        Self {
            timeline: Timeline::new(root),
            readonly: config.readonly,
            listener,
            selection,
        }
    }

    /// Apply `action` to the current tree.
    ///
    /// Edits record the new tree as a snapshot; undo and redo only move the cursor. The change
    /// listener sees the current tree afterwards, even when nothing changed.
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        if self.readonly {
            tracing::trace!(action = %action.name(), "read-only store, dispatch ignored");
            return DispatchOutcome::ReadOnly;
        }
        let name = action.name();
        tracing::debug!(action = %name, "dispatch action");

        let outcome = match action {
            Action::Undo => DispatchOutcome::moved(self.timeline.undo()),
            Action::Redo => DispatchOutcome::moved(self.timeline.redo()),
            Action::AppendChild { parent_id, node } => {
                self.commit(|tree| reducers::append_child(tree, &parent_id, node))
            }
            Action::DeleteNode { id } => self.commit(|tree| reducers::delete_node(tree, &id)),
            Action::UpdateNode { id, patch } => {
                self.commit(|tree| reducers::update_node(tree, &id, patch))
            }
        };
        if outcome == DispatchOutcome::Unchanged {
            tracing::trace!(action = %name, "dispatch left the tree unchanged");
        }

        self.listener.on_change(self.timeline.current());
        outcome
    }

    /// Dispatch by action name with a JSON payload, the shape a JS view layer speaks.
    ///
    /// Unknown or reserved names are logged and dropped without notifying the listener. A payload
    /// that does not decode is an invalid reference: nothing is recorded, the listener still runs.
    #[cfg(feature = "serde")]
    pub fn dispatch_named(&mut self, name: &str, payload: serde_json::Value) -> DispatchOutcome {
        if self.readonly {
            return DispatchOutcome::ReadOnly;
        }
        match Action::from_parts(name, payload) {
            Ok(action) => self.dispatch(action),
            Err(err @ Error::ReservedAction(_)) => {
                tracing::warn!(%err, "internal history action must not be dispatched from outside the store");
                DispatchOutcome::Rejected
            }
            Err(err @ Error::InvalidPayload(_)) => {
                tracing::debug!(%err, "dispatch payload ignored");
                self.listener.on_change(self.timeline.current());
                DispatchOutcome::Unchanged
            }
            Err(err) => {
                tracing::warn!(%err, "dispatch rejected");
                DispatchOutcome::Rejected
            }
        }
    }

    /// Tree at the history cursor.
    pub fn current_tree(&self) -> &Arc<Node> {
        self.timeline.current()
    }

    /// Look up a node of the current tree by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        walker::find_node(self.timeline.current(), id)
    }

    /// Evaluate `projection` against the current tree.
    pub fn select<P>(&self, projection: impl FnOnce(&Node) -> P) -> P {
        projection(self.timeline.current())
    }

    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.timeline.len()
    }

    pub fn cursor(&self) -> usize {
        self.timeline.cursor()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// End the session, handing back the tree the editor was showing.
    pub fn teardown(self) -> Arc<Node> {
        tracing::debug!(snapshots = self.timeline.len(), "mindmap store torn down");
        Arc::clone(self.timeline.current())
    }

    /// Reduce a copy of the current tree and record it on success.
    fn commit(&mut self, reduce: impl FnOnce(&mut Node) -> Option<Reduction>) -> DispatchOutcome {
        let mut working = Node::clone(self.timeline.current());
        let Some(reduction) = reduce(&mut working) else {
            return DispatchOutcome::Unchanged;
        };
        self.timeline.save(working);
        if let Some(id) = reduction.selection {
            self.selection.select_node(&id);
        }
        DispatchOutcome::Applied
    }
}
