use std::sync::Arc;

use crate::ids::NodeId;
use crate::node::Node;

/// Observer notified after every dispatch that was not blocked by read-only mode.
pub trait ChangeListener {
    fn on_change(&mut self, tree: &Arc<Node>);
}

/// Hook into the editor's selection state. Called only after a successful delete.
pub trait SelectionSink {
    fn select_node(&mut self, id: &NodeId);
}

impl<F> ChangeListener for F
where
    F: FnMut(&Arc<Node>),
{
    fn on_change(&mut self, tree: &Arc<Node>) {
        self(tree)
    }
}

impl<F> SelectionSink for F
where
    F: FnMut(&NodeId),
{
    fn select_node(&mut self, id: &NodeId) {
        self(id)
    }
}

/// Listener that ignores every change.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl ChangeListener for NoopListener {
    fn on_change(&mut self, _tree: &Arc<Node>) {}
}

/// Selection sink for hosts without a selection store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSelection;

impl SelectionSink for NoopSelection {
    fn select_node(&mut self, _id: &NodeId) {}
}
