//! Mutations over a working copy of the current tree.
//!
//! Each reducer returns `None` when the payload references nothing it can act on; the caller
//! must then record nothing. `Some` carries the follow-up effect the dispatch pipeline performs.

use crate::ids::{NodeId, Side};
use crate::node::{Node, NodePatch};
use crate::walker;

/// Follow-up effect of a successful reduction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Node the editor should select next.
    pub selection: Option<NodeId>,
}

/// Append `node` as the last attached child of `parent_id`.
///
/// Children of the root get a side that keeps both branches balanced.
pub fn append_child(root: &mut Node, parent_id: &NodeId, mut node: Node) -> Option<Reduction> {
    if parent_id.is_empty() || node.id.is_empty() {
        return None;
    }
    let is_root = root.id == *parent_id;
    let parent = walker::find_node_mut(root, parent_id)?;
    let siblings = parent.attached_mut();
    if is_root {
        let left = siblings
            .iter()
            .filter(|child| child.side == Some(Side::Left))
            .count();
        node.side = Some(Side::balanced(left, siblings.len()));
    }
    siblings.push(node);
    Some(Reduction::default())
}

/// Detach `id` from its parent and pick the node to select afterwards.
///
/// Selection prefers the sibling that slid into the removed slot, then the previous sibling,
/// then the parent.
pub fn delete_node(root: &mut Node, id: &NodeId) -> Option<Reduction> {
    if id.is_empty() {
        return None;
    }
    let parent = walker::find_parent_mut(root, id)?;
    let parent_id = parent.id.clone();
    let siblings = parent.attached_mut();
    let index = siblings.iter().position(|child| child.id == *id)?;
    siblings.remove(index);
    let siblings = &*siblings;

    let selection = siblings
        .get(index)
        .or_else(|| index.checked_sub(1).and_then(|prev| siblings.get(prev)))
        .map(|sibling| sibling.id.clone())
        .unwrap_or(parent_id);
    Some(Reduction {
        selection: Some(selection),
    })
}

/// Shallow-merge `patch` into the node with `id`.
pub fn update_node(root: &mut Node, id: &NodeId, patch: NodePatch) -> Option<Reduction> {
    if id.is_empty() {
        return None;
    }
    walker::find_node_mut(root, id)?.apply_patch(patch);
    Some(Reduction::default())
}
