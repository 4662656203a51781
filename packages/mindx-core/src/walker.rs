//! Lookups over a tree by node id, plus side normalization for the root's branches.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::ids::{NodeId, Side};
use crate::node::Node;

pub fn find_node<'a>(root: &'a Node, id: &NodeId) -> Option<&'a Node> {
    root.iter().find(|node| node.id == *id)
}

pub fn find_node_mut<'a>(node: &'a mut Node, id: &NodeId) -> Option<&'a mut Node> {
    if node.id == *id {
        return Some(node);
    }
    node.children
        .as_mut()?
        .attached
        .iter_mut()
        .find_map(|child| find_node_mut(child, id))
}

/// The node whose attached children contain `id`. `None` for the root and unknown ids.
pub fn find_parent_mut<'a>(node: &'a mut Node, id: &NodeId) -> Option<&'a mut Node> {
    if node.attached().iter().any(|child| child.id == *id) {
        return Some(node);
    }
    node.children
        .as_mut()?
        .attached
        .iter_mut()
        .find_map(|child| find_parent_mut(child, id))
}

/// Give every direct child of the root a side, keeping the two branches balanced.
///
/// Children that already carry a side keep it and count towards the balance of later ones.
pub fn normalize_side(root: &mut Node) {
    let mut left = 0;
    for (seen, child) in root.attached_mut().iter_mut().enumerate() {
        let side = *child.side.get_or_insert(Side::balanced(left, seen));
        if side == Side::Left {
            left += 1;
        }
    }
}

/// Check that no id appears twice in the tree. Intended for tests and debugging.
pub fn validate_unique_ids(root: &Node) -> Result<()> {
    let mut seen = HashSet::new();
    for node in root.iter() {
        if !seen.insert(&node.id) {
            return Err(Error::InconsistentState(format!(
                "duplicate node id {}",
                node.id
            )));
        }
    }
    Ok(())
}
