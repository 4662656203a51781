use crate::ids::{NodeId, Side};
use crate::walker;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Topic fields the store does not interpret (notes, labels, markers, style...), kept verbatim.
#[cfg(feature = "serde")]
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Keys owned by [`Node`] itself; never stored in or merged through [`Extra`].
#[cfg(feature = "serde")]
const OWN_KEYS: &[&str] = &["id", "title", "side", "children"];

/// A topic in the mind-map tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Only meaningful on direct children of the root.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub side: Option<Side>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub children: Option<Children>,
    #[cfg(feature = "serde")]
    #[serde(flatten)]
    pub extra: Extra,
}

/// Child container of a node. Once created, `attached` always exists, possibly empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Children {
    #[cfg_attr(feature = "serde", serde(default))]
    pub attached: Vec<Node>,
}

/// Fields to shallow-merge into an existing node. `None` leaves the field as it is.
///
/// The id is deliberately absent: a node keeps its identifier for its whole life.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodePatch {
    pub title: Option<String>,
    pub side: Option<Side>,
    pub children: Option<Children>,
    /// Merged key by key: present keys overwrite, absent keys stay.
    #[cfg(feature = "serde")]
    #[serde(flatten)]
    pub extra: Extra,
}

impl Node {
    /// New topic with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(NodeId::generate(), title)
    }

    pub fn with_id(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            side: None,
            children: None,
            #[cfg(feature = "serde")]
            extra: Extra::new(),
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = Some(Children {
            attached: children.into_iter().collect(),
        });
        self
    }

    /// Attached children in order; empty when the container was never created.
    pub fn attached(&self) -> &[Node] {
        self.children
            .as_ref()
            .map(|c| c.attached.as_slice())
            .unwrap_or_default()
    }

    /// Attached children, creating the container on first use.
    pub fn attached_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children.get_or_insert_with(Children::default).attached
    }

    pub fn apply_patch(&mut self, patch: NodePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(side) = patch.side {
            self.side = Some(side);
        }
        if let Some(children) = patch.children {
            self.children = Some(children);
        }
        #[cfg(feature = "serde")]
        for (key, value) in patch.extra {
            if !OWN_KEYS.contains(&key.as_str()) {
                self.extra.insert(key, value);
            }
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.attached().iter().rev());
            Some(node)
        })
    }
}

/// The sample document a fresh editor opens with.
pub fn default_root() -> Node {
    let branch = |title: &str, leaves: &[&str]| {
        Node::new(title).with_children(leaves.iter().map(|leaf| Node::new(*leaf)))
    };
    let mut root = Node::new("How to use Mindx").with_children([
        branch(
            "Basic shortcut",
            &[
                "tab - Create a child topic",
                "del - Remove a topic",
                "space - Edit a topic",
                "Enter - Save edited topic",
            ],
        ),
        branch(
            "Advanced shortcut",
            &[
                "command+z - Undo",
                "command+shift+z - Redo",
                "up, down, left, right - navigate between topics",
            ],
        ),
        branch(
            "Bottom menu",
            &["Full screen", "Return to Center", "Zoom in", "Zoom out"],
        ),
        branch("Draggable", &["Drag a node to target one and append to it"]),
    ]);
    walker::normalize_side(&mut root);
    root
}
