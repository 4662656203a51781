use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ids::NodeId;
use crate::node::{Node, NodePatch};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every mutation a caller may request from the store.
///
/// History checkpoints are not an action: the store takes them itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Action {
    AppendChild { parent_id: NodeId, node: Node },
    DeleteNode { id: NodeId },
    UpdateNode { id: NodeId, patch: NodePatch },
    Undo,
    Redo,
}

impl Action {
    pub fn name(&self) -> ActionName {
        match self {
            Action::AppendChild { .. } => ActionName::AppendChild,
            Action::DeleteNode { .. } => ActionName::DeleteNode,
            Action::UpdateNode { .. } => ActionName::UpdateNode,
            Action::Undo => ActionName::Undo,
            Action::Redo => ActionName::Redo,
        }
    }
}

/// Action names accepted at string-keyed boundaries such as the JS bridge.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ActionName {
    AppendChild,
    DeleteNode,
    UpdateNode,
    Undo,
    Redo,
}

/// Names of the store-internal checkpoint action. Never accepted from callers.
const RESERVED_NAMES: &[&str] = &["saveHistory", "SAVE_HISTORY"];

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::AppendChild => "appendChild",
            ActionName::DeleteNode => "deleteNode",
            ActionName::UpdateNode => "updateNode",
            ActionName::Undo => "undo",
            ActionName::Redo => "redo",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "appendChild" | "APPEND_CHILD" => Ok(ActionName::AppendChild),
            "deleteNode" | "DELETE_NODE" => Ok(ActionName::DeleteNode),
            "updateNode" | "UPDATE_NODE" => Ok(ActionName::UpdateNode),
            "undo" | "UNDO_HISTORY" => Ok(ActionName::Undo),
            "redo" | "REDO_HISTORY" => Ok(ActionName::Redo),
            _ if RESERVED_NAMES.contains(&name) => Err(Error::ReservedAction(name.to_owned())),
            _ => Err(Error::UnknownAction(name.to_owned())),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendChildPayload {
    #[serde(default, alias = "id")]
    parent_id: NodeId,
    #[serde(default)]
    node: Option<Node>,
}

#[cfg(feature = "serde")]
#[derive(Default, Deserialize)]
struct UpdateNodePayload {
    #[serde(default)]
    id: NodeId,
    #[serde(default)]
    node: NodePatch,
}

#[cfg(feature = "serde")]
impl Action {
    /// Build an action from a string name and a loosely typed JSON payload.
    ///
    /// Payload shapes: `appendChild {parentId, node}`, `deleteNode "id"`,
    /// `updateNode {id, node}`; undo and redo ignore the payload.
    ///
    /// A `null` payload or a missing id or node decodes to an action with an empty id, which the
    /// store treats as an invalid reference. Only payloads of the wrong shape are errors.
    pub fn from_parts(name: &str, payload: serde_json::Value) -> Result<Self> {
        let decode_err = |err: serde_json::Error| Error::InvalidPayload(format!("{name}: {err}"));
        let action = match name.parse::<ActionName>()? {
            ActionName::AppendChild => {
                let p: Option<AppendChildPayload> =
                    serde_json::from_value(payload).map_err(decode_err)?;
                let (parent_id, node) = p.map(|p| (p.parent_id, p.node)).unwrap_or_default();
                Action::AppendChild {
                    parent_id,
                    node: node.unwrap_or_else(|| Node::with_id(NodeId::default(), "")),
                }
            }
            ActionName::DeleteNode => Action::DeleteNode {
                id: serde_json::from_value::<Option<NodeId>>(payload)
                    .map_err(decode_err)?
                    .unwrap_or_default(),
            },
            ActionName::UpdateNode => {
                let p: UpdateNodePayload = serde_json::from_value::<Option<_>>(payload)
                    .map_err(decode_err)?
                    .unwrap_or_default();
                Action::UpdateNode {
                    id: p.id,
                    patch: p.node,
                }
            }
            ActionName::Undo => Action::Undo,
            ActionName::Redo => Action::Redo,
        };
        Ok(action)
    }
}
