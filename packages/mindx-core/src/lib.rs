#![forbid(unsafe_code)]
//! History-backed tree store for the Mindx mind-map editor.
//! A single editor session drives the store through [`MindmapStore::dispatch`]; every accepted
//! mutation lands as a new immutable snapshot on a linear undo/redo timeline.

pub mod action;
pub mod error;
pub mod ids;
pub mod node;
pub mod reducers;
pub mod store;
pub mod timeline;
pub mod traits;
pub mod walker;

pub use action::{Action, ActionName};
pub use error::{Error, Result};
pub use ids::{NodeId, Side};
pub use node::{default_root, Children, Node, NodePatch};
#[cfg(feature = "serde")]
pub use node::Extra;
pub use reducers::Reduction;
pub use store::{DispatchOutcome, MindmapStore, StoreConfig};
pub use timeline::Timeline;
pub use traits::{ChangeListener, NoopListener, NoopSelection, SelectionSink};
