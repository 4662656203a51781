#![cfg(feature = "serde")]

use std::cell::Cell;
use std::sync::Arc;

use mindx_core::{
    Action, DispatchOutcome, Error, MindmapStore, Node, NodeId, NoopSelection, Side, StoreConfig,
};
use serde_json::json;

fn sample_root() -> Node {
    Node::with_id("r", "root").with_children([Node::with_id("a", "A").with_side(Side::Right)])
}

#[test]
fn node_json_uses_attached_children_and_lowercase_sides() {
    let json = serde_json::to_value(sample_root()).expect("serialize node");
    assert_eq!(
        json,
        json!({
            "id": "r",
            "title": "root",
            "children": {
                "attached": [{ "id": "a", "title": "A", "side": "right" }]
            }
        })
    );

    let back: Node = serde_json::from_value(json).expect("deserialize node");
    assert_eq!(back, sample_root());
}

#[test]
fn empty_children_container_decodes_to_empty_sequence() {
    let node: Node = serde_json::from_value(json!({ "id": "x", "children": {} })).unwrap();
    assert!(node.children.is_some());
    assert!(node.attached().is_empty());
}

#[test]
fn from_parts_decodes_original_payload_shapes() {
    let append = Action::from_parts(
        "APPEND_CHILD",
        json!({ "id": "r", "node": { "id": "n", "title": "New" } }),
    )
    .unwrap();
    assert_eq!(
        append,
        Action::AppendChild {
            parent_id: "r".into(),
            node: Node::with_id("n", "New"),
        }
    );

    let delete = Action::from_parts("deleteNode", json!("a")).unwrap();
    assert_eq!(delete, Action::DeleteNode { id: "a".into() });

    let update =
        Action::from_parts("updateNode", json!({ "id": "a", "node": { "title": "B" } })).unwrap();
    match update {
        Action::UpdateNode { id, patch } => {
            assert_eq!(id, NodeId::from("a"));
            assert_eq!(patch.title.as_deref(), Some("B"));
            assert_eq!(patch.side, None);
        }
        other => panic!("unexpected action {other:?}"),
    }

    assert_eq!(Action::from_parts("undo", json!(null)).unwrap(), Action::Undo);
}

#[test]
fn from_parts_rejects_reserved_unknown_and_malformed() {
    assert!(matches!(
        Action::from_parts("SAVE_HISTORY", json!({})),
        Err(Error::ReservedAction(_))
    ));
    assert!(matches!(
        Action::from_parts("MOVE_NODE", json!({})),
        Err(Error::UnknownAction(_))
    ));
    assert!(matches!(
        Action::from_parts("appendChild", json!(42)),
        Err(Error::InvalidPayload(_))
    ));
    assert!(matches!(
        Action::from_parts("deleteNode", json!({ "id": "a" })),
        Err(Error::InvalidPayload(_))
    ));
}

#[test]
fn from_parts_treats_missing_references_as_empty_ids() {
    assert_eq!(
        Action::from_parts("deleteNode", json!(null)).unwrap(),
        Action::DeleteNode { id: NodeId::default() }
    );
    match Action::from_parts("appendChild", json!({ "id": "r" })).unwrap() {
        Action::AppendChild { parent_id, node } => {
            assert_eq!(parent_id, NodeId::from("r"));
            assert!(node.id.is_empty());
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn missing_references_notify_without_history() {
    let calls = Cell::new(0);
    let mut store = MindmapStore::with_hooks(
        StoreConfig::default().with_root(sample_root()),
        |_: &Arc<Node>| calls.set(calls.get() + 1),
        NoopSelection,
    );
    let before = Arc::clone(store.current_tree());

    assert_eq!(
        store.dispatch_named("deleteNode", json!(null)),
        DispatchOutcome::Unchanged
    );
    assert_eq!(
        store.dispatch_named("appendChild", json!({ "id": "r" })),
        DispatchOutcome::Unchanged
    );

    assert_eq!(calls.get(), 2);

    assert_eq!(
        store.dispatch_named("updateNode", json!(42)),
        DispatchOutcome::Unchanged
    );
    assert_eq!(
        store.dispatch_named("MOVE_NODE", json!({ "id": "a" })),
        DispatchOutcome::Rejected
    );
    assert_eq!(calls.get(), 3);
    assert_eq!(store.history_len(), 1);
    assert!(Arc::ptr_eq(store.current_tree(), &before));
}

#[test]
fn unknown_topic_fields_survive_updates() {
    let root: Node = serde_json::from_value(json!({
        "id": "r",
        "title": "root",
        "children": {
            "attached": [{ "id": "a", "title": "A", "side": "right", "labels": ["x"] }]
        }
    }))
    .unwrap();
    let mut store = MindmapStore::new(StoreConfig::default().with_root(root));

    assert_eq!(
        store.dispatch_named(
            "updateNode",
            json!({ "id": "a", "node": { "notes": { "plain": "hi" } } })
        ),
        DispatchOutcome::Applied
    );

    let json = serde_json::to_value(store.current_tree().as_ref()).unwrap();
    let a = &json["children"]["attached"][0];
    assert_eq!(a["title"], "A");
    assert_eq!(a["labels"], json!(["x"]));
    assert_eq!(a["notes"], json!({ "plain": "hi" }));

    assert_eq!(store.dispatch_named("undo", json!(null)), DispatchOutcome::Applied);
    assert!(!store.current_tree().attached()[0].extra.contains_key("notes"));
}

#[test]
fn tagged_action_json_round_trips() {
    let action = Action::AppendChild {
        parent_id: "r".into(),
        node: Node::with_id("n", "N"),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["type"], "appendChild");
    assert_eq!(json["parentId"], "r");
    assert_eq!(serde_json::from_value::<Action>(json).unwrap(), action);
}

#[test]
fn dispatch_named_reaches_the_pipeline() {
    let calls = Cell::new(0);
    let mut store = MindmapStore::with_hooks(
        StoreConfig::default().with_root(sample_root()),
        |_: &Arc<Node>| calls.set(calls.get() + 1),
        NoopSelection,
    );

    assert_eq!(
        store.dispatch_named("appendChild", json!({ "parentId": "r", "node": { "id": "b" } })),
        DispatchOutcome::Applied
    );
    assert_eq!(store.current_tree().attached()[1].side, Some(Side::Left));
    assert_eq!(
        store.dispatch_named("SAVE_HISTORY", json!(store.current_tree().as_ref())),
        DispatchOutcome::Rejected
    );
    assert_eq!(store.dispatch_named("undo", json!(null)), DispatchOutcome::Applied);

    assert_eq!(store.history_len(), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn store_config_reads_camel_case_json() {
    let config = StoreConfig::from_json(r#"{ "readonly": true, "root": { "id": "r" } }"#).unwrap();
    assert!(config.readonly);
    assert_eq!(config.root.unwrap().id, NodeId::from("r"));

    assert_eq!(StoreConfig::from_json("{}").unwrap(), StoreConfig::default());
    assert!(matches!(
        StoreConfig::from_json("\"nope\""),
        Err(Error::InvalidPayload(_))
    ));
}
