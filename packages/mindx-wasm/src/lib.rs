#![forbid(unsafe_code)]
//! WASM-friendly bridge for the Mindx store.
//! Keeps the string-keyed `dispatch(action, payload)` surface the JS editor already speaks.

use std::sync::Arc;

use mindx_core::{
    default_root, ChangeListener, DispatchOutcome, MindmapStore, Node, NodeId, SelectionSink,
    StoreConfig,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Calls a JS function with the serialized tree after each dispatch.
struct JsChangeListener(Option<js_sys::Function>);

/// Forwards delete follow-up selections to the JS editor store.
struct JsSelection(Option<js_sys::Function>);

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    // plain objects rather than Maps, so the view layer can read fields directly
    let serializer = Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

impl ChangeListener for JsChangeListener {
    fn on_change(&mut self, tree: &Arc<Node>) {
        let Some(callback) = &self.0 else {
            return;
        };
        let result = to_js(tree.as_ref()).and_then(|value| callback.call1(&JsValue::NULL, &value));
        if let Err(err) = result {
            tracing::warn!(?err, "onChange callback failed");
        }
    }
}

impl SelectionSink for JsSelection {
    fn select_node(&mut self, id: &NodeId) {
        let Some(callback) = &self.0 else {
            return;
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(id.as_str())) {
            tracing::warn!(?err, "selectNode callback failed");
        }
    }
}

fn outcome_str(outcome: DispatchOutcome) -> &'static str {
    match outcome {
        DispatchOutcome::Applied => "applied",
        DispatchOutcome::Unchanged => "unchanged",
        DispatchOutcome::ReadOnly => "readonly",
        DispatchOutcome::Rejected => "rejected",
    }
}

#[wasm_bindgen]
pub struct WasmMindmap {
    inner: MindmapStore<JsChangeListener, JsSelection>,
}

#[wasm_bindgen]
impl WasmMindmap {
    /// `options` is `{ readonly?, root? }`; both callbacks are optional.
    #[wasm_bindgen(constructor)]
    pub fn new(
        options: JsValue,
        on_change: Option<js_sys::Function>,
        on_select: Option<js_sys::Function>,
    ) -> Result<WasmMindmap, JsValue> {
        let config: StoreConfig = if options.is_undefined() || options.is_null() {
            StoreConfig::default()
        } else {
            from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(WasmMindmap {
            inner: MindmapStore::with_hooks(
                config,
                JsChangeListener(on_change),
                JsSelection(on_select),
            ),
        })
    }

    /// Returns what happened: `applied`, `unchanged`, `readonly` or `rejected`.
    /// Never throws; bad input is logged and ignored.
    pub fn dispatch(&mut self, action: String, payload: JsValue) -> String {
        let payload = if payload.is_undefined() {
            serde_json::Value::Null
        } else {
            match from_value::<serde_json::Value>(payload) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%err, action = %action, "dispatch payload is not JSON-compatible");
                    serde_json::Value::Null
                }
            }
        };
        outcome_str(self.inner.dispatch_named(&action, payload)).to_owned()
    }

    pub fn undo(&mut self) -> String {
        self.dispatch("undo".to_owned(), JsValue::UNDEFINED)
    }

    pub fn redo(&mut self) -> String {
        self.dispatch("redo".to_owned(), JsValue::UNDEFINED)
    }

    #[wasm_bindgen(js_name = getCurrentTree)]
    pub fn get_current_tree(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.current_tree().as_ref())
    }

    /// The node with `id` in the current tree, or `undefined`.
    #[wasm_bindgen(js_name = getNode)]
    pub fn get_node(&self, id: String) -> Result<JsValue, JsValue> {
        match self.inner.node(&NodeId::from(id)) {
            Some(node) => to_js(node),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> u32 {
        u32::try_from(self.inner.history_len()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = setReadonly)]
    pub fn set_readonly(&mut self, readonly: bool) {
        self.inner.set_readonly(readonly);
    }

    #[wasm_bindgen(js_name = isReadonly)]
    pub fn is_readonly(&self) -> bool {
        self.inner.is_readonly()
    }

    /// The sample document new editors open with.
    #[wasm_bindgen(js_name = defaultRoot)]
    pub fn default_root() -> Result<JsValue, JsValue> {
        to_js(&default_root())
    }
}
