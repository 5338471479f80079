//! Remote Document Store Bridge
//!
//! Frontend binding to the document-database SDK the host page installs at
//! `window.__DOC_STORE__`. The bridge delivers snapshot records as plain
//! `{id, ...fields}` objects.

use async_trait::async_trait;
use js_sys::Function;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{
    Document, DocumentId, DocumentStore, Fields, SnapshotHandler, StoreError, StoreResult,
    Subscription,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__DOC_STORE__"], js_name = create)]
    async fn db_create(collection: &str, record: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__DOC_STORE__"], js_name = update)]
    async fn db_update(collection: &str, id: &str, patch: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__DOC_STORE__"], js_name = "delete")]
    async fn db_delete(collection: &str, id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__DOC_STORE__"], js_name = subscribe)]
    fn db_subscribe(collection: &str, on_snapshot: &Function) -> Function;
}

/// Document store backed by the host page's database bridge
#[derive(Default)]
pub struct RemoteStore;

impl RemoteStore {
    pub fn new() -> Self {
        Self
    }

    /// Whether the host page has installed the database bridge
    pub fn bridge_available() -> bool {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__DOC_STORE__")).ok())
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }
}

fn backend_error(err: JsValue) -> StoreError {
    let msg = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    StoreError::Backend(msg)
}

/// Serialize a field map as a plain JS object for the bridge
fn to_js(fields: &Fields) -> StoreResult<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    fields
        .serialize(&serializer)
        .map_err(|e| StoreError::Serialize(e.to_string()))
}

/// Split the bridge's `{id, ...fields}` records into documents. A record
/// without a string id cannot be addressed and is dropped.
fn split_ids(records: Vec<Fields>) -> Vec<Document> {
    records
        .into_iter()
        .filter_map(|mut fields| match fields.remove("id") {
            Some(Value::String(id)) => Some(Document { id, fields }),
            _ => None,
        })
        .collect()
}

#[async_trait(?Send)]
impl DocumentStore for RemoteStore {
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId> {
        let record = to_js(&fields)?;
        let id = db_create(collection, record).await.map_err(backend_error)?;
        id.as_string()
            .ok_or_else(|| StoreError::Serialize("create returned a non-string id".to_string()))
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> StoreResult<()> {
        let patch = to_js(&patch)?;
        db_update(collection, id, patch).await.map_err(backend_error)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        db_delete(collection, id).await.map_err(backend_error)?;
        Ok(())
    }

    fn subscribe(&self, collection: &str, on_snapshot: SnapshotHandler) -> Subscription {
        let callback = Closure::<dyn Fn(JsValue)>::new(move |records: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<Fields>>(records) {
                Ok(records) => on_snapshot(split_ids(records)),
                Err(e) => web_sys::console::warn_1(
                    &format!("[STORE] Dropping malformed snapshot: {}", e).into(),
                ),
            }
        });
        let unsubscribe = db_subscribe(collection, callback.as_ref().unchecked_ref());
        Subscription::new(move || {
            if let Err(e) = unsubscribe.call0(&JsValue::NULL) {
                web_sys::console::warn_1(&format!("[STORE] Unsubscribe failed: {:?}", e).into());
            }
            // The closure must outlive the JS-side subscription.
            drop(callback);
        })
    }
}
