//! Item Repository
//!
//! Translates UI intents into document-store calls against the items
//! collection and maps pushed snapshots back into items.

use std::rc::Rc;

use serde_json::Value;

use crate::models::{Item, ItemStatus};
use crate::store::{Document, DocumentStore, Fields, StoreResult, Subscription};

/// Collection holding all item documents
pub const ITEMS_COLLECTION: &str = "items";

/// Store-facing adapter for all item operations
#[derive(Clone)]
pub struct ItemRepository {
    store: Rc<dyn DocumentStore>,
}

impl ItemRepository {
    pub fn new(store: Rc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an item with the given text, always starting out active.
    /// Whitespace-only text is declined without touching the store; the
    /// return value says whether a create was issued.
    pub async fn add(&self, text: &str) -> StoreResult<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        let mut fields = Fields::new();
        fields.insert("text".to_string(), Value::String(text.to_string()));
        fields.insert(
            "status".to_string(),
            Value::String(ItemStatus::Active.as_str().to_string()),
        );
        self.store.create(ITEMS_COLLECTION, fields).await?;
        Ok(true)
    }

    /// Flip an item's status in the store. The visible state changes only
    /// once the next confirmed snapshot arrives, never before.
    pub async fn toggle(&self, id: &str, current: ItemStatus) -> StoreResult<()> {
        let mut patch = Fields::new();
        patch.insert(
            "status".to_string(),
            Value::String(current.toggled().as_str().to_string()),
        );
        self.store.update(ITEMS_COLLECTION, id, patch).await
    }

    /// Delete an item. The row disappears with the next confirmed snapshot.
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        self.store.delete(ITEMS_COLLECTION, id).await
    }

    /// Subscribe to the collection; every push maps the documents into items
    /// and hands the full snapshot to the callback.
    pub fn watch(&self, on_items: impl Fn(Vec<Item>) + 'static) -> Subscription {
        self.store.subscribe(
            ITEMS_COLLECTION,
            Rc::new(move |docs: Vec<Document>| on_items(items_from_documents(docs))),
        )
    }
}

/// Map snapshot documents to items, skipping any that do not deserialize
fn items_from_documents(docs: Vec<Document>) -> Vec<Item> {
    docs.into_iter()
        .filter_map(|doc| {
            let mut fields = doc.fields;
            fields.insert("id".to_string(), Value::String(doc.id.clone()));
            match serde_json::from_value::<Item>(Value::Object(fields)) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn(&format!("[REPO] Skipping malformed document {}: {}", doc.id, e));
                    None
                }
            }
        })
        .collect()
}

fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", msg);
}
