//! In-Process Document Store
//!
//! Same contract as the remote bridge: every mutation pushes the full
//! collection to every subscriber. Backs the native test suite and doubles
//! as a backend-free dev mode.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use super::{
    Document, DocumentId, DocumentStore, Fields, SnapshotHandler, StoreError, StoreResult,
    Subscription,
};

struct Subscriber {
    id: u64,
    collection: String,
    handler: SnapshotHandler,
}

/// Document store holding its collections in insertion order
#[derive(Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, Vec<Document>>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
    next_doc_id: Cell<u64>,
    next_sub_id: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of a collection, in the order they will be pushed
    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn notify(&self, collection: &str) {
        let snapshot = self.snapshot(collection);
        // Handlers run outside the borrow so they may subscribe or drop
        // subscriptions themselves.
        let handlers: Vec<SnapshotHandler> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.collection == collection)
            .map(|s| Rc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(snapshot.clone());
        }
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId> {
        let n = self.next_doc_id.get() + 1;
        self.next_doc_id.set(n);
        let id = format!("doc-{}", n);
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        self.notify(collection);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> StoreResult<()> {
        {
            let mut collections = self.collections.borrow_mut();
            let docs = collections
                .get_mut(collection)
                .ok_or_else(|| StoreError::Backend(format!("no collection '{}'", collection)))?;
            let doc = docs.iter_mut().find(|d| d.id == id).ok_or_else(|| {
                StoreError::Backend(format!("no document '{}' in '{}'", id, collection))
            })?;
            for (key, value) in patch {
                doc.fields.insert(key, value);
            }
        }
        self.notify(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let removed = {
            let mut collections = self.collections.borrow_mut();
            match collections.get_mut(collection) {
                Some(docs) => {
                    let before = docs.len();
                    docs.retain(|d| d.id != id);
                    docs.len() != before
                }
                None => false,
            }
        };
        // Deleting an already-gone document is a no-op, not an error.
        if removed {
            self.notify(collection);
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str, on_snapshot: SnapshotHandler) -> Subscription {
        let sub_id = self.next_sub_id.get() + 1;
        self.next_sub_id.set(sub_id);
        self.subscribers.borrow_mut().push(Subscriber {
            id: sub_id,
            collection: collection.to_string(),
            handler: Rc::clone(&on_snapshot),
        });
        // Initial snapshot on registration, like the remote bridge.
        on_snapshot(self.snapshot(collection));
        let subscribers = Rc::clone(&self.subscribers);
        Subscription::new(move || {
            subscribers.borrow_mut().retain(|s| s.id != sub_id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn fields(text: &str, status: &str) -> Fields {
        let mut f = Fields::new();
        f.insert("text".to_string(), Value::String(text.to_string()));
        f.insert("status".to_string(), Value::String(status.to_string()));
        f
    }

    #[tokio::test]
    async fn create_assigns_unique_stable_ids() {
        let store = MemoryStore::new();
        let a = store.create("items", fields("One", "active")).await.unwrap();
        let b = store.create("items", fields("Two", "active")).await.unwrap();
        assert_ne!(a, b);

        let snapshot = store.snapshot("items");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[1].id, b);
    }

    #[tokio::test]
    async fn subscribe_delivers_initial_and_per_mutation_snapshots() {
        let store = MemoryStore::new();
        store.create("items", fields("One", "active")).await.unwrap();

        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(
            "items",
            Rc::new(move |docs: Vec<Document>| sink.borrow_mut().push(docs.len())),
        );
        store.create("items", fields("Two", "active")).await.unwrap();
        store.create("items", fields("Three", "active")).await.unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_patches_named_fields_only() {
        let store = MemoryStore::new();
        let id = store
            .create("items", fields("Buy milk", "active"))
            .await
            .unwrap();

        let mut patch = Fields::new();
        patch.insert(
            "status".to_string(),
            Value::String("completed".to_string()),
        );
        store.update("items", &id, patch).await.unwrap();

        let snapshot = store.snapshot("items");
        assert_eq!(snapshot[0].fields["text"], Value::String("Buy milk".to_string()));
        assert_eq!(
            snapshot[0].fields["status"],
            Value::String("completed".to_string())
        );
    }

    #[tokio::test]
    async fn update_on_missing_document_is_rejected() {
        let store = MemoryStore::new();
        store.create("items", fields("One", "active")).await.unwrap();

        let err = store
            .update("items", "doc-404", fields("One", "completed"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn delete_removes_and_notifies() {
        let store = MemoryStore::new();
        let id = store.create("items", fields("One", "active")).await.unwrap();
        store.create("items", fields("Two", "active")).await.unwrap();

        let seen: Rc<RefCell<Vec<Vec<Document>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(
            "items",
            Rc::new(move |docs: Vec<Document>| sink.borrow_mut().push(docs)),
        );
        store.delete("items", &id).await.unwrap();

        let snapshots = seen.borrow();
        let last = snapshots.last().unwrap();
        assert_eq!(last.len(), 1);
        assert!(last.iter().all(|d| d.id != id));
    }

    #[tokio::test]
    async fn delete_of_missing_document_is_a_silent_no_op() {
        let store = MemoryStore::new();
        store.create("items", fields("One", "active")).await.unwrap();

        store.delete("items", "doc-404").await.unwrap();
        assert_eq!(store.snapshot("items").len(), 1);
    }

    #[tokio::test]
    async fn dropped_subscription_stops_delivery() {
        let store = MemoryStore::new();

        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(
            "items",
            Rc::new(move |docs: Vec<Document>| sink.borrow_mut().push(docs.len())),
        );
        drop(sub);
        store.create("items", fields("One", "active")).await.unwrap();

        // Only the initial empty snapshot was delivered.
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryStore::new();
        store.create("items", fields("One", "active")).await.unwrap();

        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(
            "archive",
            Rc::new(move |docs: Vec<Document>| sink.borrow_mut().push(docs.len())),
        );
        store.create("items", fields("Two", "active")).await.unwrap();

        assert_eq!(*seen.borrow(), vec![0]);
        assert!(store.snapshot("archive").is_empty());
    }
}
