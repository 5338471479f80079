//! Document Store Layer
//!
//! Abstract capability surface over a document database with live snapshot
//! push. Implementations can use the host page's database bridge, in-memory,
//! etc.

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Opaque store-assigned document identifier
pub type DocumentId = String;

/// Field map of a stored document; the id lives outside the map
pub type Fields = Map<String, Value>;

/// One document as delivered in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// Callback receiving the entire collection contents on every change
pub type SnapshotHandler = Rc<dyn Fn(Vec<Document>)>;

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The backend rejected the operation
    Backend(String),
    /// A value could not cross the serialization boundary
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Store rejected: {}", msg),
            StoreError::Serialize(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Live-subscription handle. Unsubscribes when dropped; the application
/// holds its single handle for the whole page lifetime.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Capability surface of the document database
///
/// All operations are async round-trips to the backing store. `subscribe`
/// delivers the entire current collection contents on every change (never
/// deltas), starting with one snapshot on registration.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Create a document; the store assigns and returns its id
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<DocumentId>;

    /// Patch named fields on an existing document
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> StoreResult<()>;

    /// Delete a document
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Register for full-snapshot pushes on a collection
    fn subscribe(&self, collection: &str, on_snapshot: SnapshotHandler) -> Subscription;
}
