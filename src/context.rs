//! Application Session
//!
//! Process-scoped state constructed once at startup and shared via the
//! Leptos Context API.

use leptos::prelude::*;

use crate::models::Item;
use crate::repository::ItemRepository;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppSession {
    /// Store-facing adapter for all item mutations
    pub repo: ItemRepository,
    /// Latest confirmed snapshot - read
    pub items: ReadSignal<Vec<Item>>,
    /// Latest confirmed snapshot - write, fed only by the subscription
    set_items: WriteSignal<Vec<Item>>,
}

impl AppSession {
    pub fn new(repo: ItemRepository) -> Self {
        let (items, set_items) = signal(Vec::<Item>::new());
        Self {
            repo,
            items,
            set_items,
        }
    }

    /// Replace the snapshot wholesale; called from the subscription callback
    pub fn apply_snapshot(&self, items: Vec<Item>) {
        self.set_items.set(items);
    }
}
