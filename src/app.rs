//! Livelist Frontend App
//!
//! Root component: builds the session over the document store, subscribes
//! once to the live item feed, and lays out the page.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{ItemList, NewItemForm};
use crate::context::AppSession;
use crate::repository::ItemRepository;
use crate::store::{DocumentStore, MemoryStore, RemoteStore};

/// Use the host page's database bridge when present, otherwise fall back to
/// an in-process store (nothing persists across reloads).
fn choose_store() -> Rc<dyn DocumentStore> {
    if RemoteStore::bridge_available() {
        Rc::new(RemoteStore::new())
    } else {
        web_sys::console::warn_1(
            &"[APP] No document store bridge found, running in-memory".into(),
        );
        Rc::new(MemoryStore::new())
    }
}

#[component]
pub fn App() -> impl IntoView {
    let repo = ItemRepository::new(choose_store());
    let session = AppSession::new(repo.clone());
    provide_context(session.clone());

    // The single live subscription. Every push replaces the whole snapshot;
    // the handle is leaked on purpose (lifetime = page lifetime).
    let feed = session.clone();
    let subscription = repo.watch(move |items| {
        web_sys::console::log_1(&format!("[APP] Snapshot with {} items", items.len()).into());
        feed.apply_snapshot(items);
    });
    std::mem::forget(subscription);

    view! {
        <main class="todo-app">
            <h1>"To-Do"</h1>

            <NewItemForm />

            <ItemList />
        </main>
    }
}
