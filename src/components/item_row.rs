//! Item Row Component
//!
//! A single list row. Clicking the row toggles its status; the delete
//! button removes it and must not also fire the toggle.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppSession;
use crate::reconcile::RenderRecord;

#[component]
pub fn ItemRow(record: RenderRecord) -> impl IntoView {
    let session = use_context::<AppSession>().expect("AppSession should be provided");

    let status = record.status;
    let completed = status.is_completed();

    let toggle_repo = session.repo.clone();
    let toggle_id = record.id.clone();
    let on_toggle = move |_| {
        let repo = toggle_repo.clone();
        let id = toggle_id.clone();
        spawn_local(async move {
            if let Err(e) = repo.toggle(&id, status).await {
                web_sys::console::error_1(
                    &format!("[APP] Error updating item {}: {}", id, e).into(),
                );
            }
        });
    };

    let delete_repo = session.repo.clone();
    let delete_id = record.id.clone();
    let on_delete = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let repo = delete_repo.clone();
        let id = delete_id.clone();
        spawn_local(async move {
            if let Err(e) = repo.remove(&id).await {
                web_sys::console::error_1(
                    &format!("[APP] Error removing item {}: {}", id, e).into(),
                );
            }
        });
    };

    view! {
        <div
            class=move || if completed { "item completed" } else { "item active" }
            on:click=on_toggle
        >
            <div class="check-box">
                <div class=move || if completed { "check-mark checked" } else { "check-mark" }></div>
            </div>
            <div class="item-text">{record.text.clone()}</div>
            <button class="delete-btn" on:click=on_delete>"Delete"</button>
        </div>
    }
}
