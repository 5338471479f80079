//! New Item Form Component
//!
//! Form for adding items; empty input is declined without a store call.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::AppSession;

#[component]
pub fn NewItemForm() -> impl IntoView {
    let session = use_context::<AppSession>().expect("AppSession should be provided");

    let (text, set_text) = signal(String::new());

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = text.get();
        // The input clears whether or not the add goes through.
        set_text.set(String::new());
        let repo = session.repo.clone();
        spawn_local(async move {
            match repo.add(&input).await {
                Ok(true) => {
                    web_sys::console::log_1(&"[APP] Item added".into());
                }
                Ok(false) => {
                    web_sys::console::log_1(&"[APP] Item cannot be empty".into());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] Error adding item: {}", e).into());
                }
            }
        });
    };

    view! {
        <form id="item-form" class="new-item-form" on:submit=add_item>
            <input
                id="item-input"
                type="text"
                placeholder="Add new item..."
                prop:value=move || text.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_text.set(input.value());
                }
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
