//! Item List Component
//!
//! Renders the reconciled snapshot and the item count. The list region is
//! fully regenerated from each snapshot's render plan, never patched.

use leptos::prelude::*;

use crate::components::ItemRow;
use crate::context::AppSession;
use crate::reconcile::reconcile;

#[component]
pub fn ItemList() -> impl IntoView {
    let session = use_context::<AppSession>().expect("AppSession should be provided");

    let items = session.items;
    let plan = Memo::new(move |_| reconcile(&items.get()));

    view! {
        <div class="list-items">
            <For
                each=move || plan.get().records
                // Keying on status too makes a flip rebuild its row.
                key=|record| (record.id.clone(), record.status)
                children=move |record| {
                    view! { <ItemRow record=record /> }
                }
            />
        </div>

        <p class="items-in-list">{move || format!("{} items", plan.get().count)}</p>
    }
}
