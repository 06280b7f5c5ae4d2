//! One editable item

use leptos::prelude::*;
use shared::{Event, ItemKey, TodoItem};

use crate::controller::use_controller;

#[component]
pub fn TodoRow(item_key: ItemKey) -> impl IntoView {
    let controller = use_controller();
    let state = controller.state();

    let lookup = item_key.clone();
    let item = Memo::new(move |_| state.with(|s| s.item(&lookup).cloned()));
    let text = move || item.with(|i| i.as_ref().map(|i| i.text.clone()).unwrap_or_default());
    let completed = move || item.with(|i| i.as_ref().is_some_and(|i| i.is_completed));
    let disabled = move || item.with(|i| i.as_ref().is_some_and(TodoItem::input_disabled));

    let edit_key = item_key.clone();
    let toggle_key = item_key.clone();
    let delete_key = item_key;

    view! {
        <li class="todo">
            <input
                type="text"
                class="input-text"
                prop:value=text
                disabled=disabled
                on:input=move |ev| controller.dispatch(Event::TextEdited {
                    key: edit_key.clone(),
                    text: event_target_value(&ev),
                })
            />
            <input
                type="checkbox"
                class="check-box"
                prop:checked=completed
                on:change=move |ev| controller.dispatch(Event::CompletionToggled {
                    key: toggle_key.clone(),
                    checked: event_target_checked(&ev),
                })
            />
            <button
                class="delete-button"
                aria-label="delete"
                on:click=move |_| controller.dispatch(Event::DeleteRequested { key: delete_key.clone() })
            >
                <DeleteIcon />
            </button>
        </li>
    }
}

#[component]
fn DeleteIcon() -> impl IntoView {
    view! {
        <svg viewBox="0 0 24 24" width="25" height="25" fill="gray" aria-hidden="true">
            <path d="M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zm2.46-7.12l1.41-1.41L12 12.59l2.12-2.12 1.41 1.41L13.41 14l2.12 2.12-1.41 1.41L12 15.41l-2.12 2.12-1.41-1.41L10.59 14l-2.13-2.12zM15.5 4l-1-1h-5l-1 1H5v2h14V4z" />
        </svg>
    }
}
