//! Add form and item list for the active category

use leptos::prelude::*;
use shared::{Event, TodoItem};

use super::TodoRow;
use crate::controller::use_controller;

#[component]
pub fn TodoPanel() -> impl IntoView {
    let controller = use_controller();
    let state = controller.state();
    let input = Memo::new(move |_| state.with(|s| s.input.clone()));
    let keys = Memo::new(move |_| {
        state.with(|s| s.items.iter().map(TodoItem::key).collect::<Vec<_>>())
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        controller.dispatch(Event::Submitted);
    };

    view! {
        <div class="card todo-list" role="tabpanel">
            <form class="input-group" on:submit=on_submit>
                <input
                    type="text"
                    class="input-text"
                    prop:value=move || input.get()
                    on:input=move |ev| controller.dispatch(Event::InputChanged(event_target_value(&ev)))
                />
                <input type="submit" value="add" class="submit-button" />
            </form>
            <ul class="todos">
                <For
                    each=move || keys.get()
                    key=|key| key.clone()
                    children=move |key| view! { <TodoRow item_key=key /> }
                />
            </ul>
        </div>
    }
}
