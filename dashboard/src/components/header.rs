//! Header component

use leptos::prelude::*;
use shared::Event;

use crate::controller::use_controller;

#[component]
pub fn Header() -> impl IntoView {
    let controller = use_controller();
    let state = controller.state();
    let loading = Memo::new(move |_| state.with(|s| s.loading));

    view! {
        <header class="header">
            <div>
                <h1>"To-Do"</h1>
                <p class="subtitle">"Lists by category"</p>
            </div>
            <button
                class="reload"
                disabled=move || loading.get()
                on:click=move |_| controller.dispatch(Event::ReloadRequested)
            >
                {move || if loading.get() {
                    view! { <span class="spinner"></span> " Loading..." }.into_any()
                } else {
                    view! { "Reload" }.into_any()
                }}
            </button>
        </header>
    }
}
