//! Last request failure, until dismissed

use leptos::prelude::*;
use shared::Event;

use crate::controller::use_controller;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let controller = use_controller();
    let state = controller.state();
    let error = Memo::new(move |_| state.with(|s| s.last_error.clone()));

    move || error.get().map(|e| view! {
        <div class="result error" role="alert">
            <div class="result-label">"Request failed"</div>
            <div class="result-value">{e.to_string()}</div>
            <button
                class="dismiss"
                on:click=move |_| controller.dispatch(Event::ErrorDismissed)
            >
                "Dismiss"
            </button>
        </div>
    })
}
