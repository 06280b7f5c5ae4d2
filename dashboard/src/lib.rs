//! ==============================================================================
//! lib.rs - Tabbed To-Do Dashboard
//! ==============================================================================
//!
//! purpose:
//!     leptos wasm front end for the to-do rest api. shows one tab per
//!     category and lets the user add, edit, complete and delete items in
//!     the selected one. every change is sent to the server immediately.
//!
//! architecture:
//!     - leptos csr (client-side rendering)
//!     - compiled to wasm, runs in browser
//!     - state transitions live in the `shared` crate; `controller` runs
//!       them and performs the http calls through `api`
//!
//! ==============================================================================

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use shared::{ApiConfig, Event};
use wasm_bindgen::prelude::*;

mod api;
mod components;
mod controller;

use components::{CategoryTabs, ErrorBanner, Header, TodoPanel};
use controller::TodoController;

// ==============================================================================
// main entry point
// ==============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("starting to-do dashboard");
    mount_to_body(App);
}

// ==============================================================================
// app component
// ==============================================================================

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring build configuration");
        ApiConfig::default()
    });
    tracing::info!(base_url = config.base_url(), tab_switch = ?config.tab_switch, "api configured");

    let controller = TodoController::new(config);
    provide_context(controller);

    // load categories on mount
    Effect::new(move || controller.dispatch(Event::Mounted));

    let state = controller.state();
    let loaded = Memo::new(move |_| state.with(|s| s.is_loaded()));
    let has_categories = Memo::new(move |_| state.with(|s| !s.categories.is_empty()));

    view! {
        <Title text="To-Do" />
        <Header />
        <div class="container">
            <ErrorBanner />

            <Show
                when=move || loaded.get()
                fallback=|| view! { <p class="placeholder">"Loading..."</p> }
            >
                <Show
                    when=move || has_categories.get()
                    fallback=|| view! { <p class="placeholder">"No categories yet."</p> }
                >
                    <CategoryTabs />
                    <TodoPanel />
                </Show>
            </Show>
        </div>
    }
}
