//! Category tab strip

use leptos::prelude::*;
use shared::Event;

use crate::controller::use_controller;

#[component]
pub fn CategoryTabs() -> impl IntoView {
    let controller = use_controller();
    let state = controller.state();
    let names = Memo::new(move |_| {
        state.with(|s| s.categories.iter().map(|c| c.name.clone()).collect::<Vec<_>>())
    });
    let active = Memo::new(move |_| state.with(|s| s.active_index));

    // reselecting the open tab would reset its list to the cached snapshot
    let select = move |index: usize| {
        if active.get_untracked() != Some(index) {
            controller.dispatch(Event::TabSelected(index));
        }
    };

    view! {
        <div class="tabs" role="tablist">
            {move || names.get().into_iter().enumerate().map(|(index, name)| {
                let is_active = move || active.get() == Some(index);
                view! {
                    <button
                        role="tab"
                        class=move || if is_active() { "tab active" } else { "tab" }
                        aria-selected=move || is_active().to_string()
                        on:click=move |_| select(index)
                    >
                        {name}
                    </button>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
