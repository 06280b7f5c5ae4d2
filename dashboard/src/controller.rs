//! Event dispatch
//!
//! Owns the state signal. Every event goes through `shared::update`; the
//! commands it returns are run as local futures whose results come back
//! as events.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::{update, ApiConfig, Command, Event, TodoState};

use crate::api;

#[derive(Clone, Copy)]
pub struct TodoController {
    state: RwSignal<TodoState>,
    config: StoredValue<ApiConfig>,
}

impl TodoController {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: RwSignal::new(TodoState::new(config.tab_switch)),
            config: StoredValue::new(config),
        }
    }

    pub fn state(&self) -> ReadSignal<TodoState> {
        self.state.read_only()
    }

    pub fn dispatch(&self, event: Event) {
        let mut commands = Vec::new();
        self.state.update(|state| {
            let transition = update(std::mem::take(state), event);
            *state = transition.state;
            commands = transition.commands;
        });

        for command in commands {
            self.run(command);
        }
    }

    fn run(&self, command: Command) {
        let controller = *self;
        let config = self.config.get_value();
        spawn_local(async move {
            let event = execute(&config, command).await;
            controller.dispatch(event);
        });
    }
}

/// Get the controller provided by `App`
pub fn use_controller() -> TodoController {
    expect_context::<TodoController>()
}

async fn execute(config: &ApiConfig, command: Command) -> Event {
    match command {
        Command::LoadCategories => match api::fetch_categories(config).await {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "categories loaded");
                Event::CategoriesLoaded(categories)
            }
            Err(error) => {
                tracing::error!(%error, "loading categories failed");
                Event::LoadFailed(error)
            }
        },
        Command::CreateItem { key, item } => match api::create_item(config, &item).await {
            Ok(created) => Event::CreateConfirmed { key, sent: item, created },
            Err(error) => {
                tracing::error!(%error, text = %item.text, "create failed");
                Event::CreateFailed { key, error }
            }
        },
        Command::UpdateItem { id, sent, previous } => match api::update_item(config, &id, &sent).await {
            Ok(()) => Event::UpdateConfirmed { id },
            Err(error) => {
                tracing::error!(%error, %id, "update failed");
                Event::UpdateFailed { id, sent, previous, error }
            }
        },
        Command::DeleteItem { id, removed, position } => match api::delete_item(config, &id).await {
            Ok(()) => Event::DeleteConfirmed { id },
            Err(error) => {
                tracing::error!(%error, %id, "delete failed");
                Event::DeleteFailed { removed, position, error }
            }
        },
    }
}
