//! ==============================================================================
//! state.rs - dashboard state machine
//! ==============================================================================
//!
//! purpose:
//!     the whole ui state is one `TodoState` snapshot. every user action and
//!     every finished request is an `Event`; `update` consumes the snapshot and
//!     returns the next one plus the `Command`s (http requests) to run.
//!
//! reconciliation:
//!     mutations are applied optimistically. when a request fails the change
//!     is rolled back (if nothing newer replaced it) and the error is kept in
//!     `last_error` for the banner. a create that finishes after the user
//!     already deleted the row is followed by a delete of the new id.
//!
//! relationships:
//!     - used by: dashboard (controller dispatches events, runs commands)
//!
//! ==============================================================================

use std::collections::{BTreeMap, BTreeSet};

use crate::config::TabSwitchPolicy;
use crate::error::ApiError;
use crate::model::{Category, CategoryId, ItemId, ItemKey, LocalKey, TodoItem};

// ==============================================================================
// state, events, commands
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoState {
    /// categories as captured by the last successful load
    pub categories: Vec<Category>,
    /// index into `categories` of the selected tab
    pub active_index: Option<usize>,
    /// items shown for the active tab
    pub items: Vec<TodoItem>,
    /// pending text of the add form
    pub input: String,
    pub loading: bool,
    pub loaded: bool,
    pub last_error: Option<ApiError>,
    pub tab_switch: TabSwitchPolicy,
    next_local_key: u64,
    /// unpersisted rows deleted before their create finished, with their old position
    discarded: BTreeMap<LocalKey, usize>,
    /// drafts whose create has not come back yet
    pending: BTreeSet<LocalKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mounted,
    ReloadRequested,
    CategoriesLoaded(Vec<Category>),
    LoadFailed(ApiError),
    InputChanged(String),
    Submitted,
    TextEdited { key: ItemKey, text: String },
    CompletionToggled { key: ItemKey, checked: bool },
    DeleteRequested { key: ItemKey },
    TabSelected(usize),
    CreateConfirmed { key: LocalKey, sent: TodoItem, created: Option<TodoItem> },
    CreateFailed { key: LocalKey, error: ApiError },
    UpdateConfirmed { id: ItemId },
    UpdateFailed { id: ItemId, sent: TodoItem, previous: TodoItem, error: ApiError },
    DeleteConfirmed { id: ItemId },
    DeleteFailed { removed: TodoItem, position: usize, error: ApiError },
    ErrorDismissed,
}

/// side effects requested by `update`; each maps to one http call
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadCategories,
    CreateItem { key: LocalKey, item: TodoItem },
    UpdateItem { id: ItemId, sent: TodoItem, previous: TodoItem },
    DeleteItem { id: ItemId, removed: TodoItem, position: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: TodoState,
    pub commands: Vec<Command>,
}

// ==============================================================================
// update
// ==============================================================================

/// apply one event to a snapshot
pub fn update(state: TodoState, event: Event) -> Transition {
    tracing::debug!(?event, "applying event");

    let mut next = state;
    let commands = match event {
        Event::Mounted | Event::ReloadRequested => next.request_load(),
        Event::CategoriesLoaded(categories) => {
            next.on_categories_loaded(categories);
            Vec::new()
        }
        Event::LoadFailed(error) => {
            next.loading = false;
            next.record(error);
            Vec::new()
        }
        Event::InputChanged(value) => {
            next.input = value;
            Vec::new()
        }
        Event::Submitted => next.on_submitted(),
        Event::TextEdited { key, text } => next.edit_item(&key, |item| item.text = text),
        Event::CompletionToggled { key, checked } => {
            next.edit_item(&key, |item| item.is_completed = checked)
        }
        Event::DeleteRequested { key } => next.on_delete_requested(&key),
        Event::TabSelected(index) => next.on_tab_selected(index),
        Event::CreateConfirmed { key, sent, created } => next.on_create_confirmed(key, &sent, created),
        Event::CreateFailed { key, error } => {
            next.items.retain(|item| item.local_key != Some(key));
            next.discarded.remove(&key);
            next.pending.remove(&key);
            next.record(error);
            Vec::new()
        }
        Event::UpdateFailed { id, sent, previous, error } => {
            next.on_update_failed(&id, &sent, previous);
            next.record(error);
            Vec::new()
        }
        Event::DeleteFailed { removed, position, error } => {
            next.on_delete_failed(removed, position);
            next.record(error);
            Vec::new()
        }
        Event::UpdateConfirmed { .. } | Event::DeleteConfirmed { .. } => Vec::new(),
        Event::ErrorDismissed => {
            next.last_error = None;
            Vec::new()
        }
    };

    Transition { state: next, commands }
}

// ==============================================================================
// queries
// ==============================================================================

impl TodoState {
    pub fn new(tab_switch: TabSwitchPolicy) -> Self {
        Self { tab_switch, ..Default::default() }
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.active_index.and_then(|index| self.categories.get(index))
    }

    pub fn active_category_id(&self) -> Option<&CategoryId> {
        self.active_category().and_then(|category| category.id.as_ref())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn item(&self, key: &ItemKey) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.matches(key))
    }
}

// ==============================================================================
// transitions
// ==============================================================================

impl TodoState {
    fn record(&mut self, error: ApiError) {
        self.last_error = Some(error);
    }

    fn request_load(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::LoadCategories]
    }

    fn on_categories_loaded(&mut self, mut categories: Vec<Category>) {
        // rows the server sent without an id still need distinct keys
        for item in categories.iter_mut().flat_map(|c| c.items.iter_mut()) {
            if item.id.is_none() && item.local_key.is_none() {
                self.next_local_key += 1;
                item.local_key = Some(LocalKey(self.next_local_key));
                tracing::warn!(text = %item.text, "server item without id; changes to it are not saved");
            }
        }

        // stay on the same category across reloads when it still exists
        let previous = self.active_category_id().cloned();
        let index = previous
            .and_then(|id| categories.iter().position(|c| c.id.as_ref() == Some(&id)))
            .or(if categories.is_empty() { None } else { Some(0) });

        // drafts still waiting on their create survive the reload
        let active_id = index.and_then(|i| categories[i].id.clone());
        let drafts: Vec<TodoItem> = std::mem::take(&mut self.items)
            .into_iter()
            .filter(|item| {
                !item.is_persisted()
                    && item.local_key.is_some_and(|key| self.pending.contains(&key))
                    && Some(&item.category_id) == active_id.as_ref()
            })
            .collect();

        self.items = index.map(|i| categories[i].items.clone()).unwrap_or_default();
        self.items.extend(drafts);
        self.active_index = index;
        self.categories = categories;
        self.loading = false;
        self.loaded = true;
    }

    fn on_submitted(&mut self) -> Vec<Command> {
        if self.input.trim().is_empty() {
            return Vec::new();
        }
        let Some(category_id) = self.active_category_id().cloned() else {
            tracing::warn!("submit ignored: no active category");
            return Vec::new();
        };

        self.next_local_key += 1;
        let key = LocalKey(self.next_local_key);
        let text = std::mem::take(&mut self.input);
        let item = TodoItem::draft(category_id, text, key);

        self.items.push(item.clone());
        self.pending.insert(key);
        vec![Command::CreateItem { key, item }]
    }

    fn edit_item(&mut self, key: &ItemKey, apply: impl FnOnce(&mut TodoItem)) -> Vec<Command> {
        let Some(item) = self.items.iter_mut().find(|item| item.matches(key)) else {
            tracing::warn!(?key, "edit ignored: no such item");
            return Vec::new();
        };

        let previous = item.clone();
        apply(item);
        if *item == previous {
            return Vec::new();
        }

        match item.id.clone() {
            Some(id) => vec![Command::UpdateItem { id, sent: item.clone(), previous }],
            // sent once the create comes back with an id
            None => Vec::new(),
        }
    }

    fn on_delete_requested(&mut self, key: &ItemKey) -> Vec<Command> {
        let Some(position) = self.items.iter().position(|item| item.matches(key)) else {
            tracing::warn!(?key, "delete ignored: no such item");
            return Vec::new();
        };

        let removed = self.items.remove(position);
        match (removed.id.clone(), removed.local_key) {
            (Some(id), _) => vec![Command::DeleteItem { id, removed, position }],
            (None, Some(local)) => {
                self.discarded.insert(local, position);
                Vec::new()
            }
            (None, None) => Vec::new(),
        }
    }

    fn on_tab_selected(&mut self, index: usize) -> Vec<Command> {
        let Some(category) = self.categories.get(index) else {
            tracing::warn!(index, count = self.categories.len(), "tab index out of range");
            return Vec::new();
        };

        self.items = category.items.clone();
        self.active_index = Some(index);

        match self.tab_switch {
            TabSwitchPolicy::Cached => Vec::new(),
            TabSwitchPolicy::Refresh => self.request_load(),
        }
    }

    fn on_create_confirmed(
        &mut self,
        key: LocalKey,
        sent: &TodoItem,
        created: Option<TodoItem>,
    ) -> Vec<Command> {
        self.pending.remove(&key);

        let Some(created) = created.filter(|c| c.id.is_some()) else {
            tracing::warn!(?key, "create confirmed without an id; item stays local");
            if self.discarded.remove(&key).is_some() {
                self.record(ApiError::Decode(
                    "create response has no id; deleted item may persist".to_string(),
                ));
            }
            return Vec::new();
        };
        let Some(id) = created.id.clone() else {
            return Vec::new();
        };

        if let Some(position) = self.discarded.remove(&key) {
            let removed = TodoItem { local_key: Some(key), ..created };
            return vec![Command::DeleteItem { id, removed, position }];
        }

        if !self.items.iter().any(|item| item.local_key == Some(key)) {
            tracing::debug!(?key, "created item no longer displayed");
            return Vec::new();
        }
        // a reload that raced the create may already list the server copy
        self.items.retain(|item| item.local_key.is_some() || item.id.as_ref() != Some(&id));

        let Some(item) = self.items.iter_mut().find(|item| item.local_key == Some(key)) else {
            tracing::debug!(?key, "created item no longer displayed");
            return Vec::new();
        };

        item.id = Some(id.clone());
        item.created_on = created.created_on;
        item.last_updated_on = created.last_updated_on;

        if item.text == sent.text && item.is_completed == sent.is_completed {
            return Vec::new();
        }

        // edited while the create was in flight
        let previous = TodoItem {
            id: Some(id.clone()),
            local_key: Some(key),
            ..sent.clone()
        };
        vec![Command::UpdateItem { id, sent: item.clone(), previous }]
    }

    fn on_update_failed(&mut self, id: &ItemId, sent: &TodoItem, previous: TodoItem) {
        let key = ItemKey::Persisted(id.clone());
        match self.items.iter_mut().find(|item| item.matches(&key)) {
            Some(item) if item == sent => *item = previous,
            Some(_) => tracing::debug!(%id, "update failed but item was edited again; keeping newer value"),
            None => {}
        }
    }

    fn on_delete_failed(&mut self, removed: TodoItem, position: usize) {
        if self.active_category_id() != Some(&removed.category_id) {
            return;
        }
        if self.items.iter().any(|item| item.id.is_some() && item.id == removed.id) {
            return;
        }
        let position = position.min(self.items.len());
        self.items.insert(position, removed);
    }
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str, category: &str, text: &str) -> TodoItem {
        TodoItem {
            id: Some(ItemId::from(id)),
            category_id: CategoryId::from(category),
            text: text.to_string(),
            is_completed: false,
            created_on: None,
            last_updated_on: None,
            local_key: None,
        }
    }

    fn category(id: &str, name: &str, items: Vec<TodoItem>) -> Category {
        Category { id: Some(CategoryId::from(id)), name: name.to_string(), created_on: None, items }
    }

    fn sample() -> Vec<Category> {
        vec![
            category("a", "Home", vec![item("1", "a", "dishes"), item("2", "a", "laundry"), item("3", "a", "bins")]),
            category("b", "Work", vec![item("4", "b", "report")]),
        ]
    }

    fn loaded(policy: TabSwitchPolicy) -> TodoState {
        update(TodoState::new(policy), Event::CategoriesLoaded(sample())).state
    }

    fn persisted(id: &str) -> ItemKey {
        ItemKey::Persisted(ItemId::from(id))
    }

    #[test]
    fn test_mount_requests_load() {
        let t = update(TodoState::default(), Event::Mounted);
        assert!(t.state.loading);
        assert!(!t.state.is_loaded());
        assert_eq!(t.commands, vec![Command::LoadCategories]);
    }

    #[test]
    fn test_load_selects_first_category() {
        let state = loaded(TabSwitchPolicy::Cached);
        assert!(state.is_loaded());
        assert!(!state.loading);
        assert_eq!(state.active_category_id(), Some(&CategoryId::from("a")));
        assert_eq!(state.items, sample()[0].items);
    }

    #[test]
    fn test_empty_load_has_no_active_category() {
        let t = update(TodoState::default(), Event::CategoriesLoaded(Vec::new()));
        assert!(t.state.is_loaded());
        assert_eq!(t.state.active_index, None);
        assert!(t.state.items.is_empty());
    }

    #[test]
    fn test_reload_keeps_selected_category() {
        let state = update(loaded(TabSwitchPolicy::Cached), Event::TabSelected(1)).state;
        let mut reordered = sample();
        reordered.reverse();

        let state = update(state, Event::CategoriesLoaded(reordered)).state;
        assert_eq!(state.active_index, Some(0));
        assert_eq!(state.active_category_id(), Some(&CategoryId::from("b")));
        assert_eq!(state.items[0].text, "report");
    }

    #[test]
    fn test_load_failure_keeps_prior_state() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::ReloadRequested);
        let error = ApiError::Network("connection refused".to_string());
        let state = update(t.state, Event::LoadFailed(error.clone())).state;

        assert_eq!(state.categories, before.categories);
        assert_eq!(state.items, before.items);
        assert!(!state.loading);
        assert_eq!(state.last_error, Some(error));
    }

    #[test]
    fn test_input_change_only_touches_input() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::InputChanged("buy".to_string()));
        assert!(t.commands.is_empty());
        assert_eq!(t.state, TodoState { input: "buy".to_string(), ..before });
    }

    #[test]
    fn test_submit_appends_draft_and_clears_input() {
        let state = update(loaded(TabSwitchPolicy::Cached), Event::InputChanged("buy milk".to_string())).state;
        let t = update(state, Event::Submitted);

        assert_eq!(t.state.input, "");
        assert_eq!(t.state.items.len(), 4);
        let added = t.state.items.last().unwrap();
        assert_eq!(added.text, "buy milk");
        assert!(!added.is_completed);
        assert_eq!(added.category_id, CategoryId::from("a"));
        assert_eq!(added.id, None);

        let key = added.local_key.unwrap();
        assert_eq!(t.commands, vec![Command::CreateItem { key, item: added.clone() }]);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let state = update(loaded(TabSwitchPolicy::Cached), Event::InputChanged("   ".to_string())).state;
        let t = update(state.clone(), Event::Submitted);
        assert_eq!(t.state, state);
        assert!(t.commands.is_empty());
    }

    #[test]
    fn test_submit_without_category_is_ignored() {
        let state = update(TodoState::default(), Event::InputChanged("orphan".to_string())).state;
        let t = update(state, Event::Submitted);
        assert!(t.state.items.is_empty());
        assert!(t.commands.is_empty());
    }

    #[test]
    fn test_edit_changes_only_target_text() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::TextEdited { key: persisted("2"), text: "fold laundry".to_string() });

        let mut expected = before.items.clone();
        expected[1].text = "fold laundry".to_string();
        assert_eq!(t.state.items, expected);
        assert_eq!(
            t.commands,
            vec![Command::UpdateItem {
                id: ItemId::from("2"),
                sent: expected[1].clone(),
                previous: before.items[1].clone(),
            }]
        );
    }

    #[test]
    fn test_edit_unknown_item_sends_nothing() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::TextEdited { key: persisted("nope"), text: "x".to_string() });
        assert_eq!(t.state, before);
        assert!(t.commands.is_empty());
    }

    #[test]
    fn test_toggle_flips_only_completion() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::CompletionToggled { key: persisted("1"), checked: true });

        let toggled = t.state.item(&persisted("1")).unwrap();
        assert!(toggled.is_completed);
        assert!(toggled.input_disabled());
        assert_eq!(toggled.text, "dishes");
        assert_eq!(&t.state.items[1..], &before.items[1..]);
        assert_eq!(t.commands.len(), 1);

        let t = update(t.state, Event::CompletionToggled { key: persisted("1"), checked: false });
        assert!(!t.state.items[0].input_disabled());
    }

    #[test]
    fn test_delete_keeps_order_of_remaining() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::DeleteRequested { key: persisted("2") });

        let texts: Vec<_> = t.state.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["dishes", "bins"]);
        assert_eq!(
            t.commands,
            vec![Command::DeleteItem { id: ItemId::from("2"), removed: before.items[1].clone(), position: 1 }]
        );
    }

    #[test]
    fn test_tab_select_uses_loaded_snapshot() {
        let state = loaded(TabSwitchPolicy::Cached);
        // edit on tab a, switch away and back: the edit is not in the snapshot
        let state = update(state, Event::TextEdited { key: persisted("1"), text: "changed".to_string() }).state;
        let t = update(state, Event::TabSelected(1));
        assert!(t.commands.is_empty());
        assert_eq!(t.state.active_category_id(), Some(&CategoryId::from("b")));
        assert_eq!(t.state.items, sample()[1].items);

        let t = update(t.state, Event::TabSelected(0));
        assert_eq!(t.state.items, sample()[0].items);
    }

    #[test]
    fn test_tab_select_out_of_range_is_ignored() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::TabSelected(5));
        assert_eq!(t.state, before);
    }

    #[test]
    fn test_refresh_policy_reloads_on_tab_select() {
        let t = update(loaded(TabSwitchPolicy::Refresh), Event::TabSelected(1));
        assert_eq!(t.commands, vec![Command::LoadCategories]);
        assert!(t.state.loading);
        assert_eq!(t.state.items, sample()[1].items);
    }

    fn submit(state: TodoState, text: &str) -> (TodoState, LocalKey, TodoItem) {
        let state = update(state, Event::InputChanged(text.to_string())).state;
        let t = update(state, Event::Submitted);
        match t.commands.as_slice() {
            [Command::CreateItem { key, item }] => (t.state.clone(), *key, item.clone()),
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_create_confirmed_assigns_id() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "buy milk");
        let created = TodoItem { id: Some(ItemId::from("new")), local_key: None, ..sent.clone() };

        let t = update(state, Event::CreateConfirmed { key, sent, created: Some(created) });
        assert!(t.commands.is_empty());
        let added = t.state.items.last().unwrap();
        assert_eq!(added.id, Some(ItemId::from("new")));
        assert_eq!(added.local_key, Some(key));
    }

    #[test]
    fn test_edit_while_pending_is_sent_after_create() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "buy milk");
        let t = update(state, Event::TextEdited { key: ItemKey::Local(key), text: "buy oat milk".to_string() });
        assert!(t.commands.is_empty());

        let created = TodoItem { id: Some(ItemId::from("new")), local_key: None, ..sent.clone() };
        let t = update(t.state, Event::CreateConfirmed { key, sent, created: Some(created) });
        match t.commands.as_slice() {
            [Command::UpdateItem { id, sent, previous }] => {
                assert_eq!(id, &ItemId::from("new"));
                assert_eq!(sent.text, "buy oat milk");
                assert_eq!(previous.text, "buy milk");
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_delete_while_pending_deletes_after_create() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "buy milk");
        let t = update(state, Event::DeleteRequested { key: ItemKey::Local(key) });
        assert!(t.commands.is_empty());
        assert_eq!(t.state.items.len(), 3);

        let created = TodoItem { id: Some(ItemId::from("new")), local_key: None, ..sent.clone() };
        let t = update(t.state, Event::CreateConfirmed { key, sent, created: Some(created) });
        match t.commands.as_slice() {
            [Command::DeleteItem { id, position, .. }] => {
                assert_eq!(id, &ItemId::from("new"));
                assert_eq!(*position, 3);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
        assert_eq!(t.state.items.len(), 3);
    }

    #[test]
    fn test_create_failure_removes_draft() {
        let before = loaded(TabSwitchPolicy::Cached);
        let (state, key, _) = submit(before.clone(), "buy milk");
        let error = ApiError::Status { status: 500, reason: "Internal Server Error".to_string() };

        let state = update(state, Event::CreateFailed { key, error: error.clone() }).state;
        assert_eq!(state.items, before.items);
        assert_eq!(state.last_error, Some(error));
    }

    #[test]
    fn test_update_failure_rolls_back() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::TextEdited { key: persisted("1"), text: "x".to_string() });
        let Command::UpdateItem { id, sent, previous } = t.commands[0].clone() else {
            panic!("expected update");
        };

        let error = ApiError::Network("offline".to_string());
        let state = update(t.state, Event::UpdateFailed { id, sent, previous, error }).state;
        assert_eq!(state.items, before.items);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_update_failure_keeps_newer_edit() {
        let state = loaded(TabSwitchPolicy::Cached);
        let t = update(state, Event::TextEdited { key: persisted("1"), text: "x".to_string() });
        let Command::UpdateItem { id, sent, previous } = t.commands[0].clone() else {
            panic!("expected update");
        };
        let state = update(t.state, Event::TextEdited { key: persisted("1"), text: "xy".to_string() }).state;

        let error = ApiError::Network("offline".to_string());
        let state = update(state, Event::UpdateFailed { id, sent, previous, error }).state;
        assert_eq!(state.items[0].text, "xy");
    }

    #[test]
    fn test_delete_failure_reinserts_at_position() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before.clone(), Event::DeleteRequested { key: persisted("2") });
        let Command::DeleteItem { removed, position, .. } = t.commands[0].clone() else {
            panic!("expected delete");
        };

        let error = ApiError::Network("offline".to_string());
        let state = update(t.state, Event::DeleteFailed { removed, position, error }).state;
        assert_eq!(state.items, before.items);
    }

    #[test]
    fn test_delete_failure_on_other_tab_is_not_reinserted() {
        let before = loaded(TabSwitchPolicy::Cached);
        let t = update(before, Event::DeleteRequested { key: persisted("2") });
        let Command::DeleteItem { removed, position, .. } = t.commands[0].clone() else {
            panic!("expected delete");
        };
        let state = update(t.state, Event::TabSelected(1)).state;

        let error = ApiError::Network("offline".to_string());
        let state = update(state, Event::DeleteFailed { removed, position, error }).state;
        assert_eq!(state.items, sample()[1].items);
    }

    #[test]
    fn test_error_dismissed() {
        let state = update(TodoState::default(), Event::LoadFailed(ApiError::Decode("bad".to_string()))).state;
        let state = update(state, Event::ErrorDismissed).state;
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn test_create_without_body_leaves_item_local() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "buy milk");
        let t = update(state, Event::CreateConfirmed { key, sent, created: None });

        assert!(t.commands.is_empty());
        let added = t.state.items.last().unwrap();
        assert_eq!(added.id, None);
        assert_eq!(added.local_key, Some(key));
        assert_eq!(t.state.last_error, None);
    }

    #[test]
    fn test_create_without_body_after_discard_reports_error() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "x");
        let state = update(state, Event::DeleteRequested { key: ItemKey::Local(key) }).state;
        let t = update(state, Event::CreateConfirmed { key, sent, created: None });

        assert!(t.commands.is_empty());
        assert!(matches!(t.state.last_error, Some(ApiError::Decode(_))));
    }

    #[test]
    fn test_create_confirmed_adopts_server_timestamps() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "buy milk");
        let stamp = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let created = TodoItem {
            id: Some(ItemId::from("new")),
            created_on: Some(stamp),
            last_updated_on: Some(stamp),
            local_key: None,
            ..sent.clone()
        };

        let state = update(state, Event::CreateConfirmed { key, sent, created: Some(created) }).state;
        let added = state.items.last().unwrap();
        assert_eq!(added.created_on, Some(stamp));
        assert_eq!(added.last_updated_on, Some(stamp));
    }

    #[test]
    fn test_delete_failure_skips_item_already_present() {
        let before = loaded(TabSwitchPolicy::Cached);
        let removed = before.items[1].clone();

        let error = ApiError::Network("offline".to_string());
        let state = update(before.clone(), Event::DeleteFailed { removed, position: 1, error }).state;
        assert_eq!(state.items, before.items);
    }

    #[test]
    fn test_delete_failure_clamps_position() {
        let state = loaded(TabSwitchPolicy::Cached);
        let t = update(state, Event::DeleteRequested { key: persisted("3") });
        let Command::DeleteItem { removed, position, .. } = t.commands[0].clone() else {
            panic!("expected delete");
        };
        assert_eq!(position, 2);
        let state = update(t.state, Event::DeleteRequested { key: persisted("1") }).state;

        let error = ApiError::Network("offline".to_string());
        let state = update(state, Event::DeleteFailed { removed, position, error }).state;
        let texts: Vec<_> = state.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["laundry", "bins"]);
    }

    #[test]
    fn test_reload_keeps_pending_draft() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "x");
        let state = update(state, Event::ReloadRequested).state;
        let state = update(state, Event::CategoriesLoaded(sample())).state;
        assert_eq!(state.items.len(), 4);
        assert_eq!(state.items.last().unwrap().local_key, Some(key));

        let created = TodoItem { id: Some(ItemId::from("new")), local_key: None, ..sent.clone() };
        let state = update(state, Event::CreateConfirmed { key, sent, created: Some(created) }).state;
        let ids: Vec<_> = state.items.iter().map(|i| i.id.clone().unwrap().0).collect();
        assert_eq!(ids, vec!["1", "2", "3", "new"]);
    }

    #[test]
    fn test_reload_listing_created_item_is_not_duplicated() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "x");
        let created = TodoItem { id: Some(ItemId::from("new")), local_key: None, ..sent.clone() };

        let mut categories = sample();
        categories[0].items.push(created.clone());
        let state = update(state, Event::CategoriesLoaded(categories)).state;
        assert_eq!(state.items.len(), 5);

        let state = update(state, Event::CreateConfirmed { key, sent, created: Some(created) }).state;
        assert_eq!(state.items.len(), 4);
        assert_eq!(state.items.last().unwrap().local_key, Some(key));
    }

    #[test]
    fn test_reload_drops_confirmed_drafts() {
        let (state, key, sent) = submit(loaded(TabSwitchPolicy::Cached), "x");
        let state = update(state, Event::CreateConfirmed { key, sent, created: None }).state;
        let state = update(state, Event::CategoriesLoaded(sample())).state;
        assert_eq!(state.items, sample()[0].items);
    }

    #[test]
    fn test_server_items_without_id_get_distinct_keys() {
        let mut categories = sample();
        let mut orphan = item("x", "a", "no id");
        orphan.id = None;
        categories[0].items = vec![orphan.clone(), orphan];

        let state = update(TodoState::default(), Event::CategoriesLoaded(categories)).state;
        let keys: Vec<_> = state.items.iter().map(TodoItem::key).collect();
        assert_ne!(keys[0], keys[1]);
        assert!(state.item(&keys[1]).is_some());

        // the keys stick to the snapshot across tab switches
        let state = update(state, Event::TabSelected(1)).state;
        let state = update(state, Event::TabSelected(0)).state;
        assert_eq!(state.items.iter().map(TodoItem::key).collect::<Vec<_>>(), keys);
    }
}
