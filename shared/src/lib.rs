//! ==============================================================================
//! lib.rs - shared core for the tabbed to-do dashboard
//! ==============================================================================
//!
//! purpose:
//!     everything the dashboard needs that does not touch the browser:
//!     wire types for the rest api, endpoint configuration, the error
//!     taxonomy, and the state machine that turns ui events into snapshots
//!     and http commands.
//!
//! relationships:
//!     - used by: dashboard (api client, controller, components)
//!
//! design rationale:
//!     keeping the state transitions pure means they run and test on the
//!     host; the wasm crate only wires signals and fetch calls around them.
//!
//! ==============================================================================

pub mod config;
pub mod error;
pub mod model;
pub mod state;

pub use config::{ApiConfig, TabSwitchPolicy, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError};
pub use model::{Category, CategoryId, ItemId, ItemKey, LocalKey, TodoItem};
pub use state::{update, Command, Event, TodoState, Transition};
