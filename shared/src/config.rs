//! ==============================================================================
//! config.rs - api endpoint and tab behaviour
//! ==============================================================================
//!
//! nothing here is read at runtime. the defaults can be overridden when the
//! dashboard is built:
//!     TODO_API_BASE_URL   base url of the rest api (default below)
//!     TODO_TAB_SWITCH     "cached" (default) or "refresh"
//!
//! ==============================================================================

use std::str::FromStr;

use crate::error::ConfigError;
use crate::model::ItemId;

pub const DEFAULT_BASE_URL: &str = "https://localhost:7283/api";

/// what happens to the item list when another tab is selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabSwitchPolicy {
    /// reuse the items captured by the last category load
    #[default]
    Cached,
    /// show the cached items, then reload every category from the server
    Refresh,
}

impl FromStr for TabSwitchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cached" => Ok(TabSwitchPolicy::Cached),
            "refresh" => Ok(TabSwitchPolicy::Refresh),
            other => Err(ConfigError::UnknownTabSwitch(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    pub tab_switch: TabSwitchPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, tab_switch: TabSwitchPolicy::default() }
    }

    pub fn with_tab_switch(mut self, policy: TabSwitchPolicy) -> Self {
        self.tab_switch = policy;
        self
    }

    /// values baked in at compile time, falling back to the defaults
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("TODO_API_BASE_URL"), option_env!("TODO_TAB_SWITCH"))
    }

    fn from_values(base_url: Option<&str>, tab_switch: Option<&str>) -> Result<Self, ConfigError> {
        let config = Self::new(base_url.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_BASE_URL));
        match tab_switch.filter(|s| !s.is_empty()) {
            Some(raw) => Ok(config.with_tab_switch(raw.parse()?)),
            None => Ok(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn categories_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    pub fn items_url(&self) -> String {
        format!("{}/TodoItems/", self.base_url)
    }

    pub fn item_url(&self, id: &ItemId) -> String {
        format!("{}/TodoItems/{}", self.base_url, id)
    }
}
