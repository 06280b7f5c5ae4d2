//! ==============================================================================
//! model.rs - wire types for the to-do REST api
//! ==============================================================================
//!
//! the server speaks camelCase json with a few legacy spellings
//! (`inputValue` for the item text, PascalCase timestamps on older builds).
//! everything server-assigned is optional so a locally created item can be
//! posted before it has an id.
//!
//! ==============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ==============================================================================
// identifiers
// ==============================================================================

/// server-assigned category identifier (opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

/// server-assigned item identifier (opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// client-only handle for an item the server has not acknowledged yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalKey(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// how the ui addresses a row, persisted or not
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Persisted(ItemId),
    Local(LocalKey),
}

// ==============================================================================
// entities
// ==============================================================================

/// a named group of to-do items, rendered as one tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
    #[serde(
        default,
        alias = "CreatedOn",
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<DateTime<Utc>>,
    /// items embedded by `GET /categories`; `null` and missing both mean empty
    #[serde(rename = "todoItems", default, deserialize_with = "null_as_empty")]
    pub items: Vec<TodoItem>,
}

/// a single to-do entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub category_id: CategoryId,
    #[serde(rename = "inputValue")]
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(
        default,
        alias = "CreatedOn",
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "LastUpdatedOn",
        with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated_on: Option<DateTime<Utc>>,
    /// set on items created in this session; kept after the server assigns an id
    /// so the row keeps a stable key
    #[serde(skip)]
    pub local_key: Option<LocalKey>,
}

impl TodoItem {
    /// unpersisted item as the add form creates it
    pub fn draft(category_id: CategoryId, text: impl Into<String>, key: LocalKey) -> Self {
        Self {
            id: None,
            category_id,
            text: text.into(),
            is_completed: false,
            created_on: None,
            last_updated_on: None,
            local_key: Some(key),
        }
    }

    /// stable row key: the local key when there is one, otherwise the id
    pub fn key(&self) -> ItemKey {
        match (self.local_key, &self.id) {
            (Some(local), _) => ItemKey::Local(local),
            (None, Some(id)) => ItemKey::Persisted(id.clone()),
            (None, None) => ItemKey::Local(LocalKey::default()),
        }
    }

    pub fn matches(&self, key: &ItemKey) -> bool {
        match key {
            ItemKey::Persisted(id) => self.id.as_ref() == Some(id),
            ItemKey::Local(local) => self.local_key == Some(*local),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// completed items are read-only in the list
    pub fn input_disabled(&self) -> bool {
        self.is_completed
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// rfc 3339 out, rfc 3339 or offset-less iso in (read as utc)
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Ok(ts.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()),
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================
