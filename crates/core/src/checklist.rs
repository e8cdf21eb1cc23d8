//! Requirement and how-to checklists attached to a collection record.
//!
//! The store keeps `requirements` and `how_to_steps` as loosely-typed JSON:
//! either an ordered list (of plain strings or `{title, description, url}`
//! objects) or a `{title: description}` mapping. [`RawChecklist`] captures
//! those two shapes and is resolved exactly once, at deserialization time,
//! into the canonical ordered [`ChecklistItems`] every consumer works with.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of a requirements or how-to checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ChecklistEntry {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
            url: None,
        }
    }
}

/// The two shapes a checklist column may hold in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RawChecklist {
    List(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl RawChecklist {
    /// Classify a JSON value. Scalars and `null` carry no checklist.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::List(items)),
            Value::Object(map) => Some(Self::Mapping(map)),
            _ => None,
        }
    }
}

/// Canonical ordered checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChecklistItems(Vec<ChecklistEntry>);

impl ChecklistItems {
    pub fn new(entries: Vec<ChecklistEntry>) -> Self {
        Self(entries)
    }

    /// Normalize an arbitrary JSON value from the store.
    pub fn from_value(value: Value) -> Self {
        RawChecklist::from_value(value).map(Self::from).unwrap_or_default()
    }

    /// Build from `(title, description)` pairs, keeping their order.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(title, description)| ChecklistEntry::new(title, Some(description.to_string())))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChecklistEntry> {
        self.0.iter()
    }
}

impl From<RawChecklist> for ChecklistItems {
    fn from(raw: RawChecklist) -> Self {
        let entries = match raw {
            RawChecklist::List(items) => items.into_iter().filter_map(list_entry).collect(),
            RawChecklist::Mapping(map) => map
                .into_iter()
                .map(|(title, value)| ChecklistEntry::new(title, text_of(value)))
                .collect(),
        };
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a ChecklistItems {
    type Item = &'a ChecklistEntry;
    type IntoIter = std::slice::Iter<'a, ChecklistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for ChecklistItems {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(Self::from_value).unwrap_or_default())
    }
}

/// Convert one list element. Strings become title-only entries, objects
/// contribute their `title`/`description`/`url` fields, `null` is dropped.
fn list_entry(value: Value) -> Option<ChecklistEntry> {
    match value {
        Value::Null => None,
        Value::Object(mut obj) => Some(ChecklistEntry {
            title: obj.remove("title").and_then(text_of).unwrap_or_default(),
            description: obj.remove("description").and_then(text_of),
            url: obj.remove("url").and_then(text_of),
        }),
        other => text_of(other).map(|title| ChecklistEntry::new(title, None)),
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
