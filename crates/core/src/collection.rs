//! The airdrop collection record and its list-view projection.
//!
//! Records are owned by the backing store; this crate only reads them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::checklist::ChecklistItems;
use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Lifecycle label of a tracked project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Active,
    Upcoming,
    Ended,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Active, Stage::Upcoming, Stage::Ended];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Active => "active",
            Stage::Upcoming => "upcoming",
            Stage::Ended => "ended",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown stage '{wanted}', expected one of: active, upcoming, ended"
                ))
            })
    }
}

/// A blockchain project tracked by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirdropCollection {
    pub id: RecordId,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    pub name: String,
    pub subtitle: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_cover: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backers: Vec<String>,
    pub chain: String,
    #[serde(default)]
    pub cost: Option<f64>,
    pub stage: Stage,
    #[serde(default)]
    pub requirements: ChecklistItems,
    #[serde(default)]
    pub how_to_steps: ChecklistItems,
    pub user_id: String,
}

impl AirdropCollection {
    /// A missing or zero cost means the airdrop is free to join.
    pub fn is_free(&self) -> bool {
        is_free(self.cost)
    }

    /// Human-readable cost badge (`Free` or `$<cost>`).
    pub fn cost_label(&self) -> String {
        cost_label(self.cost)
    }

    /// Banner image: the cover if present, otherwise the profile image.
    pub fn banner_image(&self) -> Option<&str> {
        self.image_cover.as_deref().or(self.image_url.as_deref())
    }
}

/// Columns shown in list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: RecordId,
    pub name: String,
    pub subtitle: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub chain: String,
    #[serde(default)]
    pub cost: Option<f64>,
    pub stage: Stage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backers: Vec<String>,
}

impl CollectionSummary {
    pub fn is_free(&self) -> bool {
        is_free(self.cost)
    }
}

impl From<&AirdropCollection> for CollectionSummary {
    fn from(record: &AirdropCollection) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            subtitle: record.subtitle.clone(),
            image_url: record.image_url.clone(),
            chain: record.chain.clone(),
            cost: record.cost,
            stage: record.stage,
            backers: record.backers.clone(),
        }
    }
}

fn is_free(cost: Option<f64>) -> bool {
    cost.map_or(true, |c| c == 0.0)
}

fn cost_label(cost: Option<f64>) -> String {
    match cost {
        Some(c) if c != 0.0 => format!("${c}"),
        _ => "Free".to_string(),
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
