//! Row types for the `airdrop_collections` table.
//!
//! Identifiers are selected as text and `cost` as double precision so the
//! rows decode the same whether the columns are `uuid`/`numeric` or
//! `text`/`float8` in a given deployment.

use airdrop_core::checklist::ChecklistItems;
use airdrop_core::collection::{AirdropCollection, CollectionSummary};
use airdrop_core::error::CoreError;
use airdrop_core::types::Timestamp;
use sqlx::FromRow;

/// A full row from `airdrop_collections`.
#[derive(Debug, Clone, FromRow)]
pub struct AirdropCollectionRow {
    pub id: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub name: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub image_cover: Option<String>,
    pub description: Option<String>,
    pub backers: Vec<String>,
    pub chain: String,
    pub cost: Option<f64>,
    pub stage: String,
    pub requirements: Option<serde_json::Value>,
    pub how_to_steps: Option<serde_json::Value>,
    pub user_id: String,
}

/// The list-view projection of a row.
#[derive(Debug, Clone, FromRow)]
pub struct AirdropSummaryRow {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub chain: String,
    pub cost: Option<f64>,
    pub stage: String,
    pub backers: Vec<String>,
}

impl TryFrom<AirdropCollectionRow> for AirdropCollection {
    type Error = CoreError;

    fn try_from(row: AirdropCollectionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            stage: row.stage.parse()?,
            requirements: row
                .requirements
                .map(ChecklistItems::from_value)
                .unwrap_or_default(),
            how_to_steps: row
                .how_to_steps
                .map(ChecklistItems::from_value)
                .unwrap_or_default(),
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            name: row.name,
            subtitle: row.subtitle,
            image_url: row.image_url,
            image_cover: row.image_cover,
            description: row.description,
            backers: row.backers,
            chain: row.chain,
            cost: row.cost,
            user_id: row.user_id,
        })
    }
}

impl TryFrom<AirdropSummaryRow> for CollectionSummary {
    type Error = CoreError;

    fn try_from(row: AirdropSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            stage: row.stage.parse()?,
            id: row.id,
            name: row.name,
            subtitle: row.subtitle,
            image_url: row.image_url,
            chain: row.chain,
            cost: row.cost,
            backers: row.backers,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
