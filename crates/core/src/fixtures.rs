//! Static sample records served when no backend is configured or when a
//! backend call fails for good.
//!
//! The helpers reproduce the filter and pagination semantics of the live
//! backends so offline behaviour is deterministic.

use chrono::Utc;

use crate::checklist::ChecklistItems;
use crate::collection::{AirdropCollection, CollectionSummary, Stage};
use crate::filters::CollectionFilters;
use crate::pagination::{paginate, PageRequest, Paginated};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=200";

/// The fixture set, in display order.
pub fn sample_collections() -> Vec<AirdropCollection> {
    let now = Utc::now();

    vec![
        AirdropCollection {
            id: "1".into(),
            created_at: now,
            updated_at: Some(now),
            name: "Grass Protocol".into(),
            subtitle: "The Data Layer of AI".into(),
            image_url: Some(PLACEHOLDER_IMAGE.into()),
            image_cover: None,
            description: Some(
                "Grass Protocol is a decentralized data layer for AI applications, enabling secure \
                 and private data sharing."
                    .into(),
            ),
            backers: vec!["Polychain".into(), "Tribe Capital".into()],
            chain: "Solana".into(),
            cost: Some(0.0),
            stage: Stage::Active,
            requirements: ChecklistItems::from_pairs([
                ("Wallet", "Must have a Solana wallet"),
                ("Activity", "Must have used Solana DeFi at least once"),
            ]),
            how_to_steps: ChecklistItems::from_pairs([
                ("Connect Wallet", "Connect your Solana wallet"),
                ("Complete Tasks", "Complete the required tasks"),
                ("Claim Tokens", "Claim your GRASS tokens"),
            ]),
            user_id: "user-1".into(),
        },
        AirdropCollection {
            id: "2".into(),
            created_at: now,
            updated_at: Some(now),
            name: "Rabby Wallet".into(),
            subtitle: "Crypto Wallet".into(),
            image_url: Some(PLACEHOLDER_IMAGE.into()),
            image_cover: None,
            description: Some(
                "Rabby Wallet is a secure and user-friendly crypto wallet for Ethereum and \
                 EVM-compatible chains."
                    .into(),
            ),
            backers: vec!["n/a".into()],
            chain: "Ethereum/EVM".into(),
            cost: Some(0.0),
            stage: Stage::Active,
            requirements: ChecklistItems::from_pairs([
                ("Wallet", "Must have an Ethereum wallet"),
                ("Activity", "Must have used Ethereum DeFi at least once"),
            ]),
            how_to_steps: ChecklistItems::from_pairs([
                ("Install Wallet", "Install Rabby Wallet extension"),
                ("Complete Tasks", "Complete the required tasks"),
                ("Claim Tokens", "Claim your RABBY tokens"),
            ]),
            user_id: "user-2".into(),
        },
        AirdropCollection {
            id: "3".into(),
            created_at: now,
            updated_at: Some(now),
            name: "Rainbow Wallet".into(),
            subtitle: "Crypto Wallet".into(),
            image_url: Some(PLACEHOLDER_IMAGE.into()),
            image_cover: None,
            description: Some(
                "Rainbow Wallet is a fun, simple, and secure Ethereum wallet that makes managing \
                 your assets a joy."
                    .into(),
            ),
            backers: vec!["Seven Seven Six".into(), "Polygon".into()],
            chain: "Ethereum/EVM".into(),
            cost: Some(0.0),
            stage: Stage::Active,
            requirements: ChecklistItems::from_pairs([
                ("Wallet", "Must have an Ethereum wallet"),
                ("Activity", "Must have used Ethereum DeFi at least once"),
            ]),
            how_to_steps: ChecklistItems::from_pairs([
                ("Install Wallet", "Install Rainbow Wallet app"),
                ("Complete Tasks", "Complete the required tasks"),
                ("Claim Tokens", "Claim your RAINBOW tokens"),
            ]),
            user_id: "user-3".into(),
        },
    ]
}

pub fn summaries() -> Vec<CollectionSummary> {
    sample_collections().iter().map(CollectionSummary::from).collect()
}

pub fn find_by_id(id: &str) -> Option<AirdropCollection> {
    sample_collections().into_iter().find(|record| record.id == id)
}

pub fn paginated(request: PageRequest) -> Paginated<AirdropCollection> {
    paginate(&sample_collections(), request)
}

pub fn filtered(filters: &CollectionFilters, request: PageRequest) -> Paginated<AirdropCollection> {
    let matching: Vec<AirdropCollection> = sample_collections()
        .into_iter()
        .filter(|record| filters.matches(record))
        .collect();
    paginate(&matching, request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
