//! Query parameter types for the listing endpoint.

use airdrop_core::error::CoreError;
use airdrop_core::filters::CollectionFilters;
use airdrop_core::pagination::{PageRequest, DEFAULT_PAGE_SIZE};
use serde::Deserialize;

/// `?page=&search=&chain=&cost=&stage=` on `GET /api/v1/airdrops`.
///
/// Every field arrives as raw text: `page` is parsed leniently and the
/// filter fields go through [`CollectionFilters::from_query`].
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub search: Option<String>,
    pub chain: Option<String>,
    /// `FREE` or `PAID`; anything else is ignored.
    pub cost: Option<String>,
    pub stage: Option<String>,
}

impl ListingParams {
    /// Requested page; missing, non-numeric or non-positive values mean 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page(), DEFAULT_PAGE_SIZE)
    }

    pub fn filters(&self) -> Result<CollectionFilters, CoreError> {
        CollectionFilters::from_query(
            self.search.as_deref(),
            self.chain.as_deref(),
            self.cost.as_deref(),
            self.stage.as_deref(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
