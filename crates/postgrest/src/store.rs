//! [`CollectionStore`] implementation over the hosted REST service.

use airdrop_core::collection::{AirdropCollection, CollectionSummary};
use airdrop_core::filters::CollectionFilters;
use airdrop_core::pagination::PageRequest;
use airdrop_core::store::{CollectionStore, StoreError};
use async_trait::async_trait;

use crate::client::{PostgrestClient, PostgrestConfig};
use crate::query::{filter_params, id_params, page_params, SUMMARY_COLUMNS};

#[derive(Debug, Clone)]
pub struct PostgrestCollectionStore {
    client: PostgrestClient,
}

impl PostgrestCollectionStore {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            client: PostgrestClient::new(config),
        }
    }
}

#[async_trait]
impl CollectionStore for PostgrestCollectionStore {
    fn name(&self) -> &'static str {
        "postgrest"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client.count(&[]).await.map(|_| ())
    }

    async fn select_all(&self) -> Result<Vec<AirdropCollection>, StoreError> {
        self.client.select("*", &[]).await
    }

    async fn select_summaries(&self) -> Result<Vec<CollectionSummary>, StoreError> {
        self.client.select(SUMMARY_COLUMNS, &[]).await
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<AirdropCollection>, StoreError> {
        let rows: Vec<AirdropCollection> = self.client.select("*", &id_params(id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn count(&self, filters: &CollectionFilters) -> Result<i64, StoreError> {
        self.client.count(&filter_params(filters)).await
    }

    async fn select_page(
        &self,
        filters: &CollectionFilters,
        request: PageRequest,
    ) -> Result<Vec<AirdropCollection>, StoreError> {
        let mut params = filter_params(filters);
        params.extend(page_params(request));
        self.client.select("*", &params).await
    }
}
