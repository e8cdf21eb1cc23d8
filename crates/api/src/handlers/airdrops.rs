//! Handlers for the airdrop directory pages.
//!
//! The listing and detail endpoints need live data: without a configured
//! backend they answer `CONFIG_MISSING` instead of serving sample records.

use airdrop_core::collection::AirdropCollection;
use airdrop_core::error::CoreError;
use airdrop_core::filters::CollectionFilters;
use airdrop_core::pagination::total_pages;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::ListingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// One page of the directory listing.
#[derive(Debug, Serialize)]
pub struct AirdropListing {
    pub items: Vec<AirdropCollection>,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    /// Records matching the filters across all pages.
    pub count: i64,
    /// Filters as applied, echoed back for the filter controls.
    pub filters: CollectionFilters,
}

/// A single record with its derived display fields.
#[derive(Debug, Serialize)]
pub struct AirdropDetail {
    #[serde(flatten)]
    pub collection: AirdropCollection,
    pub is_free: bool,
    pub cost_label: String,
    /// Cover image, or the profile image when there is no cover.
    pub banner_image: Option<String>,
}

impl From<AirdropCollection> for AirdropDetail {
    fn from(collection: AirdropCollection) -> Self {
        Self {
            is_free: collection.is_free(),
            cost_label: collection.cost_label(),
            banner_image: collection.banner_image().map(str::to_string),
            collection,
        }
    }
}

/// GET /api/v1/airdrops?page=&search=&chain=&cost=&stage=
///
/// Unfiltered requests read the plain paginated list; any filter switches
/// to the filtered query.
pub async fn list_airdrops(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.filters()?;
    let request = params.page_request();

    if !state.catalog.is_configured() {
        return Err(AppError::ConfigMissing);
    }

    let page = if filters.is_empty() {
        state.catalog.paginated(request).await?
    } else {
        state.catalog.filtered(&filters, request).await?
    };

    tracing::debug!(
        page = request.page,
        count = page.count,
        filtered = !filters.is_empty(),
        "Listed airdrops",
    );

    Ok(Json(DataResponse {
        data: AirdropListing {
            items: page.data,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(page.count, request.page_size),
            count: page.count,
            filters,
        },
    }))
}

/// GET /api/v1/airdrops/{id}
pub async fn get_airdrop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !state.catalog.is_configured() {
        return Err(AppError::ConfigMissing);
    }

    let found = state.catalog.collection_by_id(&id).await?;
    let collection = found.ok_or(CoreError::NotFound {
        entity: "Airdrop",
        id,
    })?;

    Ok(Json(DataResponse {
        data: AirdropDetail::from(collection),
    }))
}

/// GET /api/v1/airdrops/summaries
pub async fn list_summaries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summaries = state.catalog.collections_for_list().await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/airdrops/all
pub async fn list_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let collections = state.catalog.all_collections().await?;
    Ok(Json(DataResponse { data: collections }))
}
