use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use curator_core::{
    NewProductSku, ProductSku, ProductSkuPatch, SkuId, SkuSortKey, SkuStatus, SortOrder,
};
use curator_store::SkuListFilters;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_body, map_store_error, path_param, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SkuQuery {
    page: Option<usize>,
    limit: Option<usize>,
    sort_by: Option<SkuSortKey>,
    sort_order: Option<SortOrder>,
    seller: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    status: Option<SkuStatus>,
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SkuPageData {
    items: Vec<ProductSku>,
    total: usize,
    page: usize,
    limit: usize,
}

pub(super) async fn list_skus(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SkuQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<SkuPageData>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    let page = curator_store::list_product_skus(
        &state.catalog,
        &SkuListFilters {
            seller: query.seller.as_deref(),
            brand: query.brand.as_deref(),
            category: query.category.as_deref(),
            status: query.status,
            search: query.search.as_deref(),
            sort_by: query.sort_by.unwrap_or_default(),
            sort_order: query.sort_order.unwrap_or_default(),
            page: query.page,
            limit: query.limit,
        },
    )
    .await;

    Ok(Json(ApiResponse::new(
        SkuPageData {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        },
        req_id.0,
    )))
}

pub(super) async fn create_sku(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<NewProductSku>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProductSku>>), ApiError> {
    let new = json_body(&req_id.0, payload)?;

    let sku = curator_store::create_product_sku(&state.catalog, new)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(sku, req_id.0))))
}

pub(super) async fn update_sku(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<SkuId>, PathRejection>,
    payload: Result<Json<ProductSkuPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<ProductSku>>, ApiError> {
    let id = path_param(&req_id.0, id)?;
    let patch = json_body(&req_id.0, payload)?;

    let sku = curator_store::update_product_sku(&state.catalog, id, patch)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(sku, req_id.0)))
}
