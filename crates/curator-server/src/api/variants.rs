use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use curator_core::{Tag, Variant, VariantId};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    json_body, map_store_error, path_param, ApiError, ApiResponse, AppState, ApprovalData,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MoveTagBody {
    tag_text: String,
    target_variant_id: VariantId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateGroupBody {
    source_variant_id: VariantId,
    tag_text: String,
}

/// Wholesale tag replacement, accepted under the legacy `productTags` key too.
#[derive(Debug, Deserialize)]
pub(super) struct UpdateVariantBody {
    #[serde(alias = "productTags")]
    tags: Vec<Tag>,
}

#[derive(Debug, Serialize)]
pub(super) struct MoveTagData {
    outcome: &'static str,
    source: Variant,
    target: Variant,
}

pub(super) async fn list_product_variants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Variant>>> {
    let variants = curator_store::list_variants(&state.catalog).await;
    Json(ApiResponse::new(variants, req_id.0))
}

pub(super) async fn move_variant_tag(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<MoveTagBody>, JsonRejection>,
) -> Result<Json<ApiResponse<MoveTagData>>, ApiError> {
    let body = json_body(&req_id.0, payload)?;

    let report = curator_store::move_tag(&state.catalog, &body.tag_text, body.target_variant_id)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        MoveTagData {
            outcome: report.outcome.as_str(),
            source: report.source,
            target: report.target,
        },
        req_id.0,
    )))
}

pub(super) async fn create_group(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CreateGroupBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Variant>>), ApiError> {
    let body = json_body(&req_id.0, payload)?;

    let report = curator_store::split_group(&state.catalog, body.source_variant_id, &body.tag_text)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(report.created, req_id.0)),
    ))
}

pub(super) async fn update_product_variant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<VariantId>, PathRejection>,
    payload: Result<Json<UpdateVariantBody>, JsonRejection>,
) -> Result<Json<ApiResponse<Variant>>, ApiError> {
    let id = path_param(&req_id.0, id)?;
    let body = json_body(&req_id.0, payload)?;

    let variant = curator_store::replace_variant_tags(&state.catalog, id, body.tags)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(variant, req_id.0)))
}

pub(super) async fn approve_product_groupings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ApprovalData>> {
    let approved = curator_store::approve_groupings(&state.catalog).await;
    Json(ApiResponse::new(ApprovalData { approved }, req_id.0))
}
