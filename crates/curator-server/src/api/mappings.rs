use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};
use curator_core::{CategoryMapping, MappingId};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    json_body, map_store_error, path_param, ApiError, ApiResponse, AppState, ApprovalData,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateMappingBody {
    selected_category: Option<String>,
}

pub(super) async fn list_mappings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryMapping>>> {
    let mappings = curator_store::list_category_mappings(&state.catalog).await;
    Json(ApiResponse::new(mappings, req_id.0))
}

pub(super) async fn update_mapping(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<MappingId>, PathRejection>,
    payload: Result<Json<UpdateMappingBody>, JsonRejection>,
) -> Result<Json<ApiResponse<CategoryMapping>>, ApiError> {
    let id = path_param(&req_id.0, id)?;
    let body = json_body(&req_id.0, payload)?;
    let Some(selected) = body.selected_category else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "selectedCategory is required",
        ));
    };

    let mapping = curator_store::update_category_mapping(&state.catalog, id, &selected)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(mapping, req_id.0)))
}

pub(super) async fn approve_mappings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ApprovalData>> {
    let approved = curator_store::approve_category_mappings(&state.catalog).await;
    Json(ApiResponse::new(ApprovalData { approved }, req_id.0))
}
