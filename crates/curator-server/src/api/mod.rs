mod mappings;
mod skus;
mod variants;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use curator_store::{Catalog, ErrorKind, StoreError};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Acknowledgement returned by the approve endpoints.
#[derive(Debug, Serialize)]
pub(super) struct ApprovalData {
    approved: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    variants: usize,
    mappings: usize,
    skus: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" | "invalid_operation" => StatusCode::BAD_REQUEST,
            "forbidden_move" => StatusCode::CONFLICT,
            "incompatible_attributes" => StatusCode::UNPROCESSABLE_ENTITY,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Translate a store rejection into the API error taxonomy.
pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    let code = match error.kind() {
        ErrorKind::NotFound => "not_found",
        ErrorKind::InvalidOperation => "invalid_operation",
        ErrorKind::IncompatibleAttributes => "incompatible_attributes",
        ErrorKind::Forbidden => "forbidden_move",
        ErrorKind::ValidationError => "validation_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

/// Unwrap a JSON body, reporting malformed payloads in the standard error shape.
pub(super) fn json_body<T>(
    request_id: &str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        ApiError::new(request_id, "validation_error", rejection.body_text())
    })
}

/// Unwrap a path parameter, reporting unparsable ids in the standard error shape.
pub(super) fn path_param<T>(
    request_id: &str,
    param: Result<Path<T>, PathRejection>,
) -> Result<T, ApiError> {
    param.map(|Path(value)| value).map_err(|rejection| {
        ApiError::new(request_id, "validation_error", rejection.body_text())
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/product-variants",
            get(variants::list_product_variants),
        )
        .route(
            "/api/v1/product-variants/move-tag",
            post(variants::move_variant_tag),
        )
        .route(
            "/api/v1/product-variants/create-group",
            post(variants::create_group),
        )
        .route(
            "/api/v1/product-variants/approve",
            post(variants::approve_product_groupings),
        )
        .route(
            "/api/v1/product-variants/{id}",
            patch(variants::update_product_variant),
        )
        .route(
            "/api/v1/category-mappings",
            get(mappings::list_mappings),
        )
        .route(
            "/api/v1/category-mappings/approve",
            post(mappings::approve_mappings),
        )
        .route(
            "/api/v1/category-mappings/{id}",
            patch(mappings::update_mapping),
        )
        .route(
            "/api/v1/product-skus",
            get(skus::list_skus).post(skus::create_sku),
        )
        .route("/api/v1/product-skus/{id}", patch(skus::update_sku))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let summary = state.catalog.summary().await;
    Json(ApiResponse::new(
        HealthData {
            status: "ok",
            variants: summary.variants,
            mappings: summary.mappings,
            skus: summary.skus,
        },
        req_id.0,
    ))
}

pub fn rate_limit_state(max_requests: usize, window_secs: u64) -> RateLimitState {
    RateLimitState::new(max_requests, Duration::from_secs(window_secs))
}
