use crate::{
    errors::ServiceError,
    queries::production_queries::{
        GetProductionRunQuery, ListProductionRunsQuery, ProductionRunPage, Query,
    },
    services::{
        bom::StandardConsumptionLine,
        production::{CreateEodRunInput, ProductionRunDetail},
    },
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Json, Path, Query as UrlQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct RunListFilters {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StandardsFilters {
    pub output_item_id: i64,
    pub batch_count: i32,
}

/// Post an end-of-day production run
#[utoipa::path(
    post,
    path = "/api/v1/production/runs",
    request_body = CreateEodRunInput,
    responses(
        (status = 201, description = "Run posted", body = ApiResponse<ProductionRunDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn create_run(
    State(state): State<AppState>,
    Json(input): Json<CreateEodRunInput>,
) -> Result<(StatusCode, Json<ApiResponse<ProductionRunDetail>>), ServiceError> {
    let detail = state.services.production.create_eod_run(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(detail))))
}

/// List production runs, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/production/runs",
    params(RunListFilters),
    responses(
        (status = 200, description = "Runs returned", body = ApiResponse<ProductionRunPage>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn list_runs(
    State(state): State<AppState>,
    UrlQuery(filters): UrlQuery<RunListFilters>,
) -> ApiResult<ProductionRunPage> {
    let page = ListProductionRunsQuery {
        page: filters.page.unwrap_or(1),
        page_size: filters
            .page_size
            .unwrap_or(state.config.api_default_page_size as u64)
            .min(state.config.api_max_page_size as u64),
        include_deleted: filters.include_deleted,
    }
    .execute(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Run header plus consumption lines
#[utoipa::path(
    get,
    path = "/api/v1/production/runs/{id}",
    params(("id" = i64, Path, description = "Production run id")),
    responses(
        (status = 200, description = "Run returned", body = ApiResponse<ProductionRunDetail>),
        (status = 404, description = "Run not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ProductionRunDetail> {
    let detail = GetProductionRunQuery { run_id: id }.execute(&state.db).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Correct a posted run by delete-and-repost
#[utoipa::path(
    put,
    path = "/api/v1/production/runs/{id}",
    params(("id" = i64, Path, description = "Production run id")),
    request_body = CreateEodRunInput,
    responses(
        (status = 200, description = "Run corrected", body = ApiResponse<ProductionRunDetail>),
        (status = 404, description = "Run not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn update_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CreateEodRunInput>,
) -> ApiResult<ProductionRunDetail> {
    let detail = state.services.production.update_eod_run(id, input).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// Soft-delete a run, posting compensating ledger entries
#[utoipa::path(
    delete,
    path = "/api/v1/production/runs/{id}",
    params(("id" = i64, Path, description = "Production run id")),
    responses(
        (status = 200, description = "Run deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Run not found", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn delete_run(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.services.production.delete_eod_run(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Restore a soft-deleted run, re-posting its ledger effect
#[utoipa::path(
    post,
    path = "/api/v1/production/runs/{id}/restore",
    params(("id" = i64, Path, description = "Production run id")),
    responses(
        (status = 200, description = "Run restored", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Run not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn restore_run(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.services.production.restore_eod_run(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// BOM-derived standard consumptions for the entry screen prefill
#[utoipa::path(
    get,
    path = "/api/v1/production/standards",
    params(StandardsFilters),
    responses(
        (status = 200, description = "Standard consumptions returned", body = ApiResponse<Vec<StandardConsumptionLine>>),
        (status = 404, description = "No active recipe", body = crate::errors::ErrorResponse)
    ),
    tag = "production"
)]
pub async fn standard_consumptions(
    State(state): State<AppState>,
    UrlQuery(filters): UrlQuery<StandardsFilters>,
) -> ApiResult<Vec<StandardConsumptionLine>> {
    let lines = state
        .services
        .bom
        .standard_consumptions(filters.output_item_id, filters.batch_count)
        .await?;
    Ok(Json(ApiResponse::success(lines)))
}
