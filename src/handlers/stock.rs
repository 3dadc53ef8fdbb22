use crate::{
    entities::stock_adjustment,
    errors::ServiceError,
    queries::stock_queries::{
        GetAllStockBalancesQuery, GetStockBalanceQuery, GetStockMovementsQuery, Query,
        StockBalance, StockMovementPage,
    },
    services::{rebuild::RebuildSummary, stock_ledger::AdjustStockInput},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Json, Path, Query as UrlQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BalanceFilters {
    #[serde(default)]
    pub include_zero: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct MovementFilters {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Current balance for one item/warehouse pair
#[utoipa::path(
    get,
    path = "/api/v1/stock/balance/{item_id}/{warehouse_id}",
    params(
        ("item_id" = i64, Path, description = "Item id"),
        ("warehouse_id" = i64, Path, description = "Warehouse id"),
    ),
    responses(
        (status = 200, description = "Balance returned", body = ApiResponse<StockBalance>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn get_stock_balance(
    State(state): State<AppState>,
    Path((item_id, warehouse_id)): Path<(i64, i64)>,
) -> ApiResult<StockBalance> {
    let balance = GetStockBalanceQuery {
        item_id,
        warehouse_id,
    }
    .execute(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(balance)))
}

/// Balances for every pair with ledger activity
#[utoipa::path(
    get,
    path = "/api/v1/stock/balances",
    params(BalanceFilters),
    responses(
        (status = 200, description = "Balances returned", body = ApiResponse<Vec<StockBalance>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn list_stock_balances(
    State(state): State<AppState>,
    UrlQuery(filters): UrlQuery<BalanceFilters>,
) -> ApiResult<Vec<StockBalance>> {
    let balances = GetAllStockBalancesQuery {
        include_zero: filters.include_zero,
    }
    .execute(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(balances)))
}

/// Ledger movements for a pair, newest first
#[utoipa::path(
    get,
    path = "/api/v1/stock/movements/{item_id}/{warehouse_id}",
    params(
        ("item_id" = i64, Path, description = "Item id"),
        ("warehouse_id" = i64, Path, description = "Warehouse id"),
        MovementFilters,
    ),
    responses(
        (status = 200, description = "Movements returned", body = ApiResponse<StockMovementPage>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn list_stock_movements(
    State(state): State<AppState>,
    Path((item_id, warehouse_id)): Path<(i64, i64)>,
    UrlQuery(filters): UrlQuery<MovementFilters>,
) -> ApiResult<StockMovementPage> {
    let page = GetStockMovementsQuery {
        item_id,
        warehouse_id,
        page: filters.page.unwrap_or(1),
        page_size: filters
            .page_size
            .unwrap_or(state.config.api_default_page_size as u64)
            .min(state.config.api_max_page_size as u64),
    }
    .execute(&state.db)
    .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Record a manual stock adjustment
#[utoipa::path(
    post,
    path = "/api/v1/stock/adjustments",
    request_body = AdjustStockInput,
    responses(
        (status = 201, description = "Adjustment posted", body = ApiResponse<stock_adjustment::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Json(input): Json<AdjustStockInput>,
) -> Result<(StatusCode, Json<ApiResponse<stock_adjustment::Model>>), ServiceError> {
    let adjustment = state.services.stock_ledger.adjust_stock(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(adjustment))))
}

/// Wipe and re-derive the ledger from active source documents
#[utoipa::path(
    post,
    path = "/api/v1/stock/rebuild",
    responses(
        (status = 200, description = "Ledger rebuilt", body = ApiResponse<RebuildSummary>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn rebuild_ledger(State(state): State<AppState>) -> ApiResult<RebuildSummary> {
    let summary = state.services.rebuild.rebuild_inventory().await?;
    Ok(Json(ApiResponse::success(summary)))
}
