use crate::{
    entities::{purchase_receipt, sales_shipment, stock_transfer},
    errors::ServiceError,
    services::documents::{RecordPurchaseReceiptInput, RecordSalesShipmentInput, RecordTransferInput},
    ApiResponse, ApiResult, AppState,
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};

/// Record a purchase receipt and post its inward ledger entry
#[utoipa::path(
    post,
    path = "/api/v1/documents/purchase-receipts",
    request_body = RecordPurchaseReceiptInput,
    responses(
        (status = 201, description = "Receipt recorded", body = ApiResponse<purchase_receipt::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item or warehouse not found", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn record_purchase_receipt(
    State(state): State<AppState>,
    Json(input): Json<RecordPurchaseReceiptInput>,
) -> Result<(StatusCode, Json<ApiResponse<purchase_receipt::Model>>), ServiceError> {
    let receipt = state.services.documents.record_purchase_receipt(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(receipt))))
}

/// Soft-delete a purchase receipt, posting a compensating entry
#[utoipa::path(
    delete,
    path = "/api/v1/documents/purchase-receipts/{id}",
    params(("id" = i64, Path, description = "Receipt id")),
    responses(
        (status = 200, description = "Receipt deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn delete_purchase_receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.services.documents.delete_purchase_receipt(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Restore a soft-deleted purchase receipt
#[utoipa::path(
    post,
    path = "/api/v1/documents/purchase-receipts/{id}/restore",
    params(("id" = i64, Path, description = "Receipt id")),
    responses(
        (status = 200, description = "Receipt restored", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn restore_purchase_receipt(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.services.documents.restore_purchase_receipt(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Record a sales shipment and post its outward ledger entry
#[utoipa::path(
    post,
    path = "/api/v1/documents/sales-shipments",
    request_body = RecordSalesShipmentInput,
    responses(
        (status = 201, description = "Shipment recorded", body = ApiResponse<sales_shipment::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn record_sales_shipment(
    State(state): State<AppState>,
    Json(input): Json<RecordSalesShipmentInput>,
) -> Result<(StatusCode, Json<ApiResponse<sales_shipment::Model>>), ServiceError> {
    let shipment = state.services.documents.record_sales_shipment(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(shipment))))
}

/// Soft-delete a sales shipment, returning its quantity to stock
#[utoipa::path(
    delete,
    path = "/api/v1/documents/sales-shipments/{id}",
    params(("id" = i64, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn delete_sales_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.services.documents.delete_sales_shipment(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Restore a soft-deleted sales shipment
#[utoipa::path(
    post,
    path = "/api/v1/documents/sales-shipments/{id}/restore",
    params(("id" = i64, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment restored", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn restore_sales_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.services.documents.restore_sales_shipment(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Record a warehouse-to-warehouse transfer as a paired entry
#[utoipa::path(
    post,
    path = "/api/v1/documents/transfers",
    request_body = RecordTransferInput,
    responses(
        (status = 201, description = "Transfer recorded", body = ApiResponse<stock_transfer::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn record_transfer(
    State(state): State<AppState>,
    Json(input): Json<RecordTransferInput>,
) -> Result<(StatusCode, Json<ApiResponse<stock_transfer::Model>>), ServiceError> {
    let transfer = state.services.documents.record_transfer(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(transfer))))
}

/// Soft-delete a transfer, reversing both legs
#[utoipa::path(
    delete,
    path = "/api/v1/documents/transfers/{id}",
    params(("id" = i64, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Transfer not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn delete_transfer(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.services.documents.delete_transfer(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Restore a soft-deleted transfer, re-posting both legs
#[utoipa::path(
    post,
    path = "/api/v1/documents/transfers/{id}/restore",
    params(("id" = i64, Path, description = "Transfer id")),
    responses(
        (status = 200, description = "Transfer restored", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Transfer not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn restore_transfer(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.services.documents.restore_transfer(id).await?;
    Ok(Json(ApiResponse::success(())))
}
