use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockmill API",
        version = env!("CARGO_PKG_VERSION"),
        description = r#"
# Stockmill Inventory & Production API

Backend for small manufacturers: an append-only stock ledger, end-of-day
production posting with variance bookkeeping, source documents (purchase
receipts, sales shipments, transfers, adjustments) and a full ledger rebuild.

## Conventions

- Quantities are fixed-point decimals; every ledger entry carries a signed delta.
- Balances are derived by summation, never stored.
- Deleting a document posts compensating entries; the audit trail is append-only.

## Pagination

List endpoints accept `page` and `page_size` query parameters.

## Error Handling

Errors use a consistent envelope with appropriate HTTP status codes:

```json
{
  "error": "Unprocessable Entity",
  "message": "Insufficient stock for item 3: available 5.00, required 8.00",
  "timestamp": "2024-03-01T00:00:00Z"
}
```
        "#,
        contact(
            name = "Stockmill Support",
            email = "support@stockmill.dev"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "stock", description = "Balances, movements, adjustments and rebuild"),
        (name = "production", description = "End-of-day production runs and BOM standards"),
        (name = "documents", description = "Purchase receipts, sales shipments and transfers")
    ),
    paths(
        // Stock
        crate::handlers::stock::get_stock_balance,
        crate::handlers::stock::list_stock_balances,
        crate::handlers::stock::list_stock_movements,
        crate::handlers::stock::adjust_stock,
        crate::handlers::stock::rebuild_ledger,

        // Production
        crate::handlers::production::create_run,
        crate::handlers::production::list_runs,
        crate::handlers::production::get_run,
        crate::handlers::production::update_run,
        crate::handlers::production::delete_run,
        crate::handlers::production::restore_run,
        crate::handlers::production::standard_consumptions,

        // Documents
        crate::handlers::documents::record_purchase_receipt,
        crate::handlers::documents::delete_purchase_receipt,
        crate::handlers::documents::restore_purchase_receipt,
        crate::handlers::documents::record_sales_shipment,
        crate::handlers::documents::delete_sales_shipment,
        crate::handlers::documents::restore_sales_shipment,
        crate::handlers::documents::record_transfer,
        crate::handlers::documents::delete_transfer,
        crate::handlers::documents::restore_transfer,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,

            crate::queries::stock_queries::StockBalance,
            crate::queries::stock_queries::StockMovementPage,
            crate::queries::production_queries::ProductionRunPage,

            crate::services::stock_ledger::AdjustStockInput,
            crate::services::rebuild::RebuildSummary,
            crate::services::bom::StandardConsumptionLine,
            crate::services::production::ConsumptionLineInput,
            crate::services::production::CreateEodRunInput,
            crate::services::production::ProductionRunDetail,
            crate::services::documents::RecordPurchaseReceiptInput,
            crate::services::documents::RecordSalesShipmentInput,
            crate::services::documents::RecordTransferInput,

            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_core_paths() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Stockmill API"));
        assert!(json.contains("/api/v1/stock/rebuild"));
        assert!(json.contains("/api/v1/production/runs"));
    }
}
