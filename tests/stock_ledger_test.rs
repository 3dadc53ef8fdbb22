mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use stockmill_api::{
    entities::{
        stock_adjustment::Entity as StockAdjustment,
        stock_ledger_entry::{Entity as StockLedgerEntry, StockReferenceType},
    },
    errors::ServiceError,
    events::Event,
    services::{
        documents::{
            DocumentService, RecordPurchaseReceiptInput, RecordSalesShipmentInput,
            RecordTransferInput,
        },
        stock_ledger::{AdjustStockInput, StockLedgerService},
    },
};

fn receipt_input(item_id: i64, warehouse_id: i64, quantity: Decimal) -> RecordPurchaseReceiptInput {
    RecordPurchaseReceiptInput {
        item_id,
        warehouse_id,
        quantity,
        receipt_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        supplier_name: Some("Acme Mills".to_string()),
        remarks: None,
    }
}

#[tokio::test]
async fn adjustment_posts_a_matching_ledger_entry() {
    let db = common::setup_test_db().await;
    let (events, mut rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let service = StockLedgerService::new(db.clone(), events, false);

    let adjustment = service
        .adjust_stock(AdjustStockInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: dec!(100),
            reason: "Opening stock count".to_string(),
            remarks: None,
        })
        .await
        .expect("adjustment should post");

    let balance = service
        .current_stock(item.id, warehouse.id)
        .await
        .expect("balance should read");
    assert_eq!(balance, dec!(100));

    let entries = StockLedgerEntry::find()
        .all(db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].reference_type, StockReferenceType::Adjustment);
    assert_eq!(entries[0].reference_id, adjustment.id);
    assert_eq!(entries[0].quantity, dec!(100));
    assert!(entries[0].is_inward());

    assert_matches!(
        rx.try_recv(),
        Ok(Event::StockAdjustmentRecorded { adjustment_id, .. }) if adjustment_id == adjustment.id
    );
}

#[tokio::test]
async fn zero_quantity_adjustment_is_rejected() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let service = StockLedgerService::new(db.clone(), events, false);

    let result = service
        .adjust_stock(AdjustStockInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: Decimal::ZERO,
            reason: "No-op".to_string(),
            remarks: None,
        })
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn overdraw_rolls_back_document_and_entry() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "SUGAR-01", "Sugar").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let service = StockLedgerService::new(db.clone(), events, false);

    let result = service
        .adjust_stock(AdjustStockInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: dec!(-5),
            reason: "Damage write-off".to_string(),
            remarks: None,
        })
        .await;
    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    // The whole transaction rolled back: no stranded document, no entry.
    let adjustments = StockAdjustment::find()
        .all(db.as_ref())
        .await
        .expect("adjustments should load");
    assert!(adjustments.is_empty());

    let entries = StockLedgerEntry::find()
        .all(db.as_ref())
        .await
        .expect("entries should load");
    assert!(entries.is_empty());

    let balance = service
        .current_stock(item.id, warehouse.id)
        .await
        .expect("balance should read");
    assert_eq!(balance, Decimal::ZERO);
}

#[tokio::test]
async fn negative_balance_allowed_when_configured() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "SUGAR-01", "Sugar").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let service = StockLedgerService::new(db.clone(), events, true);

    service
        .adjust_stock(AdjustStockInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: dec!(-5),
            reason: "Backdated shrinkage".to_string(),
            remarks: None,
        })
        .await
        .expect("override should allow negative balance");

    let balance = service
        .current_stock(item.id, warehouse.id)
        .await
        .expect("balance should read");
    assert_eq!(balance, dec!(-5));
}

#[tokio::test]
async fn adjustment_for_unknown_item_is_not_found() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;
    let service = StockLedgerService::new(db.clone(), events, false);

    let result = service
        .adjust_stock(AdjustStockInput {
            item_id: 9_999,
            warehouse_id: warehouse.id,
            quantity: dec!(1),
            reason: "Ghost item".to_string(),
            remarks: None,
        })
        .await;

    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn documents_conserve_total_stock() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let main = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;
    let shop = common::seed_warehouse(&db, "WH-SHOP", "Shop Floor").await;

    let documents = DocumentService::new(db.clone(), events.clone(), false);
    let ledger = StockLedgerService::new(db.clone(), events, false);

    documents
        .record_purchase_receipt(receipt_input(item.id, main.id, dec!(100)))
        .await
        .expect("receipt should post");

    documents
        .record_transfer(RecordTransferInput {
            item_id: item.id,
            from_warehouse_id: main.id,
            to_warehouse_id: shop.id,
            quantity: dec!(30),
            transfer_date: NaiveDate::from_ymd_opt(2024, 3, 2).expect("valid date"),
            remarks: None,
        })
        .await
        .expect("transfer should post");

    documents
        .record_sales_shipment(RecordSalesShipmentInput {
            item_id: item.id,
            warehouse_id: shop.id,
            quantity: dec!(20),
            shipment_date: NaiveDate::from_ymd_opt(2024, 3, 3).expect("valid date"),
            customer_name: Some("Corner Bakery".to_string()),
            remarks: None,
        })
        .await
        .expect("shipment should post");

    let at_main = ledger
        .current_stock(item.id, main.id)
        .await
        .expect("balance should read");
    let at_shop = ledger
        .current_stock(item.id, shop.id)
        .await
        .expect("balance should read");
    assert_eq!(at_main, dec!(70));
    assert_eq!(at_shop, dec!(10));

    // Receipts minus shipments equals the sum over every warehouse.
    assert_eq!(at_main + at_shop, dec!(80));

    // The transfer legs net to zero across the two warehouses.
    let entries = StockLedgerEntry::find()
        .all(db.as_ref())
        .await
        .expect("entries should load");
    let transfer_net = entries
        .iter()
        .filter(|e| {
            matches!(
                e.reference_type,
                StockReferenceType::TransferIn | StockReferenceType::TransferOut
            )
        })
        .fold(Decimal::ZERO, |acc, e| acc + e.quantity);
    assert_eq!(transfer_net, Decimal::ZERO);
}

#[tokio::test]
async fn shipment_cannot_overdraw_warehouse() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let documents = DocumentService::new(db.clone(), events, false);

    documents
        .record_purchase_receipt(receipt_input(item.id, warehouse.id, dec!(10)))
        .await
        .expect("receipt should post");

    let result = documents
        .record_sales_shipment(RecordSalesShipmentInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: dec!(11),
            shipment_date: NaiveDate::from_ymd_opt(2024, 3, 3).expect("valid date"),
            customer_name: None,
            remarks: None,
        })
        .await;

    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    // Only the receipt survived.
    let entries = StockLedgerEntry::find()
        .all(db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].reference_type, StockReferenceType::Purchase);
}

#[tokio::test]
async fn deleted_receipt_is_compensated_and_restorable() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let documents = DocumentService::new(db.clone(), events.clone(), false);
    let ledger = StockLedgerService::new(db.clone(), events, false);

    let receipt = documents
        .record_purchase_receipt(receipt_input(item.id, warehouse.id, dec!(40)))
        .await
        .expect("receipt should post");

    documents
        .delete_purchase_receipt(receipt.id)
        .await
        .expect("delete should post compensation");

    let balance = ledger
        .current_stock(item.id, warehouse.id)
        .await
        .expect("balance should read");
    assert_eq!(balance, Decimal::ZERO);

    // History is append-only: the original entry and its compensation.
    let entries = StockLedgerEntry::find()
        .all(db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(entries.len(), 2);

    documents
        .restore_purchase_receipt(receipt.id)
        .await
        .expect("restore should repost");

    let balance = ledger
        .current_stock(item.id, warehouse.id)
        .await
        .expect("balance should read");
    assert_eq!(balance, dec!(40));

    // Deleting twice is refused.
    documents
        .delete_purchase_receipt(receipt.id)
        .await
        .expect("second delete after restore should work");
    let result = documents.delete_purchase_receipt(receipt.id).await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn deleting_receipt_that_backs_later_outflows_is_refused() {
    let db = common::setup_test_db().await;
    let (events, _rx) = common::test_event_sender();

    let item = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let documents = DocumentService::new(db.clone(), events, false);

    let receipt = documents
        .record_purchase_receipt(receipt_input(item.id, warehouse.id, dec!(10)))
        .await
        .expect("receipt should post");

    documents
        .record_sales_shipment(RecordSalesShipmentInput {
            item_id: item.id,
            warehouse_id: warehouse.id,
            quantity: dec!(6),
            shipment_date: NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"),
            customer_name: None,
            remarks: None,
        })
        .await
        .expect("shipment should post");

    // Removing the receipt would leave the pair at -6.
    let result = documents.delete_purchase_receipt(receipt.id).await;
    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));
}
