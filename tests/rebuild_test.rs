mod common;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use stockmill_api::{
    db::DbPool,
    entities::stock_ledger_entry::{self, Entity as StockLedgerEntry, StockReferenceType},
    events::Event,
    services::{
        documents::{
            DocumentService, RecordPurchaseReceiptInput, RecordSalesShipmentInput,
            RecordTransferInput,
        },
        production::{ConsumptionLineInput, CreateEodRunInput, ProductionService},
        rebuild::RebuildService,
        stock_ledger::{AdjustStockInput, StockLedgerService},
    },
};

struct World {
    db: std::sync::Arc<DbPool>,
    documents: DocumentService,
    production: ProductionService,
    ledger: StockLedgerService,
    rebuild: RebuildService,
    events_rx: tokio::sync::mpsc::Receiver<Event>,
    flour_id: i64,
    cake_id: i64,
    main_id: i64,
    shop_id: i64,
}

async fn world() -> World {
    let db = common::setup_test_db().await;
    let (events, events_rx) = common::test_event_sender();

    let flour = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let cake = common::seed_item(&db, "CAKE-01", "Tea Cake").await;
    let main = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;
    let shop = common::seed_warehouse(&db, "WH-SHOP", "Shop Floor").await;

    World {
        documents: DocumentService::new(db.clone(), events.clone(), false),
        production: ProductionService::new(db.clone(), events.clone(), false),
        ledger: StockLedgerService::new(db.clone(), events.clone(), false),
        rebuild: RebuildService::new(db.clone(), events),
        events_rx,
        db,
        flour_id: flour.id,
        cake_id: cake.id,
        main_id: main.id,
        shop_id: shop.id,
    }
}

/// Records one of every document type. Leaves flour at 35 in the main
/// warehouse, 10 in the shop, and 10 cakes in the main warehouse.
async fn record_document_mix(w: &World) {
    w.documents
        .record_purchase_receipt(RecordPurchaseReceiptInput {
            item_id: w.flour_id,
            warehouse_id: w.main_id,
            quantity: dec!(100),
            receipt_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            supplier_name: Some("Acme Mills".to_string()),
            remarks: None,
        })
        .await
        .expect("receipt should post");

    w.documents
        .record_transfer(RecordTransferInput {
            item_id: w.flour_id,
            from_warehouse_id: w.main_id,
            to_warehouse_id: w.shop_id,
            quantity: dec!(30),
            transfer_date: NaiveDate::from_ymd_opt(2024, 3, 2).expect("valid date"),
            remarks: None,
        })
        .await
        .expect("transfer should post");

    w.documents
        .record_sales_shipment(RecordSalesShipmentInput {
            item_id: w.flour_id,
            warehouse_id: w.shop_id,
            quantity: dec!(20),
            shipment_date: NaiveDate::from_ymd_opt(2024, 3, 3).expect("valid date"),
            customer_name: Some("Corner Bakery".to_string()),
            remarks: None,
        })
        .await
        .expect("shipment should post");

    w.production
        .create_eod_run(CreateEodRunInput {
            production_date: NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"),
            output_item_id: w.cake_id,
            output_quantity: dec!(10),
            warehouse_id: w.main_id,
            batch_count: 1,
            remarks: None,
            consumptions: vec![ConsumptionLineInput {
                item_id: w.flour_id,
                standard_qty: dec!(30),
                actual_qty: dec!(30),
                operator_closing: None,
                remarks: None,
            }],
        })
        .await
        .expect("run should post");

    w.ledger
        .adjust_stock(AdjustStockInput {
            item_id: w.flour_id,
            warehouse_id: w.main_id,
            quantity: dec!(-5),
            reason: "Cycle count shortfall".to_string(),
            remarks: None,
        })
        .await
        .expect("adjustment should post");
}

async fn balances(w: &World) -> (Decimal, Decimal, Decimal) {
    let flour_main = w
        .ledger
        .current_stock(w.flour_id, w.main_id)
        .await
        .expect("balance should read");
    let flour_shop = w
        .ledger
        .current_stock(w.flour_id, w.shop_id)
        .await
        .expect("balance should read");
    let cake_main = w
        .ledger
        .current_stock(w.cake_id, w.main_id)
        .await
        .expect("balance should read");
    (flour_main, flour_shop, cake_main)
}

#[tokio::test]
async fn rebuild_reproduces_document_derived_balances() {
    let w = world().await;
    record_document_mix(&w).await;

    let before = balances(&w).await;
    assert_eq!(before, (dec!(35), dec!(10), dec!(10)));

    let summary = w
        .rebuild
        .rebuild_inventory()
        .await
        .expect("rebuild should run");

    assert_eq!(balances(&w).await, before);
    assert_eq!(summary.purchase_receipts, 1);
    assert_eq!(summary.sales_shipments, 1);
    assert_eq!(summary.stock_transfers, 1);
    assert_eq!(summary.production_runs, 1);
    assert_eq!(summary.stock_adjustments, 1);
    // Receipt + shipment + two transfer legs + consume + output + adjustment.
    assert_eq!(summary.entries_written, 7);
}

#[tokio::test]
async fn rebuild_is_idempotent() {
    let mut w = world().await;
    record_document_mix(&w).await;

    let first = w
        .rebuild
        .rebuild_inventory()
        .await
        .expect("first rebuild should run");
    let balances_after_first = balances(&w).await;
    let entries_after_first = StockLedgerEntry::find()
        .count(w.db.as_ref())
        .await
        .expect("count should run");

    let second = w
        .rebuild
        .rebuild_inventory()
        .await
        .expect("second rebuild should run");

    assert_eq!(balances(&w).await, balances_after_first);
    assert_eq!(second.entries_written, first.entries_written);
    let entries_after_second = StockLedgerEntry::find()
        .count(w.db.as_ref())
        .await
        .expect("count should run");
    assert_eq!(entries_after_second, entries_after_first);

    let mut rebuilds = 0;
    while let Ok(event) = w.events_rx.try_recv() {
        if matches!(event, Event::LedgerRebuilt { .. }) {
            rebuilds += 1;
        }
    }
    assert_eq!(rebuilds, 2);
}

#[tokio::test]
async fn rebuild_repairs_manual_drift() {
    let w = world().await;
    record_document_mix(&w).await;

    // Drift with no backing document, as an operator poking at the table
    // would leave behind.
    stock_ledger_entry::ActiveModel {
        item_id: Set(w.flour_id),
        warehouse_id: Set(w.main_id),
        quantity: Set(dec!(999)),
        reference_type: Set(StockReferenceType::Adjustment),
        reference_id: Set(424_242),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(w.db.as_ref())
    .await
    .expect("drift row should insert");

    let (flour_main, _, _) = balances(&w).await;
    assert_eq!(flour_main, dec!(1034));

    w.rebuild
        .rebuild_inventory()
        .await
        .expect("rebuild should run");

    assert_eq!(balances(&w).await, (dec!(35), dec!(10), dec!(10)));
}

#[tokio::test]
async fn rebuild_drops_soft_deleted_documents_and_their_compensations() {
    let w = world().await;

    let receipt = w
        .documents
        .record_purchase_receipt(RecordPurchaseReceiptInput {
            item_id: w.flour_id,
            warehouse_id: w.main_id,
            quantity: dec!(40),
            receipt_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            supplier_name: None,
            remarks: None,
        })
        .await
        .expect("receipt should post");
    w.documents
        .delete_purchase_receipt(receipt.id)
        .await
        .expect("delete should post compensation");

    // Entry plus compensation remain until the ledger is re-derived.
    assert_eq!(
        StockLedgerEntry::find()
            .count(w.db.as_ref())
            .await
            .expect("count should run"),
        2
    );

    let summary = w
        .rebuild
        .rebuild_inventory()
        .await
        .expect("rebuild should run");

    assert_eq!(summary.purchase_receipts, 0);
    assert_eq!(summary.entries_written, 0);
    assert_eq!(
        StockLedgerEntry::find()
            .count(w.db.as_ref())
            .await
            .expect("count should run"),
        0
    );
}
