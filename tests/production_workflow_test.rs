mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use stockmill_api::{
    entities::{
        production_consumption::{self, Entity as ProductionConsumption},
        production_run::Entity as ProductionRun,
        stock_ledger_entry::{self, Entity as StockLedgerEntry, StockReferenceType},
    },
    errors::ServiceError,
    events::Event,
    services::{
        production::{ConsumptionLineInput, CreateEodRunInput, ProductionService},
        stock_ledger::{AdjustStockInput, StockLedgerService},
    },
};

struct Fixture {
    db: std::sync::Arc<stockmill_api::db::DbPool>,
    production: ProductionService,
    ledger: StockLedgerService,
    events_rx: tokio::sync::mpsc::Receiver<Event>,
    flour_id: i64,
    sugar_id: i64,
    cake_id: i64,
    warehouse_id: i64,
}

/// Seeds flour 100 and sugar 50 at one warehouse via opening adjustments.
async fn fixture() -> Fixture {
    let db = common::setup_test_db().await;
    let (events, events_rx) = common::test_event_sender();

    let flour = common::seed_item(&db, "FLOUR-01", "Wheat Flour").await;
    let sugar = common::seed_item(&db, "SUGAR-01", "Sugar").await;
    let cake = common::seed_item(&db, "CAKE-01", "Tea Cake").await;
    let warehouse = common::seed_warehouse(&db, "WH-MAIN", "Main Warehouse").await;

    let ledger = StockLedgerService::new(db.clone(), events.clone(), false);
    for (item_id, qty) in [(flour.id, dec!(100)), (sugar.id, dec!(50))] {
        ledger
            .adjust_stock(AdjustStockInput {
                item_id,
                warehouse_id: warehouse.id,
                quantity: qty,
                reason: "Opening stock".to_string(),
                remarks: None,
            })
            .await
            .expect("opening stock should post");
    }

    let production = ProductionService::new(db.clone(), events, false);

    Fixture {
        db,
        production,
        ledger,
        events_rx,
        flour_id: flour.id,
        sugar_id: sugar.id,
        cake_id: cake.id,
        warehouse_id: warehouse.id,
    }
}

fn run_input(fx: &Fixture, consumptions: Vec<ConsumptionLineInput>) -> CreateEodRunInput {
    CreateEodRunInput {
        production_date: NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"),
        output_item_id: fx.cake_id,
        output_quantity: dec!(10),
        warehouse_id: fx.warehouse_id,
        batch_count: 2,
        remarks: None,
        consumptions,
    }
}

fn line(item_id: i64, standard: Decimal, actual: Decimal) -> ConsumptionLineInput {
    ConsumptionLineInput {
        item_id,
        standard_qty: standard,
        actual_qty: actual,
        operator_closing: None,
        remarks: None,
    }
}

async fn balance(fx: &Fixture, item_id: i64) -> Decimal {
    fx.ledger
        .current_stock(item_id, fx.warehouse_id)
        .await
        .expect("balance should read")
}

#[tokio::test]
async fn eod_run_posts_consumptions_and_output() {
    let mut fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(
            &fx,
            vec![
                ConsumptionLineInput {
                    item_id: fx.flour_id,
                    standard_qty: dec!(32),
                    actual_qty: dec!(30),
                    operator_closing: Some(dec!(68)),
                    remarks: None,
                },
                line(fx.sugar_id, dec!(5), dec!(5)),
            ],
        ))
        .await
        .expect("run should post");

    assert_eq!(balance(&fx, fx.flour_id).await, dec!(70));
    assert_eq!(balance(&fx, fx.sugar_id).await, dec!(45));
    assert_eq!(balance(&fx, fx.cake_id).await, dec!(10));

    // Opening snapshots were taken before the consumption posted.
    let flour_line = detail
        .consumptions
        .iter()
        .find(|c| c.item_id == fx.flour_id)
        .expect("flour line expected");
    assert_eq!(flour_line.opening_stock, dec!(100));
    // Expected closing 70, operator counted 68: two units unaccounted for.
    assert_eq!(flour_line.variance, Some(dec!(2)));

    let sugar_line = detail
        .consumptions
        .iter()
        .find(|c| c.item_id == fx.sugar_id)
        .expect("sugar line expected");
    assert_eq!(sugar_line.opening_stock, dec!(50));
    assert_eq!(sugar_line.variance, None);

    // Two opening adjustments plus two consumptions plus one output.
    let entries = StockLedgerEntry::find()
        .all(fx.db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(entries.len(), 5);

    // Skip the two opening-stock events, then the run completion.
    let mut completion = None;
    while let Ok(event) = fx.events_rx.try_recv() {
        if let Event::ProductionRunCompleted { run_id, .. } = event {
            completion = Some(run_id);
        }
    }
    assert_eq!(completion, Some(detail.run.id));
}

#[tokio::test]
async fn insufficient_component_rolls_back_the_whole_run() {
    let fx = fixture().await;

    let result = fx
        .production
        .create_eod_run(run_input(
            &fx,
            vec![
                line(fx.flour_id, dec!(30), dec!(30)),
                // Sugar only has 50 on hand.
                line(fx.sugar_id, dec!(60), dec!(60)),
            ],
        ))
        .await;
    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    // Nothing from the failed run survives, including the flour leg that
    // validated fine before sugar failed.
    assert_eq!(balance(&fx, fx.flour_id).await, dec!(100));
    assert_eq!(balance(&fx, fx.sugar_id).await, dec!(50));
    assert_eq!(balance(&fx, fx.cake_id).await, Decimal::ZERO);

    let runs = ProductionRun::find()
        .all(fx.db.as_ref())
        .await
        .expect("runs should load");
    assert!(runs.is_empty());

    let consumptions = ProductionConsumption::find()
        .all(fx.db.as_ref())
        .await
        .expect("consumptions should load");
    assert!(consumptions.is_empty());
}

#[tokio::test]
async fn zero_actual_line_keeps_its_row_but_posts_nothing() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(
            &fx,
            vec![
                line(fx.flour_id, dec!(30), dec!(30)),
                line(fx.sugar_id, dec!(5), Decimal::ZERO),
            ],
        ))
        .await
        .expect("run should post");

    assert_eq!(detail.consumptions.len(), 2);
    assert_eq!(balance(&fx, fx.sugar_id).await, dec!(50));

    let sugar_entries = StockLedgerEntry::find()
        .filter(stock_ledger_entry::Column::ItemId.eq(fx.sugar_id))
        .filter(stock_ledger_entry::Column::ReferenceType.eq(StockReferenceType::ProdConsume))
        .all(fx.db.as_ref())
        .await
        .expect("entries should load");
    assert!(sugar_entries.is_empty());
}

#[tokio::test]
async fn update_reposts_the_run_from_scratch() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(&fx, vec![line(fx.flour_id, dec!(30), dec!(30))]))
        .await
        .expect("run should post");

    let mut corrected = run_input(&fx, vec![line(fx.flour_id, dec!(20), dec!(20))]);
    corrected.output_quantity = dec!(12);

    let updated = fx
        .production
        .update_eod_run(detail.run.id, corrected)
        .await
        .expect("update should repost");
    assert_eq!(updated.run.id, detail.run.id);

    assert_eq!(balance(&fx, fx.flour_id).await, dec!(80));
    assert_eq!(balance(&fx, fx.cake_id).await, dec!(12));

    // Delete-and-repost, not compensation: exactly one consumption and one
    // output entry remain under the run's reference.
    let run_entries = StockLedgerEntry::find()
        .filter(stock_ledger_entry::Column::ReferenceId.eq(detail.run.id))
        .filter(
            stock_ledger_entry::Column::ReferenceType.is_in([
                StockReferenceType::ProdConsume,
                StockReferenceType::ProdOutput,
            ]),
        )
        .all(fx.db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(run_entries.len(), 2);

    // The update re-snapshots opening stock at repost time.
    let lines = ProductionConsumption::find()
        .filter(production_consumption::Column::ProductionRunId.eq(detail.run.id))
        .all(fx.db.as_ref())
        .await
        .expect("consumptions should load");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].opening_stock, dec!(100));
    assert_eq!(lines[0].actual_qty, dec!(20));
}

#[tokio::test]
async fn delete_voids_balances_and_restore_reinstates_them() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(&fx, vec![line(fx.flour_id, dec!(30), dec!(30))]))
        .await
        .expect("run should post");

    fx.production
        .delete_eod_run(detail.run.id)
        .await
        .expect("delete should void the run");

    assert_eq!(balance(&fx, fx.flour_id).await, dec!(100));
    assert_eq!(balance(&fx, fx.cake_id).await, Decimal::ZERO);

    let run = ProductionRun::find_by_id(detail.run.id)
        .one(fx.db.as_ref())
        .await
        .expect("run should load")
        .expect("run should exist");
    assert!(run.is_deleted);
    assert!(run.deleted_at.is_some());

    // Original postings plus their compensations stay in the history.
    let run_entries = StockLedgerEntry::find()
        .filter(stock_ledger_entry::Column::ReferenceId.eq(detail.run.id))
        .filter(
            stock_ledger_entry::Column::ReferenceType.is_in([
                StockReferenceType::ProdConsume,
                StockReferenceType::ProdOutput,
            ]),
        )
        .all(fx.db.as_ref())
        .await
        .expect("entries should load");
    assert_eq!(run_entries.len(), 4);

    fx.production
        .restore_eod_run(detail.run.id)
        .await
        .expect("restore should repost");

    assert_eq!(balance(&fx, fx.flour_id).await, dec!(70));
    assert_eq!(balance(&fx, fx.cake_id).await, dec!(10));

    let run = ProductionRun::find_by_id(detail.run.id)
        .one(fx.db.as_ref())
        .await
        .expect("run should load")
        .expect("run should exist");
    assert!(!run.is_deleted);
    assert!(run.deleted_at.is_none());
}

#[tokio::test]
async fn delete_twice_is_refused() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(&fx, vec![line(fx.flour_id, dec!(30), dec!(30))]))
        .await
        .expect("run should post");

    fx.production
        .delete_eod_run(detail.run.id)
        .await
        .expect("first delete should work");

    let result = fx.production.delete_eod_run(detail.run.id).await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn updating_a_deleted_run_is_refused() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(&fx, vec![line(fx.flour_id, dec!(30), dec!(30))]))
        .await
        .expect("run should post");

    fx.production
        .delete_eod_run(detail.run.id)
        .await
        .expect("delete should work");

    let result = fx
        .production
        .update_eod_run(
            detail.run.id,
            run_input(&fx, vec![line(fx.flour_id, dec!(10), dec!(10))]),
        )
        .await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn restore_refuses_when_components_were_consumed_elsewhere() {
    let fx = fixture().await;

    let detail = fx
        .production
        .create_eod_run(run_input(&fx, vec![line(fx.flour_id, dec!(90), dec!(90))]))
        .await
        .expect("run should post");

    fx.production
        .delete_eod_run(detail.run.id)
        .await
        .expect("delete should void the run");

    // Consume most of the flour while the run is deleted.
    fx.ledger
        .adjust_stock(AdjustStockInput {
            item_id: fx.flour_id,
            warehouse_id: fx.warehouse_id,
            quantity: dec!(-50),
            reason: "Sold loose".to_string(),
            remarks: None,
        })
        .await
        .expect("adjustment should post");

    let result = fx.production.restore_eod_run(detail.run.id).await;
    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    // The failed restore left nothing behind.
    assert_eq!(balance(&fx, fx.flour_id).await, dec!(50));
    let run = ProductionRun::find_by_id(detail.run.id)
        .one(fx.db.as_ref())
        .await
        .expect("run should load")
        .expect("run should exist");
    assert!(run.is_deleted);
}
