use crate::{
    db::DbPool,
    entities::{
        production_consumption::{self, Entity as ProductionConsumption},
        production_run::{self, Entity as ProductionRun},
        stock_ledger_entry::{self, Entity as StockLedgerEntry, StockReferenceType},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger::{
        current_stock, ensure_item_exists, ensure_warehouse_exists, post_entry, verify_balance,
        NewLedgerEntry,
    },
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ConsumptionLineInput {
    pub item_id: i64,
    /// BOM-derived quantity for the run's batch count; kept for variance
    /// reporting even when the operator overrides the actual.
    pub standard_qty: Decimal,
    pub actual_qty: Decimal,
    pub operator_closing: Option<Decimal>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEodRunInput {
    pub production_date: NaiveDate,
    pub output_item_id: i64,
    pub output_quantity: Decimal,
    pub warehouse_id: i64,
    pub batch_count: i32,
    pub remarks: Option<String>,
    #[validate]
    pub consumptions: Vec<ConsumptionLineInput>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionRunDetail {
    pub run: production_run::Model,
    pub consumptions: Vec<production_consumption::Model>,
}

fn validate_run_input(input: &CreateEodRunInput) -> Result<(), ServiceError> {
    input.validate()?;
    if input.output_quantity <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Output quantity must be positive".to_string(),
        ));
    }
    if input.batch_count <= 0 {
        return Err(ServiceError::ValidationError(
            "Batch count must be positive".to_string(),
        ));
    }
    for line in &input.consumptions {
        if line.actual_qty < Decimal::ZERO {
            return Err(ServiceError::ValidationError(format!(
                "Actual quantity for item {} must not be negative",
                line.item_id
            )));
        }
    }
    Ok(())
}

/// Variance is bookkeeping only: what the operator's closing count disagrees
/// with after the posted consumption. Never fed back into the ledger.
fn line_variance(opening: Decimal, actual: Decimal, closing: Option<Decimal>) -> Option<Decimal> {
    closing.map(|c| (opening - actual) - c)
}

/// Posts the consumption and output entries for a run and inserts its
/// consumption rows. Runs inside the caller's transaction; used by create
/// and by the delete-and-repost half of update.
async fn post_run_lines<C: ConnectionTrait>(
    txn: &C,
    run: &production_run::Model,
    lines: &[ConsumptionLineInput],
    allow_negative: bool,
) -> Result<Vec<production_consumption::Model>, ServiceError> {
    let mut consumptions = Vec::with_capacity(lines.len());

    for line in lines {
        ensure_item_exists(txn, line.item_id).await?;

        let opening = current_stock(txn, line.item_id, run.warehouse_id).await?;
        if opening < line.actual_qty && !allow_negative {
            return Err(ServiceError::InsufficientStock(format!(
                "item {}: available {}, required {}",
                line.item_id, opening, line.actual_qty
            )));
        }

        let consumption = production_consumption::ActiveModel {
            production_run_id: Set(run.id),
            item_id: Set(line.item_id),
            standard_qty: Set(line.standard_qty),
            actual_qty: Set(line.actual_qty),
            opening_stock: Set(opening),
            operator_closing: Set(line.operator_closing),
            variance: Set(line_variance(
                opening,
                line.actual_qty,
                line.operator_closing,
            )),
            remarks: Set(line.remarks.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(ServiceError::db_error)?;

        // Zero-quantity lines keep their document row but post nothing;
        // the gateway rejects zero deltas.
        if line.actual_qty != Decimal::ZERO {
            post_entry(
                txn,
                NewLedgerEntry {
                    item_id: line.item_id,
                    warehouse_id: run.warehouse_id,
                    quantity: -line.actual_qty,
                    reference_type: StockReferenceType::ProdConsume,
                    reference_id: run.id,
                },
            )
            .await?;
        }

        consumptions.push(consumption);
    }

    post_entry(
        txn,
        NewLedgerEntry {
            item_id: run.output_item_id,
            warehouse_id: run.warehouse_id,
            quantity: run.output_quantity,
            reference_type: StockReferenceType::ProdOutput,
            reference_id: run.id,
        },
    )
    .await?;

    // Re-verify every consumed pair before commit: a concurrent posting
    // between the opening read and our writes must roll this run back
    // rather than leave a negative balance behind.
    for line in lines {
        if line.actual_qty != Decimal::ZERO {
            verify_balance(txn, line.item_id, run.warehouse_id, allow_negative).await?;
        }
    }

    Ok(consumptions)
}

async fn find_run<C: ConnectionTrait>(
    conn: &C,
    run_id: i64,
) -> Result<production_run::Model, ServiceError> {
    ProductionRun::find_by_id(run_id)
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::NotFound(format!("Production run {} not found", run_id)))
}

/// Service for the end-of-day production workflow: post, correct, void and
/// reinstate runs against the stock ledger.
#[derive(Clone)]
pub struct ProductionService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    allow_negative_stock: bool,
}

impl ProductionService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        allow_negative_stock: bool,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            allow_negative_stock,
        }
    }

    /// Posts an end-of-day production run: header, consumption lines with
    /// opening snapshots and variance, one outward entry per nonzero
    /// consumption and one inward entry for the output, all in a single
    /// transaction.
    #[instrument(skip(self, input), err)]
    pub async fn create_eod_run(
        &self,
        input: CreateEodRunInput,
    ) -> Result<ProductionRunDetail, ServiceError> {
        validate_run_input(&input)?;

        let allow_negative = self.allow_negative_stock;
        let detail = self
            .db_pool
            .transaction::<_, ProductionRunDetail, ServiceError>(move |txn| {
                Box::pin(async move {
                    ensure_item_exists(txn, input.output_item_id).await?;
                    ensure_warehouse_exists(txn, input.warehouse_id).await?;

                    let run = production_run::ActiveModel {
                        production_date: Set(input.production_date),
                        output_item_id: Set(input.output_item_id),
                        output_quantity: Set(input.output_quantity),
                        warehouse_id: Set(input.warehouse_id),
                        batch_count: Set(input.batch_count),
                        remarks: Set(input.remarks.clone()),
                        is_deleted: Set(false),
                        deleted_at: Set(None),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::db_error)?;

                    let consumptions =
                        post_run_lines(txn, &run, &input.consumptions, allow_negative).await?;

                    Ok(ProductionRunDetail { run, consumptions })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            run_id = detail.run.id,
            output_item_id = detail.run.output_item_id,
            output_quantity = %detail.run.output_quantity,
            lines = detail.consumptions.len(),
            "Posted production run"
        );

        self.event_sender
            .send_or_log(Event::ProductionRunCompleted {
                run_id: detail.run.id,
                output_item_id: detail.run.output_item_id,
                output_qty: detail.run.output_quantity,
            })
            .await;

        Ok(detail)
    }

    /// Corrects a posted run by delete-and-repost: the run's PROD_* entries
    /// and consumption rows are removed, then the new set is validated and
    /// posted, all in one transaction.
    #[instrument(skip(self, input), err)]
    pub async fn update_eod_run(
        &self,
        run_id: i64,
        input: CreateEodRunInput,
    ) -> Result<ProductionRunDetail, ServiceError> {
        validate_run_input(&input)?;

        let allow_negative = self.allow_negative_stock;
        let detail = self
            .db_pool
            .transaction::<_, ProductionRunDetail, ServiceError>(move |txn| {
                Box::pin(async move {
                    let run = find_run(txn, run_id).await?;
                    if run.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Production run {} is deleted; restore it before editing",
                            run_id
                        )));
                    }

                    ensure_item_exists(txn, input.output_item_id).await?;
                    ensure_warehouse_exists(txn, input.warehouse_id).await?;

                    StockLedgerEntry::delete_many()
                        .filter(stock_ledger_entry::Column::ReferenceId.eq(run_id))
                        .filter(
                            stock_ledger_entry::Column::ReferenceType.is_in([
                                StockReferenceType::ProdConsume,
                                StockReferenceType::ProdOutput,
                            ]),
                        )
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    ProductionConsumption::delete_many()
                        .filter(production_consumption::Column::ProductionRunId.eq(run_id))
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let mut active: production_run::ActiveModel = run.into();
                    active.production_date = Set(input.production_date);
                    active.output_item_id = Set(input.output_item_id);
                    active.output_quantity = Set(input.output_quantity);
                    active.warehouse_id = Set(input.warehouse_id);
                    active.batch_count = Set(input.batch_count);
                    active.remarks = Set(input.remarks.clone());
                    let run = active.update(txn).await.map_err(ServiceError::db_error)?;

                    let consumptions =
                        post_run_lines(txn, &run, &input.consumptions, allow_negative).await?;

                    Ok(ProductionRunDetail { run, consumptions })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(run_id = detail.run.id, "Reposted production run");

        self.event_sender
            .send_or_log(Event::ProductionRunUpdated {
                run_id: detail.run.id,
            })
            .await;

        Ok(detail)
    }

    /// Voids a run without touching its history: equal-and-opposite entries
    /// neutralize every posting, then the header is flagged deleted.
    #[instrument(skip(self), err)]
    pub async fn delete_eod_run(&self, run_id: i64) -> Result<(), ServiceError> {
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let run = find_run(txn, run_id).await?;
                    if run.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Production run {} is already deleted",
                            run_id
                        )));
                    }

                    let consumptions = run
                        .find_related(ProductionConsumption)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    for consumption in &consumptions {
                        if consumption.actual_qty != Decimal::ZERO {
                            post_entry(
                                txn,
                                NewLedgerEntry {
                                    item_id: consumption.item_id,
                                    warehouse_id: run.warehouse_id,
                                    quantity: consumption.actual_qty,
                                    reference_type: StockReferenceType::ProdConsume,
                                    reference_id: run.id,
                                },
                            )
                            .await?;
                        }
                    }

                    post_entry(
                        txn,
                        NewLedgerEntry {
                            item_id: run.output_item_id,
                            warehouse_id: run.warehouse_id,
                            quantity: -run.output_quantity,
                            reference_type: StockReferenceType::ProdOutput,
                            reference_id: run.id,
                        },
                    )
                    .await?;

                    let mut active: production_run::ActiveModel = run.into();
                    active.is_deleted = Set(true);
                    active.deleted_at = Set(Some(Utc::now()));
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(run_id, "Soft-deleted production run");

        self.event_sender
            .send_or_log(Event::ProductionRunDeleted { run_id })
            .await;

        Ok(())
    }

    /// Reinstates a soft-deleted run by re-posting its original entries.
    /// Delete-then-restore returns every balance to its prior value.
    #[instrument(skip(self), err)]
    pub async fn restore_eod_run(&self, run_id: i64) -> Result<(), ServiceError> {
        let allow_negative = self.allow_negative_stock;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let run = find_run(txn, run_id).await?;
                    if !run.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Production run {} is not deleted",
                            run_id
                        )));
                    }

                    let consumptions = run
                        .find_related(ProductionConsumption)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    for consumption in &consumptions {
                        if consumption.actual_qty != Decimal::ZERO {
                            post_entry(
                                txn,
                                NewLedgerEntry {
                                    item_id: consumption.item_id,
                                    warehouse_id: run.warehouse_id,
                                    quantity: -consumption.actual_qty,
                                    reference_type: StockReferenceType::ProdConsume,
                                    reference_id: run.id,
                                },
                            )
                            .await?;
                        }
                    }

                    post_entry(
                        txn,
                        NewLedgerEntry {
                            item_id: run.output_item_id,
                            warehouse_id: run.warehouse_id,
                            quantity: run.output_quantity,
                            reference_type: StockReferenceType::ProdOutput,
                            reference_id: run.id,
                        },
                    )
                    .await?;

                    for consumption in &consumptions {
                        if consumption.actual_qty != Decimal::ZERO {
                            verify_balance(
                                txn,
                                consumption.item_id,
                                run.warehouse_id,
                                allow_negative,
                            )
                            .await?;
                        }
                    }

                    let mut active: production_run::ActiveModel = run.into();
                    active.is_deleted = Set(false);
                    active.deleted_at = Set(None);
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(run_id, "Restored production run");

        self.event_sender
            .send_or_log(Event::ProductionRunRestored { run_id })
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn variance_needs_operator_closing() {
        assert_eq!(line_variance(dec!(100), dec!(30), None), None);
    }

    #[test]
    fn variance_is_expected_closing_minus_reported() {
        // Opening 100, consumed 30, operator counted 68: two units missing.
        assert_eq!(
            line_variance(dec!(100), dec!(30), Some(dec!(68))),
            Some(dec!(2))
        );
    }

    #[test]
    fn variance_can_be_negative_when_operator_counts_more() {
        assert_eq!(
            line_variance(dec!(50), dec!(10), Some(dec!(41))),
            Some(dec!(-1))
        );
    }

    #[test]
    fn run_input_rejects_zero_output() {
        let input = CreateEodRunInput {
            production_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            output_item_id: 1,
            output_quantity: Decimal::ZERO,
            warehouse_id: 1,
            batch_count: 1,
            remarks: None,
            consumptions: vec![],
        };
        assert!(matches!(
            validate_run_input(&input),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn run_input_rejects_negative_actual() {
        let input = CreateEodRunInput {
            production_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            output_item_id: 1,
            output_quantity: dec!(10),
            warehouse_id: 1,
            batch_count: 2,
            remarks: None,
            consumptions: vec![ConsumptionLineInput {
                item_id: 7,
                standard_qty: dec!(4),
                actual_qty: dec!(-1),
                operator_closing: None,
                remarks: None,
            }],
        };
        assert!(matches!(
            validate_run_input(&input),
            Err(ServiceError::ValidationError(_))
        ));
    }
}
