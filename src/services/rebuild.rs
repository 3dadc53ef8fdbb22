use crate::{
    db::DbPool,
    entities::{
        production_consumption::{self, Entity as ProductionConsumption},
        production_run::{self, Entity as ProductionRun},
        purchase_receipt::{self, Entity as PurchaseReceipt},
        sales_shipment::{self, Entity as SalesShipment},
        stock_adjustment::{self, Entity as StockAdjustment},
        stock_ledger_entry::{Entity as StockLedgerEntry, StockReferenceType},
        stock_transfer::{self, Entity as StockTransfer},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger::{post_entry, NewLedgerEntry},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, TransactionError,
    TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RebuildSummary {
    pub entries_written: u64,
    pub purchase_receipts: u64,
    pub sales_shipments: u64,
    pub stock_transfers: u64,
    pub production_runs: u64,
    pub stock_adjustments: u64,
    pub completed_at: DateTime<Utc>,
}

/// Wipes and re-derives the whole ledger from active source documents in a
/// single transaction. Soft-deleted documents are excluded, so a rebuild
/// also purges the entry-plus-compensation pairs they left behind. Running
/// it twice with no intervening change yields identical balances.
#[derive(Clone)]
pub struct RebuildService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl RebuildService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self), err)]
    pub async fn rebuild_inventory(&self) -> Result<RebuildSummary, ServiceError> {
        let summary = self
            .db_pool
            .transaction::<_, RebuildSummary, ServiceError>(move |txn| {
                Box::pin(async move {
                    StockLedgerEntry::delete_many()
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let mut entries_written: u64 = 0;

                    let receipts = PurchaseReceipt::find()
                        .filter(purchase_receipt::Column::IsDeleted.eq(false))
                        .order_by_asc(purchase_receipt::Column::Id)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                    for receipt in &receipts {
                        post_entry(
                            txn,
                            NewLedgerEntry {
                                item_id: receipt.item_id,
                                warehouse_id: receipt.warehouse_id,
                                quantity: receipt.quantity,
                                reference_type: StockReferenceType::Purchase,
                                reference_id: receipt.id,
                            },
                        )
                        .await?;
                        entries_written += 1;
                    }

                    let shipments = SalesShipment::find()
                        .filter(sales_shipment::Column::IsDeleted.eq(false))
                        .order_by_asc(sales_shipment::Column::Id)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                    for shipment in &shipments {
                        post_entry(
                            txn,
                            NewLedgerEntry {
                                item_id: shipment.item_id,
                                warehouse_id: shipment.warehouse_id,
                                quantity: -shipment.quantity,
                                reference_type: StockReferenceType::Sale,
                                reference_id: shipment.id,
                            },
                        )
                        .await?;
                        entries_written += 1;
                    }

                    let transfers = StockTransfer::find()
                        .filter(stock_transfer::Column::IsDeleted.eq(false))
                        .order_by_asc(stock_transfer::Column::Id)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                    for transfer in &transfers {
                        post_entry(
                            txn,
                            NewLedgerEntry {
                                item_id: transfer.item_id,
                                warehouse_id: transfer.from_warehouse_id,
                                quantity: -transfer.quantity,
                                reference_type: StockReferenceType::TransferOut,
                                reference_id: transfer.id,
                            },
                        )
                        .await?;
                        post_entry(
                            txn,
                            NewLedgerEntry {
                                item_id: transfer.item_id,
                                warehouse_id: transfer.to_warehouse_id,
                                quantity: transfer.quantity,
                                reference_type: StockReferenceType::TransferIn,
                                reference_id: transfer.id,
                            },
                        )
                        .await?;
                        entries_written += 2;
                    }

                    let runs = ProductionRun::find()
                        .filter(production_run::Column::IsDeleted.eq(false))
                        .order_by_asc(production_run::Column::Id)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                    for run in &runs {
                        let consumptions = ProductionConsumption::find()
                            .filter(production_consumption::Column::ProductionRunId.eq(run.id))
                            .order_by_asc(production_consumption::Column::Id)
                            .all(txn)
                            .await
                            .map_err(ServiceError::db_error)?;

                        for consumption in &consumptions {
                            // Zero-quantity lines never posted anything.
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
                                entries_written += 1;
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
                        entries_written += 1;
                    }

                    let adjustments = StockAdjustment::find()
                        .filter(stock_adjustment::Column::IsDeleted.eq(false))
                        .order_by_asc(stock_adjustment::Column::Id)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;
                    for adjustment in &adjustments {
                        post_entry(
                            txn,
                            NewLedgerEntry {
                                item_id: adjustment.item_id,
                                warehouse_id: adjustment.warehouse_id,
                                quantity: adjustment.quantity,
                                reference_type: StockReferenceType::Adjustment,
                                reference_id: adjustment.id,
                            },
                        )
                        .await?;
                        entries_written += 1;
                    }

                    Ok(RebuildSummary {
                        entries_written,
                        purchase_receipts: receipts.len() as u64,
                        sales_shipments: shipments.len() as u64,
                        stock_transfers: transfers.len() as u64,
                        production_runs: runs.len() as u64,
                        stock_adjustments: adjustments.len() as u64,
                        completed_at: Utc::now(),
                    })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            entries_written = summary.entries_written,
            production_runs = summary.production_runs,
            "Rebuilt stock ledger from source documents"
        );

        self.event_sender
            .send_or_log(Event::LedgerRebuilt {
                entries_written: summary.entries_written,
                completed_at: summary.completed_at,
            })
            .await;

        Ok(summary)
    }
}
