use crate::{
    db::DbPool,
    entities::{
        item::{self, Entity as Item},
        stock_adjustment::{self, Entity as StockAdjustment},
        stock_ledger_entry::{self, Entity as StockLedgerEntry, StockReferenceType},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionError, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Unsaved ledger entry handed to the posting gateway. `quantity` is the
/// signed delta; inward positive, outward negative.
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub item_id: i64,
    pub warehouse_id: i64,
    pub quantity: Decimal,
    pub reference_type: StockReferenceType,
    pub reference_id: i64,
}

/// Current balance for an (item, warehouse) pair: the sum of all signed
/// ledger quantities, computed in Rust with `Decimal`. Zero when the pair
/// has no entries. Generic so callers can read inside an open transaction.
pub async fn current_stock<C: ConnectionTrait>(
    conn: &C,
    item_id: i64,
    warehouse_id: i64,
) -> Result<Decimal, ServiceError> {
    let entries = StockLedgerEntry::find()
        .filter(stock_ledger_entry::Column::ItemId.eq(item_id))
        .filter(stock_ledger_entry::Column::WarehouseId.eq(warehouse_id))
        .all(conn)
        .await
        .map_err(ServiceError::db_error)?;

    Ok(entries
        .iter()
        .fold(Decimal::ZERO, |acc, entry| acc + entry.quantity))
}

/// Sole writer of ledger rows. Every stock movement in the system funnels
/// through here; zero-quantity postings are rejected so the ledger never
/// carries no-op rows.
pub async fn post_entry<C: ConnectionTrait>(
    conn: &C,
    entry: NewLedgerEntry,
) -> Result<stock_ledger_entry::Model, ServiceError> {
    if entry.quantity == Decimal::ZERO {
        return Err(ServiceError::ValidationError(format!(
            "Refusing to post zero-quantity entry for item {} ({})",
            entry.item_id,
            entry.reference_type.as_str()
        )));
    }

    let model = stock_ledger_entry::ActiveModel {
        item_id: Set(entry.item_id),
        warehouse_id: Set(entry.warehouse_id),
        quantity: Set(entry.quantity),
        reference_type: Set(entry.reference_type),
        reference_id: Set(entry.reference_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(conn).await.map_err(ServiceError::db_error)
}

/// Fails with `InsufficientStock` when the pair's balance went negative and
/// negative stock is not allowed. Called after outward postings, inside the
/// same transaction, so a race between check and post rolls back instead of
/// committing a phantom balance.
pub async fn verify_balance<C: ConnectionTrait>(
    conn: &C,
    item_id: i64,
    warehouse_id: i64,
    allow_negative: bool,
) -> Result<Decimal, ServiceError> {
    let balance = current_stock(conn, item_id, warehouse_id).await?;
    if balance < Decimal::ZERO && !allow_negative {
        return Err(ServiceError::InsufficientStock(format!(
            "item {} at warehouse {} would go to {}",
            item_id, warehouse_id, balance
        )));
    }
    Ok(balance)
}

pub async fn ensure_item_exists<C: ConnectionTrait>(
    conn: &C,
    item_id: i64,
) -> Result<item::Model, ServiceError> {
    Item::find_by_id(item_id)
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_id)))
}

pub async fn ensure_warehouse_exists<C: ConnectionTrait>(
    conn: &C,
    warehouse_id: i64,
) -> Result<warehouse::Model, ServiceError> {
    Warehouse::find_by_id(warehouse_id)
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id)))
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdjustStockInput {
    pub item_id: i64,
    pub warehouse_id: i64,
    /// Signed correction; positive adds stock, negative removes it.
    pub quantity: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    pub remarks: Option<String>,
}

/// Service for balance reads and manual stock corrections.
#[derive(Clone)]
pub struct StockLedgerService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    allow_negative_stock: bool,
}

impl StockLedgerService {
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

    #[instrument(skip(self), err)]
    pub async fn current_stock(
        &self,
        item_id: i64,
        warehouse_id: i64,
    ) -> Result<Decimal, ServiceError> {
        current_stock(self.db_pool.as_ref(), item_id, warehouse_id).await
    }

    /// Records a manual correction: one `stock_adjustment` document plus one
    /// ADJUSTMENT ledger entry carrying the same signed delta, atomically.
    #[instrument(skip(self, input), err)]
    pub async fn adjust_stock(
        &self,
        input: AdjustStockInput,
    ) -> Result<stock_adjustment::Model, ServiceError> {
        input.validate()?;
        if input.quantity == Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Adjustment quantity must be nonzero".to_string(),
            ));
        }

        let allow_negative = self.allow_negative_stock;
        let adjustment = self
            .db_pool
            .transaction::<_, stock_adjustment::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    ensure_item_exists(txn, input.item_id).await?;
                    ensure_warehouse_exists(txn, input.warehouse_id).await?;

                    let adjustment = stock_adjustment::ActiveModel {
                        item_id: Set(input.item_id),
                        warehouse_id: Set(input.warehouse_id),
                        quantity: Set(input.quantity),
                        reason: Set(input.reason.clone()),
                        remarks: Set(input.remarks.clone()),
                        is_deleted: Set(false),
                        deleted_at: Set(None),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::db_error)?;

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

                    verify_balance(
                        txn,
                        adjustment.item_id,
                        adjustment.warehouse_id,
                        allow_negative,
                    )
                    .await?;

                    Ok(adjustment)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            adjustment_id = adjustment.id,
            item_id = adjustment.item_id,
            warehouse_id = adjustment.warehouse_id,
            quantity = %adjustment.quantity,
            "Recorded stock adjustment"
        );

        self.event_sender
            .send_or_log(Event::StockAdjustmentRecorded {
                adjustment_id: adjustment.id,
                item_id: adjustment.item_id,
                quantity_delta: adjustment.quantity,
            })
            .await;

        Ok(adjustment)
    }
}
