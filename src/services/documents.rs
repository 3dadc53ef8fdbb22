use crate::{
    db::DbPool,
    entities::{
        purchase_receipt::{self, Entity as PurchaseReceipt},
        sales_shipment::{self, Entity as SalesShipment},
        stock_ledger_entry::StockReferenceType,
        stock_transfer::{self, Entity as StockTransfer},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger::{
        ensure_item_exists, ensure_warehouse_exists, post_entry, verify_balance, NewLedgerEntry,
    },
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, EntityTrait, Set, TransactionError, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordPurchaseReceiptInput {
    pub item_id: i64,
    pub warehouse_id: i64,
    pub quantity: Decimal,
    pub receipt_date: NaiveDate,
    pub supplier_name: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordSalesShipmentInput {
    pub item_id: i64,
    pub warehouse_id: i64,
    pub quantity: Decimal,
    pub shipment_date: NaiveDate,
    pub customer_name: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordTransferInput {
    pub item_id: i64,
    pub from_warehouse_id: i64,
    pub to_warehouse_id: i64,
    pub quantity: Decimal,
    pub transfer_date: NaiveDate,
    pub remarks: Option<String>,
}

fn require_positive(quantity: Decimal, what: &str) -> Result<(), ServiceError> {
    if quantity <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(format!(
            "{} quantity must be positive",
            what
        )));
    }
    Ok(())
}

fn map_txn_err(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}

/// Service for the source documents that feed the ledger besides
/// production: purchase receipts, sales shipments and transfers. Each
/// record operation inserts the document and posts its ledger effect in one
/// transaction; soft delete and restore post compensating entries under the
/// same reference.
#[derive(Clone)]
pub struct DocumentService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    allow_negative_stock: bool,
}

impl DocumentService {
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

    #[instrument(skip(self, input), err)]
    pub async fn record_purchase_receipt(
        &self,
        input: RecordPurchaseReceiptInput,
    ) -> Result<purchase_receipt::Model, ServiceError> {
        input.validate()?;
        require_positive(input.quantity, "Receipt")?;

        let receipt = self
            .db_pool
            .transaction::<_, purchase_receipt::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    ensure_item_exists(txn, input.item_id).await?;
                    ensure_warehouse_exists(txn, input.warehouse_id).await?;

                    let receipt = purchase_receipt::ActiveModel {
                        item_id: Set(input.item_id),
                        warehouse_id: Set(input.warehouse_id),
                        quantity: Set(input.quantity),
                        receipt_date: Set(input.receipt_date),
                        supplier_name: Set(input.supplier_name.clone()),
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
                            item_id: receipt.item_id,
                            warehouse_id: receipt.warehouse_id,
                            quantity: receipt.quantity,
                            reference_type: StockReferenceType::Purchase,
                            reference_id: receipt.id,
                        },
                    )
                    .await?;

                    Ok(receipt)
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(
            receipt_id = receipt.id,
            item_id = receipt.item_id,
            quantity = %receipt.quantity,
            "Recorded purchase receipt"
        );

        self.event_sender
            .send_or_log(Event::PurchaseReceiptRecorded {
                receipt_id: receipt.id,
                item_id: receipt.item_id,
                quantity: receipt.quantity,
            })
            .await;

        Ok(receipt)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_purchase_receipt(&self, receipt_id: i64) -> Result<(), ServiceError> {
        let allow_negative = self.allow_negative_stock;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let receipt = PurchaseReceipt::find_by_id(receipt_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Purchase receipt {} not found",
                                receipt_id
                            ))
                        })?;
                    if receipt.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Purchase receipt {} is already deleted",
                            receipt_id
                        )));
                    }

                    post_entry(
                        txn,
                        NewLedgerEntry {
                            item_id: receipt.item_id,
                            warehouse_id: receipt.warehouse_id,
                            quantity: -receipt.quantity,
                            reference_type: StockReferenceType::Purchase,
                            reference_id: receipt.id,
                        },
                    )
                    .await?;

                    // Removing inward stock can strand balances below zero.
                    verify_balance(txn, receipt.item_id, receipt.warehouse_id, allow_negative)
                        .await?;

                    let mut active: purchase_receipt::ActiveModel = receipt.into();
                    active.is_deleted = Set(true);
                    active.deleted_at = Set(Some(Utc::now()));
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(receipt_id, "Soft-deleted purchase receipt");

        self.event_sender
            .send_or_log(Event::DocumentDeleted {
                reference_type: StockReferenceType::Purchase.as_str().to_string(),
                reference_id: receipt_id,
            })
            .await;

        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn restore_purchase_receipt(&self, receipt_id: i64) -> Result<(), ServiceError> {
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let receipt = PurchaseReceipt::find_by_id(receipt_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Purchase receipt {} not found",
                                receipt_id
                            ))
                        })?;
                    if !receipt.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Purchase receipt {} is not deleted",
                            receipt_id
                        )));
                    }

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

                    let mut active: purchase_receipt::ActiveModel = receipt.into();
                    active.is_deleted = Set(false);
                    active.deleted_at = Set(None);
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(receipt_id, "Restored purchase receipt");

        self.event_sender
            .send_or_log(Event::DocumentRestored {
                reference_type: StockReferenceType::Purchase.as_str().to_string(),
                reference_id: receipt_id,
            })
            .await;

        Ok(())
    }

    #[instrument(skip(self, input), err)]
    pub async fn record_sales_shipment(
        &self,
        input: RecordSalesShipmentInput,
    ) -> Result<sales_shipment::Model, ServiceError> {
        input.validate()?;
        require_positive(input.quantity, "Shipment")?;

        let allow_negative = self.allow_negative_stock;
        let shipment = self
            .db_pool
            .transaction::<_, sales_shipment::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    ensure_item_exists(txn, input.item_id).await?;
                    ensure_warehouse_exists(txn, input.warehouse_id).await?;

                    let shipment = sales_shipment::ActiveModel {
                        item_id: Set(input.item_id),
                        warehouse_id: Set(input.warehouse_id),
                        quantity: Set(input.quantity),
                        shipment_date: Set(input.shipment_date),
                        customer_name: Set(input.customer_name.clone()),
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
                            item_id: shipment.item_id,
                            warehouse_id: shipment.warehouse_id,
                            quantity: -shipment.quantity,
                            reference_type: StockReferenceType::Sale,
                            reference_id: shipment.id,
                        },
                    )
                    .await?;

                    verify_balance(txn, shipment.item_id, shipment.warehouse_id, allow_negative)
                        .await?;

                    Ok(shipment)
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(
            shipment_id = shipment.id,
            item_id = shipment.item_id,
            quantity = %shipment.quantity,
            "Recorded sales shipment"
        );

        self.event_sender
            .send_or_log(Event::SalesShipmentRecorded {
                shipment_id: shipment.id,
                item_id: shipment.item_id,
                quantity: shipment.quantity,
            })
            .await;

        Ok(shipment)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_sales_shipment(&self, shipment_id: i64) -> Result<(), ServiceError> {
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let shipment = SalesShipment::find_by_id(shipment_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Sales shipment {} not found",
                                shipment_id
                            ))
                        })?;
                    if shipment.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Sales shipment {} is already deleted",
                            shipment_id
                        )));
                    }

                    post_entry(
                        txn,
                        NewLedgerEntry {
                            item_id: shipment.item_id,
                            warehouse_id: shipment.warehouse_id,
                            quantity: shipment.quantity,
                            reference_type: StockReferenceType::Sale,
                            reference_id: shipment.id,
                        },
                    )
                    .await?;

                    let mut active: sales_shipment::ActiveModel = shipment.into();
                    active.is_deleted = Set(true);
                    active.deleted_at = Set(Some(Utc::now()));
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(shipment_id, "Soft-deleted sales shipment");

        self.event_sender
            .send_or_log(Event::DocumentDeleted {
                reference_type: StockReferenceType::Sale.as_str().to_string(),
                reference_id: shipment_id,
            })
            .await;

        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn restore_sales_shipment(&self, shipment_id: i64) -> Result<(), ServiceError> {
        let allow_negative = self.allow_negative_stock;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let shipment = SalesShipment::find_by_id(shipment_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Sales shipment {} not found",
                                shipment_id
                            ))
                        })?;
                    if !shipment.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Sales shipment {} is not deleted",
                            shipment_id
                        )));
                    }

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

                    verify_balance(txn, shipment.item_id, shipment.warehouse_id, allow_negative)
                        .await?;

                    let mut active: sales_shipment::ActiveModel = shipment.into();
                    active.is_deleted = Set(false);
                    active.deleted_at = Set(None);
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(shipment_id, "Restored sales shipment");

        self.event_sender
            .send_or_log(Event::DocumentRestored {
                reference_type: StockReferenceType::Sale.as_str().to_string(),
                reference_id: shipment_id,
            })
            .await;

        Ok(())
    }

    /// Records a warehouse-to-warehouse movement: one TRANSFER_OUT at the
    /// source and one TRANSFER_IN at the destination, atomically, so the
    /// pair always nets to zero across warehouses.
    #[instrument(skip(self, input), err)]
    pub async fn record_transfer(
        &self,
        input: RecordTransferInput,
    ) -> Result<stock_transfer::Model, ServiceError> {
        input.validate()?;
        require_positive(input.quantity, "Transfer")?;
        if input.from_warehouse_id == input.to_warehouse_id {
            return Err(ServiceError::ValidationError(
                "Transfer source and destination must differ".to_string(),
            ));
        }

        let allow_negative = self.allow_negative_stock;
        let transfer = self
            .db_pool
            .transaction::<_, stock_transfer::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    ensure_item_exists(txn, input.item_id).await?;
                    ensure_warehouse_exists(txn, input.from_warehouse_id).await?;
                    ensure_warehouse_exists(txn, input.to_warehouse_id).await?;

                    let transfer = stock_transfer::ActiveModel {
                        item_id: Set(input.item_id),
                        from_warehouse_id: Set(input.from_warehouse_id),
                        to_warehouse_id: Set(input.to_warehouse_id),
                        quantity: Set(input.quantity),
                        transfer_date: Set(input.transfer_date),
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

                    verify_balance(
                        txn,
                        transfer.item_id,
                        transfer.from_warehouse_id,
                        allow_negative,
                    )
                    .await?;

                    Ok(transfer)
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(
            transfer_id = transfer.id,
            item_id = transfer.item_id,
            from_warehouse_id = transfer.from_warehouse_id,
            to_warehouse_id = transfer.to_warehouse_id,
            quantity = %transfer.quantity,
            "Recorded stock transfer"
        );

        self.event_sender
            .send_or_log(Event::StockTransferRecorded {
                transfer_id: transfer.id,
                item_id: transfer.item_id,
                quantity: transfer.quantity,
            })
            .await;

        Ok(transfer)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_transfer(&self, transfer_id: i64) -> Result<(), ServiceError> {
        let allow_negative = self.allow_negative_stock;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let transfer = StockTransfer::find_by_id(transfer_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Stock transfer {} not found",
                                transfer_id
                            ))
                        })?;
                    if transfer.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Stock transfer {} is already deleted",
                            transfer_id
                        )));
                    }

                    post_entry(
                        txn,
                        NewLedgerEntry {
                            item_id: transfer.item_id,
                            warehouse_id: transfer.from_warehouse_id,
                            quantity: transfer.quantity,
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
                            quantity: -transfer.quantity,
                            reference_type: StockReferenceType::TransferIn,
                            reference_id: transfer.id,
                        },
                    )
                    .await?;

                    // Undoing the inward leg can strand the destination.
                    verify_balance(
                        txn,
                        transfer.item_id,
                        transfer.to_warehouse_id,
                        allow_negative,
                    )
                    .await?;

                    let mut active: stock_transfer::ActiveModel = transfer.into();
                    active.is_deleted = Set(true);
                    active.deleted_at = Set(Some(Utc::now()));
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(transfer_id, "Soft-deleted stock transfer");

        self.event_sender
            .send_or_log(Event::DocumentDeleted {
                reference_type: StockReferenceType::TransferOut.as_str().to_string(),
                reference_id: transfer_id,
            })
            .await;

        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn restore_transfer(&self, transfer_id: i64) -> Result<(), ServiceError> {
        let allow_negative = self.allow_negative_stock;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let transfer = StockTransfer::find_by_id(transfer_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Stock transfer {} not found",
                                transfer_id
                            ))
                        })?;
                    if !transfer.is_deleted {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Stock transfer {} is not deleted",
                            transfer_id
                        )));
                    }

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

                    verify_balance(
                        txn,
                        transfer.item_id,
                        transfer.from_warehouse_id,
                        allow_negative,
                    )
                    .await?;

                    let mut active: stock_transfer::ActiveModel = transfer.into();
                    active.is_deleted = Set(false);
                    active.deleted_at = Set(None);
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(map_txn_err)?;

        info!(transfer_id, "Restored stock transfer");

        self.event_sender
            .send_or_log(Event::DocumentRestored {
                reference_type: StockReferenceType::TransferOut.as_str().to_string(),
                reference_id: transfer_id,
            })
            .await;

        Ok(())
    }
}
