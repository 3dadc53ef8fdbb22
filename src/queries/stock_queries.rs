use crate::{
    entities::stock_ledger_entry::{self, Entity as StockLedgerEntry, Model as StockLedgerEntryModel},
    errors::ServiceError,
    services::stock_ledger::current_stock,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}

/// Current balance for one item/warehouse pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetStockBalanceQuery {
    pub item_id: i64,
    pub warehouse_id: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockBalance {
    pub item_id: i64,
    pub warehouse_id: i64,
    pub balance: Decimal,
}

#[async_trait]
impl Query for GetStockBalanceQuery {
    type Result = StockBalance;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let balance = current_stock(db_pool, self.item_id, self.warehouse_id).await?;
        Ok(StockBalance {
            item_id: self.item_id,
            warehouse_id: self.warehouse_id,
            balance,
        })
    }
}

/// Balances for every item/warehouse pair that has at least one ledger entry.
/// Summation happens here rather than in SQL so the arithmetic is the same
/// Decimal fold the posting gateway uses.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetAllStockBalancesQuery {
    pub include_zero: bool,
}

#[async_trait]
impl Query for GetAllStockBalancesQuery {
    type Result = Vec<StockBalance>;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let entries = StockLedgerEntry::find()
            .order_by_asc(stock_ledger_entry::Column::ItemId)
            .order_by_asc(stock_ledger_entry::Column::WarehouseId)
            .all(db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        let mut totals: BTreeMap<(i64, i64), Decimal> = BTreeMap::new();
        for entry in entries {
            *totals
                .entry((entry.item_id, entry.warehouse_id))
                .or_insert(Decimal::ZERO) += entry.quantity;
        }

        Ok(totals
            .into_iter()
            .filter(|(_, balance)| self.include_zero || *balance != Decimal::ZERO)
            .map(|((item_id, warehouse_id), balance)| StockBalance {
                item_id,
                warehouse_id,
                balance,
            })
            .collect())
    }
}

/// Ledger movements for a pair, newest first, paginated.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetStockMovementsQuery {
    pub item_id: i64,
    pub warehouse_id: i64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockMovementPage {
    pub movements: Vec<StockLedgerEntryModel>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[async_trait]
impl Query for GetStockMovementsQuery {
    type Result = StockMovementPage;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let page = self.page.max(1);
        let page_size = self.page_size.clamp(1, 200);

        let paginator = StockLedgerEntry::find()
            .filter(stock_ledger_entry::Column::ItemId.eq(self.item_id))
            .filter(stock_ledger_entry::Column::WarehouseId.eq(self.warehouse_id))
            .order_by_desc(stock_ledger_entry::Column::CreatedAt)
            .order_by_desc(stock_ledger_entry::Column::Id)
            .paginate(db_pool, page_size);

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let movements = paginator
            .fetch_page(page - 1)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(StockMovementPage {
            movements,
            total,
            page,
            page_size,
        })
    }
}
