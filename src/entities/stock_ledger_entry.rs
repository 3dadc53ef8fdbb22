use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Typed cause of a ledger movement. Every entry carries one of these plus
/// the id of the source document it came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockReferenceType {
    #[sea_orm(string_value = "PURCHASE")]
    Purchase,
    #[sea_orm(string_value = "SALE")]
    Sale,
    #[sea_orm(string_value = "PROD_CONSUME")]
    ProdConsume,
    #[sea_orm(string_value = "PROD_OUTPUT")]
    ProdOutput,
    #[sea_orm(string_value = "TRANSFER_IN")]
    TransferIn,
    #[sea_orm(string_value = "TRANSFER_OUT")]
    TransferOut,
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

impl StockReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockReferenceType::Purchase => "PURCHASE",
            StockReferenceType::Sale => "SALE",
            StockReferenceType::ProdConsume => "PROD_CONSUME",
            StockReferenceType::ProdOutput => "PROD_OUTPUT",
            StockReferenceType::TransferIn => "TRANSFER_IN",
            StockReferenceType::TransferOut => "TRANSFER_OUT",
            StockReferenceType::Adjustment => "ADJUSTMENT",
        }
    }
}

/// Append-only signed stock movement. Inward quantities are positive,
/// outward negative. Rows are never updated; reversal is an
/// equal-and-opposite entry, and bulk deletion happens only inside rebuild.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "stock_ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub item_id: i64,
    pub warehouse_id: i64,
    /// Signed movement quantity
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub quantity: Decimal,
    pub reference_type: StockReferenceType,
    /// Id of the source document (soft FK, typed by reference_type)
    pub reference_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Check if this entry moves stock into the warehouse
    pub fn is_inward(&self) -> bool {
        self.quantity.is_sign_positive()
    }

    /// Check if this entry moves stock out of the warehouse
    pub fn is_outward(&self) -> bool {
        self.quantity.is_sign_negative()
    }
}
