use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// End-of-day production run header. Owns its consumption lines; deleting a
/// run cascades to them. Soft-deleted runs keep their rows and ledger
/// history and are neutralized by compensating entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "production_runs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub production_date: NaiveDate,
    pub output_item_id: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub output_quantity: Decimal,
    pub warehouse_id: i64,
    pub batch_count: i32,
    pub remarks: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::OutputItemId",
        to = "super::item::Column::Id"
    )]
    OutputItem,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(has_many = "super::production_consumption::Entity")]
    Consumptions,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutputItem.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::production_consumption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
