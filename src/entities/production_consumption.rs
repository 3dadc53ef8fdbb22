use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One component line of a production run.
///
/// `opening_stock` snapshots the balance at post time. `variance` is
/// bookkeeping only: `(opening_stock - actual_qty) - operator_closing`,
/// computed when the operator reports a closing count and never fed back
/// into the ledger.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "production_consumptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub production_run_id: i64,
    pub item_id: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub standard_qty: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub actual_qty: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub opening_stock: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub operator_closing: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))", nullable)]
    pub variance: Option<Decimal>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_run::Entity",
        from = "Column::ProductionRunId",
        to = "super::production_run::Column::Id",
        on_delete = "Cascade"
    )]
    ProductionRun,
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
}

impl Related<super::production_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionRun.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
