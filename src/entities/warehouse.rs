use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_ledger_entry::Entity")]
    StockLedgerEntries,
    #[sea_orm(has_many = "super::production_run::Entity")]
    ProductionRuns,
}

impl Related<super::stock_ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockLedgerEntries.def()
    }
}

impl Related<super::production_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
