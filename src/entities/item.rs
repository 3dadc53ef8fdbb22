use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    /// Unit of measure (e.g., "kg", "pcs")
    pub unit: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_ledger_entry::Entity")]
    StockLedgerEntries,
    #[sea_orm(has_many = "super::bom_recipe::Entity")]
    BomRecipes,
    #[sea_orm(has_many = "super::bom_line::Entity")]
    BomLinesAsComponent,
    #[sea_orm(has_many = "super::production_run::Entity")]
    ProductionRuns,
}

impl Related<super::stock_ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockLedgerEntries.def()
    }
}

impl Related<super::bom_recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomRecipes.def()
    }
}

impl Related<super::bom_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomLinesAsComponent.def()
    }
}

impl Related<super::production_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
