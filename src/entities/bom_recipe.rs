use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recipe mapping an output item to its per-batch yield. Read-only from the
/// posting core's perspective; maintained out of band.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bom_recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub output_item_id: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub output_qty_per_batch: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::OutputItemId",
        to = "super::item::Column::Id"
    )]
    OutputItem,
    #[sea_orm(has_many = "super::bom_line::Entity")]
    BomLines,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutputItem.def()
    }
}

impl Related<super::bom_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
