use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bom_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bom_recipe_id: i64,
    pub component_item_id: i64,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub qty_per_batch: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bom_recipe::Entity",
        from = "Column::BomRecipeId",
        to = "super::bom_recipe::Column::Id",
        on_delete = "Cascade"
    )]
    BomRecipe,
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ComponentItemId",
        to = "super::item::Column::Id"
    )]
    ComponentItem,
}

impl Related<super::bom_recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomRecipe.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComponentItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
