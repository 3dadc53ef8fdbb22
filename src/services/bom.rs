use crate::{
    db::DbPool,
    entities::{
        bom_line::{self, Entity as BomLine},
        bom_recipe::{self, Entity as BomRecipe},
    },
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// One prefill line for the EOD entry screen: what the recipe says the run
/// should consume for the requested batch count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandardConsumptionLine {
    pub item_id: i64,
    pub standard_qty: Decimal,
}

/// Read-only BOM expansion. Recipes are maintained out of band; this
/// service only resolves them for UI prefill.
#[derive(Clone)]
pub struct BomService {
    db_pool: Arc<DbPool>,
}

impl BomService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Expands the active recipe for an output item into per-component
    /// standard quantities: `qty_per_batch * batch_count` per line.
    #[instrument(skip(self), err)]
    pub async fn standard_consumptions(
        &self,
        output_item_id: i64,
        batch_count: i32,
    ) -> Result<Vec<StandardConsumptionLine>, ServiceError> {
        if batch_count <= 0 {
            return Err(ServiceError::ValidationError(
                "Batch count must be positive".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();

        let recipe = BomRecipe::find()
            .filter(bom_recipe::Column::OutputItemId.eq(output_item_id))
            .filter(bom_recipe::Column::IsActive.eq(true))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No active recipe for output item {}",
                    output_item_id
                ))
            })?;

        let lines = BomLine::find()
            .filter(bom_line::Column::BomRecipeId.eq(recipe.id))
            .order_by_asc(bom_line::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let batches = Decimal::from(batch_count);
        Ok(lines
            .into_iter()
            .map(|line| StandardConsumptionLine {
                item_id: line.component_item_id,
                standard_qty: line.qty_per_batch * batches,
            })
            .collect())
    }
}
