use crate::{
    entities::{
        production_consumption::{self, Entity as ProductionConsumption},
        production_run::{self, Entity as ProductionRun, Model as ProductionRunModel},
    },
    errors::ServiceError,
    services::production::ProductionRunDetail,
};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}

/// Run header plus its consumption lines, in posting order.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetProductionRunQuery {
    pub run_id: i64,
}

#[async_trait]
impl Query for GetProductionRunQuery {
    type Result = ProductionRunDetail;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let run = ProductionRun::find_by_id(self.run_id)
            .one(db_pool)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Production run {} not found", self.run_id))
            })?;

        let consumptions = ProductionConsumption::find()
            .filter(production_consumption::Column::ProductionRunId.eq(run.id))
            .order_by_asc(production_consumption::Column::Id)
            .all(db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(ProductionRunDetail { run, consumptions })
    }
}

/// Paginated run list, most recent production date first. Deleted runs are
/// hidden unless explicitly requested.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductionRunsQuery {
    pub page: u64,
    pub page_size: u64,
    pub include_deleted: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductionRunPage {
    pub runs: Vec<ProductionRunModel>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[async_trait]
impl Query for ListProductionRunsQuery {
    type Result = ProductionRunPage;

    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let page = self.page.max(1);
        let page_size = self.page_size.clamp(1, 200);

        let mut finder = ProductionRun::find();
        if !self.include_deleted {
            finder = finder.filter(production_run::Column::IsDeleted.eq(false));
        }

        let paginator = finder
            .order_by_desc(production_run::Column::ProductionDate)
            .order_by_desc(production_run::Column::Id)
            .paginate(db_pool, page_size);

        let total = paginator.num_items().await.map_err(ServiceError::db_error)?;
        let runs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(ProductionRunPage {
            runs,
            total,
            page,
            page_size,
        })
    }
}
