pub mod documents;
pub mod health;
pub mod production;
pub mod stock;

use crate::{
    db::DbPool,
    events::EventSender,
    services::{BomService, DocumentService, ProductionService, RebuildService, StockLedgerService},
};
use std::sync::Arc;

pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub stock_ledger: Arc<StockLedgerService>,
    pub bom: Arc<BomService>,
    pub production: Arc<ProductionService>,
    pub documents: Arc<DocumentService>,
    pub rebuild: Arc<RebuildService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        allow_negative_stock: bool,
    ) -> Self {
        let stock_ledger = Arc::new(StockLedgerService::new(
            db_pool.clone(),
            event_sender.clone(),
            allow_negative_stock,
        ));
        let bom = Arc::new(BomService::new(db_pool.clone()));
        let production = Arc::new(ProductionService::new(
            db_pool.clone(),
            event_sender.clone(),
            allow_negative_stock,
        ));
        let documents = Arc::new(DocumentService::new(
            db_pool.clone(),
            event_sender.clone(),
            allow_negative_stock,
        ));
        let rebuild = Arc::new(RebuildService::new(db_pool, event_sender));

        Self {
            stock_ledger,
            bom,
            production,
            documents,
            rebuild,
        }
    }
}
