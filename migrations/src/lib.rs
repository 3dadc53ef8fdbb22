pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_master_tables;
mod m20240301_000002_create_stock_ledger_table;
mod m20240301_000003_create_bom_tables;
mod m20240301_000004_create_production_tables;
mod m20240301_000005_create_document_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_master_tables::Migration),
            Box::new(m20240301_000002_create_stock_ledger_table::Migration),
            Box::new(m20240301_000003_create_bom_tables::Migration),
            Box::new(m20240301_000004_create_production_tables::Migration),
            Box::new(m20240301_000005_create_document_tables::Migration),
        ]
    }
}
