use anyhow::Result;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::{error, info};

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

// Migration implementations

mod m20240301_000001_create_master_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_master_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create items table aligned with entities::item Model
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Items::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Items::Sku).string().not_null().unique_key())
                        .col(ColumnDef::new(Items::Name).string().not_null())
                        .col(ColumnDef::new(Items::Unit).string().null())
                        .col(
                            ColumnDef::new(Items::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Items::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Items::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // Create warehouses table aligned with entities::warehouse Model
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(
                            ColumnDef::new(Warehouses::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Warehouses::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Warehouses::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await?;

            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Items {
        Table,
        Id,
        Sku,
        Name,
        Unit,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Code,
        Name,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_stock_ledger_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_stock_ledger_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create stock_ledger_entries table aligned with
            // entities::stock_ledger_entry Model. Rows are append-only;
            // quantity carries the sign.
            manager
                .create_table(
                    Table::create()
                        .table(StockLedgerEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockLedgerEntries::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::Quantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::ReferenceType)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::ReferenceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockLedgerEntries::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Balance summation always filters on (item_id, warehouse_id)
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_ledger_item_warehouse")
                        .table(StockLedgerEntries::Table)
                        .col(StockLedgerEntries::ItemId)
                        .col(StockLedgerEntries::WarehouseId)
                        .to_owned(),
                )
                .await?;

            // Reversal and rebuild look entries up by source document
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_ledger_reference")
                        .table(StockLedgerEntries::Table)
                        .col(StockLedgerEntries::ReferenceType)
                        .col(StockLedgerEntries::ReferenceId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_ledger_created_at")
                        .table(StockLedgerEntries::Table)
                        .col(StockLedgerEntries::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockLedgerEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StockLedgerEntries {
        Table,
        Id,
        ItemId,
        WarehouseId,
        Quantity,
        ReferenceType,
        ReferenceId,
        CreatedAt,
    }
}

mod m20240301_000003_create_bom_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_bom_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create bom_recipes table aligned with entities::bom_recipe Model
            manager
                .create_table(
                    Table::create()
                        .table(BomRecipes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BomRecipes::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BomRecipes::OutputItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomRecipes::OutputQtyPerBatch)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomRecipes::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(BomRecipes::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(BomRecipes::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bom_recipes_output_item")
                        .table(BomRecipes::Table)
                        .col(BomRecipes::OutputItemId)
                        .to_owned(),
                )
                .await?;

            // Create bom_lines table aligned with entities::bom_line Model
            manager
                .create_table(
                    Table::create()
                        .table(BomLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BomLines::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(BomLines::BomRecipeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomLines::ComponentItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomLines::QtyPerBatch)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(BomLines::CreatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bom_lines_recipe")
                                .from(BomLines::Table, BomLines::BomRecipeId)
                                .to(BomRecipes::Table, BomRecipes::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bom_lines_recipe_id")
                        .table(BomLines::Table)
                        .col(BomLines::BomRecipeId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BomLines::Table).to_owned())
                .await?;

            manager
                .drop_table(Table::drop().table(BomRecipes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BomRecipes {
        Table,
        Id,
        OutputItemId,
        OutputQtyPerBatch,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum BomLines {
        Table,
        Id,
        BomRecipeId,
        ComponentItemId,
        QtyPerBatch,
        CreatedAt,
    }
}

mod m20240301_000004_create_production_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_production_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create production_runs table aligned with
            // entities::production_run Model
            manager
                .create_table(
                    Table::create()
                        .table(ProductionRuns::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionRuns::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::ProductionDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::OutputItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::OutputQuantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::BatchCount)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductionRuns::Remarks).string().null())
                        .col(
                            ColumnDef::new(ProductionRuns::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::DeletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionRuns::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_runs_date")
                        .table(ProductionRuns::Table)
                        .col(ProductionRuns::ProductionDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_runs_output_item")
                        .table(ProductionRuns::Table)
                        .col(ProductionRuns::OutputItemId)
                        .to_owned(),
                )
                .await?;

            // Create production_consumptions table aligned with
            // entities::production_consumption Model
            manager
                .create_table(
                    Table::create()
                        .table(ProductionConsumptions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductionConsumptions::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::ProductionRunId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::StandardQty)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::ActualQty)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::OpeningStock)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::OperatorClosing)
                                .decimal_len(16, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::Variance)
                                .decimal_len(16, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::Remarks)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductionConsumptions::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_production_consumptions_run")
                                .from(
                                    ProductionConsumptions::Table,
                                    ProductionConsumptions::ProductionRunId,
                                )
                                .to(ProductionRuns::Table, ProductionRuns::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_production_consumptions_run_id")
                        .table(ProductionConsumptions::Table)
                        .col(ProductionConsumptions::ProductionRunId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(ProductionConsumptions::Table)
                        .to_owned(),
                )
                .await?;

            manager
                .drop_table(Table::drop().table(ProductionRuns::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductionRuns {
        Table,
        Id,
        ProductionDate,
        OutputItemId,
        OutputQuantity,
        WarehouseId,
        BatchCount,
        Remarks,
        IsDeleted,
        DeletedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductionConsumptions {
        Table,
        Id,
        ProductionRunId,
        ItemId,
        StandardQty,
        ActualQty,
        OpeningStock,
        OperatorClosing,
        Variance,
        Remarks,
        CreatedAt,
    }
}

mod m20240301_000005_create_document_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_document_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create purchase_receipts table aligned with
            // entities::purchase_receipt Model
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseReceipts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseReceipts::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::Quantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::ReceiptDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::SupplierName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseReceipts::Remarks).string().null())
                        .col(
                            ColumnDef::new(PurchaseReceipts::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::DeletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseReceipts::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_receipts_item_warehouse")
                        .table(PurchaseReceipts::Table)
                        .col(PurchaseReceipts::ItemId)
                        .col(PurchaseReceipts::WarehouseId)
                        .to_owned(),
                )
                .await?;

            // Create sales_shipments table aligned with
            // entities::sales_shipment Model
            manager
                .create_table(
                    Table::create()
                        .table(SalesShipments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesShipments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::Quantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::ShipmentDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::CustomerName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(SalesShipments::Remarks).string().null())
                        .col(
                            ColumnDef::new(SalesShipments::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::DeletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesShipments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_shipments_item_warehouse")
                        .table(SalesShipments::Table)
                        .col(SalesShipments::ItemId)
                        .col(SalesShipments::WarehouseId)
                        .to_owned(),
                )
                .await?;

            // Create stock_transfers table aligned with
            // entities::stock_transfer Model
            manager
                .create_table(
                    Table::create()
                        .table(StockTransfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockTransfers::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::FromWarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::ToWarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::Quantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::TransferDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockTransfers::Remarks).string().null())
                        .col(
                            ColumnDef::new(StockTransfers::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::DeletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Create stock_adjustments table aligned with
            // entities::stock_adjustment Model
            manager
                .create_table(
                    Table::create()
                        .table(StockAdjustments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockAdjustments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::ItemId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::Quantity)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAdjustments::Reason).string().not_null())
                        .col(ColumnDef::new(StockAdjustments::Remarks).string().null())
                        .col(
                            ColumnDef::new(StockAdjustments::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::DeletedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StockAdjustments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_adjustments_item_warehouse")
                        .table(StockAdjustments::Table)
                        .col(StockAdjustments::ItemId)
                        .col(StockAdjustments::WarehouseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockAdjustments::Table).to_owned())
                .await?;

            manager
                .drop_table(Table::drop().table(StockTransfers::Table).to_owned())
                .await?;

            manager
                .drop_table(Table::drop().table(SalesShipments::Table).to_owned())
                .await?;

            manager
                .drop_table(Table::drop().table(PurchaseReceipts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseReceipts {
        Table,
        Id,
        ItemId,
        WarehouseId,
        Quantity,
        ReceiptDate,
        SupplierName,
        Remarks,
        IsDeleted,
        DeletedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesShipments {
        Table,
        Id,
        ItemId,
        WarehouseId,
        Quantity,
        ShipmentDate,
        CustomerName,
        Remarks,
        IsDeleted,
        DeletedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum StockTransfers {
        Table,
        Id,
        ItemId,
        FromWarehouseId,
        ToWarehouseId,
        Quantity,
        TransferDate,
        Remarks,
        IsDeleted,
        DeletedAt,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum StockAdjustments {
        Table,
        Id,
        ItemId,
        WarehouseId,
        Quantity,
        Reason,
        Remarks,
        IsDeleted,
        DeletedAt,
        CreatedAt,
    }
}

// Database migration CLI runner
pub async fn run_migration(db_url: &str) -> Result<()> {
    info!("Setting up database connection for migrations");

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    info!("Running database migrations");

    let result = Migrator::up(&db, None).await;

    match result {
        Ok(_) => {
            info!("Migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Migration failed: {}", e);
            Err(e.into())
        }
    }
}
