use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create purchase_receipts table
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

        // Create sales_shipments table
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
                    .col(ColumnDef::new(SalesShipments::CustomerName).string().null())
                    .col(ColumnDef::new(SalesShipments::Remarks).string().null())
                    .col(
                        ColumnDef::new(SalesShipments::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SalesShipments::DeletedAt).timestamp().null())
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

        // Create stock_transfers table
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
                    .col(ColumnDef::new(StockTransfers::DeletedAt).timestamp().null())
                    .col(
                        ColumnDef::new(StockTransfers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create stock_adjustments table
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
enum PurchaseReceipts {
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
enum SalesShipments {
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
enum StockTransfers {
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
enum StockAdjustments {
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
