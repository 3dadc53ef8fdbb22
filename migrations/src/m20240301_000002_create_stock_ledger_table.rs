use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create stock_ledger_entries table. Rows are append-only; quantity
        // carries the sign.
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
enum StockLedgerEntries {
    Table,
    Id,
    ItemId,
    WarehouseId,
    Quantity,
    ReferenceType,
    ReferenceId,
    CreatedAt,
}
