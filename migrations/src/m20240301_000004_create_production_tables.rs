use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create production_runs table
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
                    .col(ColumnDef::new(ProductionRuns::DeletedAt).timestamp().null())
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

        // Create production_consumptions table; lines are owned by their run
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
enum ProductionRuns {
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
enum ProductionConsumptions {
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
