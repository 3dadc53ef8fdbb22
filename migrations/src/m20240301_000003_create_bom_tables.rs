use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create bom_recipes table
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

        // Create bom_lines table; lines are owned by their recipe
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
enum BomRecipes {
    Table,
    Id,
    OutputItemId,
    OutputQtyPerBatch,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BomLines {
    Table,
    Id,
    BomRecipeId,
    ComponentItemId,
    QtyPerBatch,
    CreatedAt,
}
