use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250901_000004_recipe::Recipe;

static FK_RECIPE_IMAGE_RECIPE_ID: &str = "fk_recipe_image_recipe_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeImage::Table)
                    .if_not_exists()
                    .col(integer(RecipeImage::RecipeId).primary_key())
                    .col(string_len(RecipeImage::ContentType, 64))
                    .col(blob(RecipeImage::Data))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RECIPE_IMAGE_RECIPE_ID)
                            .from(RecipeImage::Table, RecipeImage::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeImage::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RecipeImage {
    Table,
    RecipeId,
    ContentType,
    Data,
}
