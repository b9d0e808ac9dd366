use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250901_000003_ingredient::Ingredient, m20250901_000004_recipe::Recipe};

static IDX_INGREDIENT_IN_RECIPE_UNIQUE: &str = "idx_ingredient_in_recipe_recipe_id_ingredient_id";
static FK_INGREDIENT_IN_RECIPE_RECIPE_ID: &str = "fk_ingredient_in_recipe_recipe_id";
static FK_INGREDIENT_IN_RECIPE_INGREDIENT_ID: &str = "fk_ingredient_in_recipe_ingredient_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IngredientInRecipe::Table)
                    .if_not_exists()
                    .col(pk_auto(IngredientInRecipe::Id))
                    .col(integer(IngredientInRecipe::RecipeId))
                    .col(integer(IngredientInRecipe::IngredientId))
                    .col(integer(IngredientInRecipe::Amount))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INGREDIENT_IN_RECIPE_RECIPE_ID)
                            .from(IngredientInRecipe::Table, IngredientInRecipe::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_INGREDIENT_IN_RECIPE_INGREDIENT_ID)
                            .from(IngredientInRecipe::Table, IngredientInRecipe::IngredientId)
                            .to(Ingredient::Table, Ingredient::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_INGREDIENT_IN_RECIPE_UNIQUE)
                    .table(IngredientInRecipe::Table)
                    .col(IngredientInRecipe::RecipeId)
                    .col(IngredientInRecipe::IngredientId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_INGREDIENT_IN_RECIPE_UNIQUE)
                    .table(IngredientInRecipe::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(IngredientInRecipe::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum IngredientInRecipe {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Amount,
}
