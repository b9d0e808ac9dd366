use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250901_000001_foodgram_user::FoodgramUser, m20250901_000004_recipe::Recipe};

static IDX_SHOPPING_CART_RECIPE_ID: &str = "idx_shopping_cart_recipe_id";
static FK_SHOPPING_CART_USER_ID: &str = "fk_shopping_cart_user_id";
static FK_SHOPPING_CART_RECIPE_ID: &str = "fk_shopping_cart_recipe_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingCart::Table)
                    .if_not_exists()
                    .col(integer(ShoppingCart::UserId))
                    .col(integer(ShoppingCart::RecipeId))
                    .primary_key(Index::create().col(ShoppingCart::UserId).col(ShoppingCart::RecipeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_CART_USER_ID)
                            .from(ShoppingCart::Table, ShoppingCart::UserId)
                            .to(FoodgramUser::Table, FoodgramUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SHOPPING_CART_RECIPE_ID)
                            .from(ShoppingCart::Table, ShoppingCart::RecipeId)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SHOPPING_CART_RECIPE_ID)
                    .table(ShoppingCart::Table)
                    .col(ShoppingCart::RecipeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SHOPPING_CART_RECIPE_ID)
                    .table(ShoppingCart::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShoppingCart::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ShoppingCart {
    Table,
    UserId,
    RecipeId,
}
