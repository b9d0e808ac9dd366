use sea_orm::{
    sea_query::Query, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::db::{IngredientInRecipeModel, IngredientModel};

pub struct IngredientInRecipeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IngredientInRecipeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replace every ingredient entry of a recipe with `(ingredient_id, amount)` pairs
    pub async fn replace_ingredients(
        &self,
        recipe_id: i32,
        entries: &[(i32, i32)],
    ) -> Result<(), DbErr> {
        entity::prelude::IngredientInRecipe::delete_many()
            .filter(entity::ingredient_in_recipe::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await?;

        if entries.is_empty() {
            return Ok(());
        }

        let rows = entries.iter().map(|(ingredient_id, amount)| {
            entity::ingredient_in_recipe::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(*ingredient_id),
                amount: ActiveValue::Set(*amount),
                ..Default::default()
            }
        });

        entity::prelude::IngredientInRecipe::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Ingredient entries of the provided recipes joined with their ingredient, in entry order
    pub async fn ingredients_for_recipes(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<(IngredientInRecipeModel, IngredientModel)>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = entity::prelude::IngredientInRecipe::find()
            .filter(
                entity::ingredient_in_recipe::Column::RecipeId.is_in(recipe_ids.iter().copied()),
            )
            .order_by_asc(entity::ingredient_in_recipe::Column::Id)
            .find_also_related(entity::prelude::Ingredient)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, ingredient)| ingredient.map(|ingredient| (entry, ingredient)))
            .collect())
    }

    /// `(name, measurement_unit, amount)` for every ingredient entry of the recipes in a user's
    /// shopping cart
    pub async fn shopping_cart_amounts(
        &self,
        user_id: i32,
    ) -> Result<Vec<(String, String, i32)>, DbErr> {
        let in_cart = Query::select()
            .column(entity::shopping_cart::Column::RecipeId)
            .from(entity::prelude::ShoppingCart)
            .and_where(entity::shopping_cart::Column::UserId.eq(user_id))
            .to_owned();

        let rows = entity::prelude::IngredientInRecipe::find()
            .filter(entity::ingredient_in_recipe::Column::RecipeId.in_subquery(in_cart))
            .find_also_related(entity::prelude::Ingredient)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, ingredient)| {
                ingredient.map(|ingredient| {
                    (ingredient.name, ingredient.measurement_unit, entry.amount)
                })
            })
            .collect())
    }
}
