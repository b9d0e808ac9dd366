use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn recipe<'a>(&'a mut self) -> RecipeFixtures<'a> {
        RecipeFixtures { setup: self }
    }
}

pub struct RecipeFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> RecipeFixtures<'a> {
    /// Insert a tag, the color is derived from the slug so it stays unique per test
    pub async fn insert_tag(
        &self,
        name: &str,
        slug: &str,
    ) -> Result<entity::tag::Model, TestError> {
        let hash = slug
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let color = format!("#{:06X}", hash & 0xFFFFFF);

        Ok(entity::prelude::Tag::insert(entity::tag::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            color: ActiveValue::Set(color),
            slug: ActiveValue::Set(slug.to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    pub async fn insert_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<entity::ingredient::Model, TestError> {
        Ok(
            entity::prelude::Ingredient::insert(entity::ingredient::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                measurement_unit: ActiveValue::Set(measurement_unit.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    /// Insert a bare recipe without tags, ingredients or image
    pub async fn insert_recipe(
        &self,
        author_id: i32,
        name: &str,
    ) -> Result<entity::recipe::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Recipe::insert(entity::recipe::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            name: ActiveValue::Set(name.to_string()),
            text: ActiveValue::Set(format!("How to cook {}", name)),
            cooking_time: ActiveValue::Set(15),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    pub async fn insert_recipe_tag(
        &self,
        recipe_id: i32,
        tag_id: i32,
        position: i32,
    ) -> Result<entity::recipe_tag::Model, TestError> {
        Ok(
            entity::prelude::RecipeTag::insert(entity::recipe_tag::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                tag_id: ActiveValue::Set(tag_id),
                position: ActiveValue::Set(position),
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    pub async fn insert_recipe_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        amount: i32,
    ) -> Result<entity::ingredient_in_recipe::Model, TestError> {
        Ok(entity::prelude::IngredientInRecipe::insert(
            entity::ingredient_in_recipe::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(ingredient_id),
                amount: ActiveValue::Set(amount),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.state.db)
        .await?)
    }

    pub async fn insert_favorite(
        &self,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<entity::favorite::Model, TestError> {
        Ok(
            entity::prelude::Favorite::insert(entity::favorite::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                recipe_id: ActiveValue::Set(recipe_id),
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    pub async fn insert_shopping_cart(
        &self,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<entity::shopping_cart::Model, TestError> {
        Ok(
            entity::prelude::ShoppingCart::insert(entity::shopping_cart::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                recipe_id: ActiveValue::Set(recipe_id),
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
