use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

pub struct ShoppingCartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShoppingCartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Add a recipe to the user's shopping cart
    ///
    /// Fails with a unique constraint violation if the recipe is already present.
    pub async fn create(&self, user_id: i32, recipe_id: i32) -> Result<(), DbErr> {
        entity::prelude::ShoppingCart::insert(entity::shopping_cart::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            recipe_id: ActiveValue::Set(recipe_id),
        })
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Remove a recipe from the user's shopping cart, returns whether a row was removed
    pub async fn delete(&self, user_id: i32, recipe_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ShoppingCart::delete_many()
            .filter(entity::shopping_cart::Column::UserId.eq(user_id))
            .filter(entity::shopping_cart::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, user_id: i32, recipe_id: i32) -> Result<bool, DbErr> {
        let entry = entity::prelude::ShoppingCart::find_by_id((user_id, recipe_id))
            .one(self.db)
            .await?;

        Ok(entry.is_some())
    }

    /// Of the provided recipe IDs, return those in the user's shopping cart
    pub async fn recipe_ids_among(
        &self,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::ShoppingCart::find()
            .select_only()
            .column(entity::shopping_cart::Column::RecipeId)
            .filter(entity::shopping_cart::Column::UserId.eq(user_id))
            .filter(entity::shopping_cart::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn count_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ShoppingCart::find()
            .filter(entity::shopping_cart::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }
}
