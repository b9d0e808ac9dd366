use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

pub struct FavoriteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FavoriteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Add a recipe to the user's favorites
    ///
    /// Fails with a unique constraint violation if the recipe is already present.
    pub async fn create(&self, user_id: i32, recipe_id: i32) -> Result<(), DbErr> {
        entity::prelude::Favorite::insert(entity::favorite::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            recipe_id: ActiveValue::Set(recipe_id),
        })
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Remove a recipe from the user's favorites, returns whether a row was removed
    pub async fn delete(&self, user_id: i32, recipe_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Favorite::delete_many()
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, user_id: i32, recipe_id: i32) -> Result<bool, DbErr> {
        let entry = entity::prelude::Favorite::find_by_id((user_id, recipe_id))
            .one(self.db)
            .await?;

        Ok(entry.is_some())
    }

    /// Of the provided recipe IDs, return those in the user's favorites
    pub async fn recipe_ids_among(
        &self,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Favorite::find()
            .select_only()
            .column(entity::favorite::Column::RecipeId)
            .filter(entity::favorite::Column::UserId.eq(user_id))
            .filter(entity::favorite::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
