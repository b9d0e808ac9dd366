use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};

use crate::server::model::db::RecipeImageModel;

pub struct RecipeImageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeImageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Store the image of a recipe, replacing any previous one
    pub async fn upsert(
        &self,
        recipe_id: i32,
        content_type: String,
        data: Vec<u8>,
    ) -> Result<(), DbErr> {
        let image = entity::recipe_image::ActiveModel {
            recipe_id: ActiveValue::Set(recipe_id),
            content_type: ActiveValue::Set(content_type),
            data: ActiveValue::Set(data),
        };

        entity::prelude::RecipeImage::insert(image)
            .on_conflict(
                OnConflict::column(entity::recipe_image::Column::RecipeId)
                    .update_columns([
                        entity::recipe_image::Column::ContentType,
                        entity::recipe_image::Column::Data,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    pub async fn get(&self, recipe_id: i32) -> Result<Option<RecipeImageModel>, DbErr> {
        entity::prelude::RecipeImage::find_by_id(recipe_id)
            .one(self.db)
            .await
    }

    /// Of the provided recipe IDs, return those with a stored image
    pub async fn recipe_ids_with_image(&self, recipe_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::RecipeImage::find()
            .select_only()
            .column(entity::recipe_image::Column::RecipeId)
            .filter(entity::recipe_image::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
