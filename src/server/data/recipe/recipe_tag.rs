use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::db::TagModel;

pub struct RecipeTagRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeTagRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replace every tag of a recipe, the order of `tag_ids` is stored as the tag position
    ///
    /// Run inside a transaction, the delete and insert are separate statements.
    pub async fn replace_tags(&self, recipe_id: i32, tag_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::RecipeTag::delete_many()
            .filter(entity::recipe_tag::Column::RecipeId.eq(recipe_id))
            .exec(self.db)
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows = tag_ids
            .iter()
            .enumerate()
            .map(|(position, tag_id)| entity::recipe_tag::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                tag_id: ActiveValue::Set(*tag_id),
                position: ActiveValue::Set(position as i32),
            });

        entity::prelude::RecipeTag::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Tags of each provided recipe as `(recipe_id, tag)` pairs in position order
    pub async fn tags_for_recipes(
        &self,
        recipe_ids: &[i32],
    ) -> Result<Vec<(i32, TagModel)>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = entity::prelude::RecipeTag::find()
            .filter(entity::recipe_tag::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .order_by_asc(entity::recipe_tag::Column::RecipeId)
            .order_by_asc(entity::recipe_tag::Column::Position)
            .find_also_related(entity::prelude::Tag)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(recipe_tag, tag)| tag.map(|tag| (recipe_tag.recipe_id, tag)))
            .collect())
    }
}
