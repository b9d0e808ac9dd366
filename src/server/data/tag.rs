use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::db::TagModel;

pub struct TagRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TagRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a tag, `color` is expected to already be normalized
    pub async fn create(&self, name: &str, color: &str, slug: &str) -> Result<TagModel, DbErr> {
        entity::prelude::Tag::insert(entity::tag::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            color: ActiveValue::Set(color.to_string()),
            slug: ActiveValue::Set(slug.to_string()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, tag_id: i32) -> Result<Option<TagModel>, DbErr> {
        entity::prelude::Tag::find_by_id(tag_id).one(self.db).await
    }

    /// Every tag ordered by ID
    pub async fn get_all(&self) -> Result<Vec<TagModel>, DbErr> {
        entity::prelude::Tag::find()
            .order_by_asc(entity::tag::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_many(&self, tag_ids: &[i32]) -> Result<Vec<TagModel>, DbErr> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Tag::find()
            .filter(entity::tag::Column::Id.is_in(tag_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Resolve tag slugs to IDs, unknown slugs are ignored
    pub async fn ids_by_slugs(&self, slugs: &[String]) -> Result<Vec<i32>, DbErr> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Tag::find()
            .select_only()
            .column(entity::tag::Column::Id)
            .filter(entity::tag::Column::Slug.is_in(slugs.iter().cloned()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn exists_by_slug(&self, slug: &str) -> Result<bool, DbErr> {
        let tag = entity::prelude::Tag::find()
            .filter(entity::tag::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(tag.is_some())
    }
}
