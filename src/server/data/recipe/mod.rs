pub mod favorite;
pub mod ingredient_in_recipe;
pub mod recipe_image;
pub mod recipe_tag;
pub mod shopping_cart;

use sea_orm::{
    sea_query::{Query, SelectStatement},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::{
    db::RecipeModel,
    pagination::{Page, PageRequest},
    recipe::{MembershipFilter, RecipeFields, RecipeFilter},
};

pub struct RecipeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipeRepository<'a, C> {
    /// Creates a new instance of [`RecipeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, author_id: i32, fields: RecipeFields) -> Result<RecipeModel, DbErr> {
        let now = chrono::Utc::now().naive_utc();

        let recipe = entity::recipe::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            name: ActiveValue::Set(fields.name),
            text: ActiveValue::Set(fields.text),
            cooking_time: ActiveValue::Set(fields.cooking_time),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        recipe.insert(self.db).await
    }

    pub async fn get(&self, recipe_id: i32) -> Result<Option<RecipeModel>, DbErr> {
        entity::prelude::Recipe::find_by_id(recipe_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, recipe_ids: &[i32]) -> Result<Vec<RecipeModel>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        newest_first(
            entity::prelude::Recipe::find()
                .filter(entity::recipe::Column::Id.is_in(recipe_ids.iter().copied())),
        )
        .all(self.db)
        .await
    }

    /// Overwrite the scalar fields of a recipe and bump its `updated_at` timestamp
    pub async fn update(
        &self,
        recipe: RecipeModel,
        fields: RecipeFields,
    ) -> Result<RecipeModel, DbErr> {
        let mut recipe_am = recipe.into_active_model();
        recipe_am.name = ActiveValue::Set(fields.name);
        recipe_am.text = ActiveValue::Set(fields.text);
        recipe_am.cooking_time = ActiveValue::Set(fields.cooking_time);
        recipe_am.updated_at = ActiveValue::Set(chrono::Utc::now().naive_utc());

        recipe_am.update(self.db).await
    }

    /// Delete a recipe, association rows are removed by cascade
    ///
    /// Returns whether a recipe was deleted.
    pub async fn delete(&self, recipe_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Recipe::delete_by_id(recipe_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Get a page of recipes matching `filter`, newest first
    pub async fn get_page(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeModel>, DbErr> {
        if filter.matches_nothing() {
            return Ok(Page::empty(page));
        }

        let mut query = entity::prelude::Recipe::find();

        if let Some(author_id) = filter.author_id {
            query = query.filter(entity::recipe::Column::AuthorId.eq(author_id));
        }

        if let Some(tag_ids) = &filter.tag_ids {
            let tagged = Query::select()
                .column(entity::recipe_tag::Column::RecipeId)
                .from(entity::prelude::RecipeTag)
                .and_where(entity::recipe_tag::Column::TagId.is_in(tag_ids.iter().copied()))
                .to_owned();
            query = query.filter(entity::recipe::Column::Id.in_subquery(tagged));
        }

        if let Some(membership) = filter.favorited {
            query = apply_membership(query, membership, |user_id| {
                Query::select()
                    .column(entity::favorite::Column::RecipeId)
                    .from(entity::prelude::Favorite)
                    .and_where(entity::favorite::Column::UserId.eq(user_id))
                    .to_owned()
            });
        }

        if let Some(membership) = filter.in_shopping_cart {
            query = apply_membership(query, membership, |user_id| {
                Query::select()
                    .column(entity::shopping_cart::Column::RecipeId)
                    .from(entity::prelude::ShoppingCart)
                    .and_where(entity::shopping_cart::Column::UserId.eq(user_id))
                    .to_owned()
            });
        }

        let paginator = newest_first(query).paginate(self.db, page.page_size);

        let count = paginator.num_items().await?;
        let items = paginator.fetch_page(page.index()).await?;

        Ok(Page {
            items,
            count,
            request: page,
        })
    }

    /// Every recipe of the given authors, newest first
    pub async fn get_by_authors(&self, author_ids: &[i32]) -> Result<Vec<RecipeModel>, DbErr> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        newest_first(
            entity::prelude::Recipe::find()
                .filter(entity::recipe::Column::AuthorId.is_in(author_ids.iter().copied())),
        )
        .all(self.db)
        .await
    }
}

fn newest_first(query: Select<entity::recipe::Entity>) -> Select<entity::recipe::Entity> {
    query
        .order_by_desc(entity::recipe::Column::CreatedAt)
        .order_by_desc(entity::recipe::Column::Id)
}

fn apply_membership<F>(
    query: Select<entity::recipe::Entity>,
    membership: MembershipFilter,
    marked_by: F,
) -> Select<entity::recipe::Entity>
where
    F: Fn(i32) -> SelectStatement,
{
    match membership {
        MembershipFilter::Only(user_id) => {
            query.filter(entity::recipe::Column::Id.in_subquery(marked_by(user_id)))
        }
        MembershipFilter::Excluding(user_id) => {
            query.filter(entity::recipe::Column::Id.not_in_subquery(marked_by(user_id)))
        }
        // Filtered out in `get_page` before building the query
        MembershipFilter::Nothing => query,
    }
}
