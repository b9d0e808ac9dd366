use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

use crate::{
    model::{
        recipe::RecipeMinifiedDto,
        user::{SubscriptionDto, SubscriptionListQuery},
    },
    server::{
        config::ApiConfig,
        data::{recipe::RecipeRepository, user::subscription::SubscriptionRepository},
        error::Error,
        model::{
            db::UserModel,
            pagination::{Page, PageRequest},
            user::subscription_dto,
        },
        service::recipe::minify,
    },
};

pub struct SubscriptionService<'a> {
    db: &'a DatabaseConnection,
    config: &'a ApiConfig,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a ApiConfig) -> Self {
        Self { db, config }
    }

    /// Lists the authors `user_id` is subscribed to, each with their newest recipes.
    ///
    /// # Returns
    /// - `Ok(Page<SubscriptionDto>)` - Authors ordered by ID, `recipes_limit` caps the embedded
    ///   recipes per author
    /// - `Err(Error::ValidationError)` - `page` or `limit` is 0 or out of range
    /// - `Err(Error::ResourceError)` - Page past the last one
    pub async fn list_subscriptions(
        &self,
        user_id: i32,
        query: &SubscriptionListQuery,
    ) -> Result<Page<SubscriptionDto>, Error> {
        let request = PageRequest::resolve(query.page, query.limit, self.config)?;

        let page = SubscriptionRepository::new(self.db)
            .get_following_page(user_id, request)
            .await?
            .ensure_exists()?;

        let items = authors_with_recipes(self.db, page.items, query.recipes_limit).await?;

        Ok(Page {
            items,
            count: page.count,
            request: page.request,
        })
    }
}

/// Build subscription views of `authors`, each with at most `recipes_limit` of their newest
/// recipes, in the order the authors are given.
pub async fn authors_with_recipes<C: ConnectionTrait>(
    db: &C,
    authors: Vec<UserModel>,
    recipes_limit: Option<u64>,
) -> Result<Vec<SubscriptionDto>, DbErr> {
    let author_ids: Vec<i32> = authors.iter().map(|author| author.id).collect();
    let recipes = RecipeRepository::new(db).get_by_authors(&author_ids).await?;

    let mut recipes_count: HashMap<i32, u64> = HashMap::new();
    let mut kept = Vec::new();
    for recipe in recipes {
        let count = recipes_count.entry(recipe.author_id).or_default();
        *count += 1;
        if recipes_limit.is_none_or(|limit| *count <= limit) {
            kept.push(recipe);
        }
    }

    let owners: Vec<i32> = kept.iter().map(|recipe| recipe.author_id).collect();
    let mut recipes_by_author: HashMap<i32, Vec<RecipeMinifiedDto>> = HashMap::new();
    for (author_id, recipe) in owners.into_iter().zip(minify(db, kept).await?) {
        recipes_by_author.entry(author_id).or_default().push(recipe);
    }

    Ok(authors
        .into_iter()
        .map(|author| {
            let recipes = recipes_by_author.remove(&author.id).unwrap_or_default();
            let count = recipes_count.get(&author.id).copied().unwrap_or(0);
            subscription_dto(author, recipes, count)
        })
        .collect())
}
