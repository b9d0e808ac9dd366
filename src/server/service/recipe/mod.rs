use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    model::recipe::{RecipeListQuery, RecipeMinifiedDto, RecipeReadDto, RecipeWriteDto},
    server::{
        config::ApiConfig,
        data::{
            recipe::{
                favorite::FavoriteRepository, ingredient_in_recipe::IngredientInRecipeRepository,
                recipe_image::RecipeImageRepository, recipe_tag::RecipeTagRepository,
                shopping_cart::ShoppingCartRepository, RecipeRepository,
            },
            tag::TagRepository,
            user::{subscription::SubscriptionRepository, UserRepository},
        },
        error::{resource::ResourceError, validation::ValidationError, Error},
        model::{
            db::{RecipeImageModel, RecipeModel, UserModel},
            pagination::{Page, PageRequest},
            recipe::{
                minified_dto, MembershipFilter, RecipeComposite, RecipeFields, RecipeFilter,
                ViewerFlags,
            },
        },
        service::composition::{Composition, CompositionService},
        util::image::{decode_data_uri, DecodedImage},
    },
};

#[cfg(test)]
mod tests;

const MAX_RECIPE_NAME_LENGTH: usize = 200;

/// Service for recipe CRUD, listings and images.
///
/// Every write runs in a single transaction: the recipe row, its image and its composition are
/// stored together or not at all.
pub struct RecipeService<'a> {
    db: &'a DatabaseConnection,
    config: &'a ApiConfig,
}

impl<'a> RecipeService<'a> {
    /// Creates a new instance of [`RecipeService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a ApiConfig) -> Self {
        Self { db, config }
    }

    /// Publishes a new recipe authored by `author_id`.
    ///
    /// Every field of the payload is required. The whole payload is validated before the
    /// transaction is opened, except for the existence of referenced tags and ingredients which
    /// is checked inside it.
    ///
    /// # Returns
    /// - `Ok(RecipeReadDto)` - The stored recipe as seen by its author
    /// - `Err(Error::ValidationError)` - Invalid payload, nothing was written
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn create(
        &self,
        author_id: i32,
        payload: RecipeWriteDto,
    ) -> Result<RecipeReadDto, Error> {
        let composition = Composition::from_payload(payload.tags, payload.ingredients)?;
        let fields = RecipeFields {
            name: validate_name(payload.name.ok_or(ValidationError::MissingField("name"))?)?,
            text: validate_text(payload.text.ok_or(ValidationError::MissingField("text"))?)?,
            cooking_time: validate_cooking_time(
                payload
                    .cooking_time
                    .ok_or(ValidationError::MissingField("cooking_time"))?,
            )?,
        };
        let image = payload.image.ok_or(ValidationError::MissingField("image"))?;
        let image = decode_data_uri(&image, self.config.max_image_bytes)?;

        let txn = self.db.begin().await?;

        let recipe = RecipeRepository::new(&txn).create(author_id, fields).await?;
        RecipeImageRepository::new(&txn)
            .upsert(recipe.id, image.content_type, image.data)
            .await?;
        CompositionService::new(&txn)
            .apply(recipe.id, &composition)
            .await?;

        txn.commit().await?;

        tracing::info!(recipe_id = recipe.id, author_id, "Recipe created");

        self.get_recipe(Some(author_id), recipe.id).await
    }

    /// Updates a recipe owned by `user_id`.
    ///
    /// `tags` and `ingredients` are required and fully replace the stored composition. The
    /// remaining fields keep their stored value when absent.
    ///
    /// # Returns
    /// - `Ok(RecipeReadDto)` - The updated recipe
    /// - `Err(Error::ResourceError(ResourceError::NotFound))` - No such recipe
    /// - `Err(Error::ResourceError(ResourceError::Forbidden))` - `user_id` is not the author
    /// - `Err(Error::ValidationError)` - Invalid payload, nothing was written
    pub async fn update(
        &self,
        user_id: i32,
        recipe_id: i32,
        payload: RecipeWriteDto,
    ) -> Result<RecipeReadDto, Error> {
        let recipe = self.get_owned(user_id, recipe_id, "change this recipe").await?;

        let composition = Composition::from_payload(payload.tags, payload.ingredients)?;
        let fields = RecipeFields {
            name: match payload.name {
                Some(name) => validate_name(name)?,
                None => recipe.name.clone(),
            },
            text: match payload.text {
                Some(text) => validate_text(text)?,
                None => recipe.text.clone(),
            },
            cooking_time: match payload.cooking_time {
                Some(cooking_time) => validate_cooking_time(cooking_time)?,
                None => recipe.cooking_time,
            },
        };
        let image = payload
            .image
            .map(|image| decode_data_uri(&image, self.config.max_image_bytes))
            .transpose()?;

        let txn = self.db.begin().await?;

        RecipeRepository::new(&txn).update(recipe, fields).await?;
        if let Some(image) = image {
            RecipeImageRepository::new(&txn)
                .upsert(recipe_id, image.content_type, image.data)
                .await?;
        }
        CompositionService::new(&txn)
            .apply(recipe_id, &composition)
            .await?;

        txn.commit().await?;

        tracing::info!(recipe_id, user_id, "Recipe updated");

        self.get_recipe(Some(user_id), recipe_id).await
    }

    /// Deletes a recipe owned by `user_id` along with every row referencing it.
    pub async fn delete(&self, user_id: i32, recipe_id: i32) -> Result<(), Error> {
        self.get_owned(user_id, recipe_id, "delete this recipe")
            .await?;

        RecipeRepository::new(self.db).delete(recipe_id).await?;

        tracing::info!(recipe_id, user_id, "Recipe deleted");

        Ok(())
    }

    pub async fn get_recipe(
        &self,
        viewer_id: Option<i32>,
        recipe_id: i32,
    ) -> Result<RecipeReadDto, Error> {
        let Some(recipe) = RecipeRepository::new(self.db).get(recipe_id).await? else {
            return Err(ResourceError::recipe_not_found(recipe_id).into());
        };

        let mut recipes = self.assemble(viewer_id, vec![recipe]).await?;

        recipes.pop().ok_or_else(|| {
            Error::InternalError(format!("Failed to assemble recipe ID {}", recipe_id))
        })
    }

    /// Lists recipes newest first, applying the filters of `query` for `viewer_id`.
    ///
    /// # Returns
    /// - `Ok(Page<RecipeReadDto>)` - The requested page, the first page may be empty
    /// - `Err(Error::ValidationError(ValidationError::InvalidQuery))` - `page` or `limit` is 0
    ///   or out of range
    /// - `Err(Error::ResourceError(ResourceError::PageNotFound))` - Page past the last one
    pub async fn list_recipes(
        &self,
        viewer_id: Option<i32>,
        query: &RecipeListQuery,
    ) -> Result<Page<RecipeReadDto>, Error> {
        let request = PageRequest::resolve(query.page, query.limit, self.config)?;
        let filter = self.build_filter(viewer_id, query).await?;

        let page = RecipeRepository::new(self.db)
            .get_page(&filter, request)
            .await?
            .ensure_exists()?;

        let items = self.assemble(viewer_id, page.items).await?;

        Ok(Page {
            items,
            count: page.count,
            request: page.request,
        })
    }

    pub async fn get_image(&self, recipe_id: i32) -> Result<RecipeImageModel, Error> {
        if RecipeRepository::new(self.db).get(recipe_id).await?.is_none() {
            return Err(ResourceError::recipe_not_found(recipe_id).into());
        }

        RecipeImageRepository::new(self.db)
            .get(recipe_id)
            .await?
            .ok_or_else(|| {
                ResourceError::NotFound {
                    resource: "Image of recipe",
                    id: recipe_id,
                }
                .into()
            })
    }

    /// Replaces the image of a recipe owned by `user_id`
    pub async fn upload_image(
        &self,
        user_id: i32,
        recipe_id: i32,
        image: DecodedImage,
    ) -> Result<(), Error> {
        self.get_owned(user_id, recipe_id, "change this recipe")
            .await?;

        RecipeImageRepository::new(self.db)
            .upsert(recipe_id, image.content_type, image.data)
            .await?;

        tracing::info!(recipe_id, user_id, "Recipe image replaced");

        Ok(())
    }

    async fn get_owned(
        &self,
        user_id: i32,
        recipe_id: i32,
        action: &'static str,
    ) -> Result<RecipeModel, Error> {
        let Some(recipe) = RecipeRepository::new(self.db).get(recipe_id).await? else {
            return Err(ResourceError::recipe_not_found(recipe_id).into());
        };

        if recipe.author_id != user_id {
            return Err(ResourceError::Forbidden(action).into());
        }

        Ok(recipe)
    }

    async fn build_filter(
        &self,
        viewer_id: Option<i32>,
        query: &RecipeListQuery,
    ) -> Result<RecipeFilter, Error> {
        let tag_ids = if query.tags.is_empty() {
            None
        } else {
            Some(TagRepository::new(self.db).ids_by_slugs(&query.tags).await?)
        };

        Ok(RecipeFilter {
            author_id: query.author,
            tag_ids,
            favorited: query
                .is_favorited
                .as_deref()
                .and_then(|value| MembershipFilter::from_param(value, viewer_id)),
            in_shopping_cart: query
                .is_in_shopping_cart
                .as_deref()
                .and_then(|value| MembershipFilter::from_param(value, viewer_id)),
        })
    }

    /// Build read views for `recipes`, keeping their order
    ///
    /// Associations are fetched in one query per table for the whole batch.
    async fn assemble(
        &self,
        viewer_id: Option<i32>,
        recipes: Vec<RecipeModel>,
    ) -> Result<Vec<RecipeReadDto>, Error> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i32, UserModel> = UserRepository::new(self.db)
            .get_many(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut tags: HashMap<i32, Vec<_>> = HashMap::new();
        for (recipe_id, tag) in RecipeTagRepository::new(self.db)
            .tags_for_recipes(&recipe_ids)
            .await?
        {
            tags.entry(recipe_id).or_default().push(tag);
        }

        let mut ingredients: HashMap<i32, Vec<_>> = HashMap::new();
        for (entry, ingredient) in IngredientInRecipeRepository::new(self.db)
            .ingredients_for_recipes(&recipe_ids)
            .await?
        {
            ingredients
                .entry(entry.recipe_id)
                .or_default()
                .push((entry, ingredient));
        }

        let with_image: HashSet<i32> = RecipeImageRepository::new(self.db)
            .recipe_ids_with_image(&recipe_ids)
            .await?
            .into_iter()
            .collect();

        let (favorited, in_cart, following) = match viewer_id {
            Some(viewer_id) => (
                FavoriteRepository::new(self.db)
                    .recipe_ids_among(viewer_id, &recipe_ids)
                    .await?,
                ShoppingCartRepository::new(self.db)
                    .recipe_ids_among(viewer_id, &recipe_ids)
                    .await?,
                SubscriptionRepository::new(self.db)
                    .following_ids_among(viewer_id, &author_ids)
                    .await?,
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };
        let favorited: HashSet<i32> = favorited.into_iter().collect();
        let in_cart: HashSet<i32> = in_cart.into_iter().collect();
        let following: HashSet<i32> = following.into_iter().collect();

        recipes
            .into_iter()
            .map(|recipe| {
                let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                    // Only possible if the author foreign key is not enforced
                    Error::InternalError(format!(
                        "Failed to find author ID {} of recipe ID {}",
                        recipe.author_id, recipe.id
                    ))
                })?;

                let flags = ViewerFlags {
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    is_subscribed_to_author: following.contains(&recipe.author_id),
                };

                let composite = RecipeComposite {
                    tags: tags.remove(&recipe.id).unwrap_or_default(),
                    ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                    has_image: with_image.contains(&recipe.id),
                    author,
                    recipe,
                };

                Ok(composite.into_read_dto(flags))
            })
            .collect()
    }
}

/// Build minified views for `recipes`, resolving which of them have an image
pub async fn minify<C: ConnectionTrait>(
    db: &C,
    recipes: Vec<RecipeModel>,
) -> Result<Vec<RecipeMinifiedDto>, DbErr> {
    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let with_image: HashSet<i32> = RecipeImageRepository::new(db)
        .recipe_ids_with_image(&recipe_ids)
        .await?
        .into_iter()
        .collect();

    Ok(recipes
        .into_iter()
        .map(|recipe| {
            let has_image = with_image.contains(&recipe.id);
            minified_dto(recipe, has_image)
        })
        .collect())
}

fn validate_name(name: String) -> Result<String, ValidationError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if name.chars().count() > MAX_RECIPE_NAME_LENGTH {
        return Err(ValidationError::InvalidField {
            field: "name",
            reason: format!("at most {} characters", MAX_RECIPE_NAME_LENGTH),
        });
    }

    Ok(name)
}

fn validate_text(text: String) -> Result<String, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::MissingField("text"));
    }

    Ok(text)
}

fn validate_cooking_time(cooking_time: i32) -> Result<i32, ValidationError> {
    if cooking_time < 1 {
        return Err(ValidationError::NonPositiveCookingTime(cooking_time));
    }

    Ok(cooking_time)
}
