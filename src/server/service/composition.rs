//! Recipe composition validation and persistence.
//!
//! A composition is the ordered tag list and the ingredient list of a recipe. It is validated
//! in two steps: [`Composition::from_payload`] checks the request shape without touching the
//! database, [`CompositionService::apply`] checks that every referenced tag and ingredient
//! exists and then fully replaces the stored associations.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use crate::{
    model::recipe::IngredientAmountDto,
    server::{
        data::{
            ingredient::IngredientRepository,
            recipe::{
                ingredient_in_recipe::IngredientInRecipeRepository,
                recipe_tag::RecipeTagRepository,
            },
            tag::TagRepository,
        },
        error::{validation::ValidationError, Error},
    },
};

/// A shape-checked recipe composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    /// Tag IDs without duplicates, in first-occurrence order
    pub tag_ids: Vec<i32>,
    /// `(ingredient_id, amount)` pairs, every ingredient appears once
    pub ingredients: Vec<(i32, i32)>,
}

impl Composition {
    /// Check the tags and ingredients of a write payload.
    ///
    /// Absent fields are rejected while empty lists are accepted. Duplicate tag IDs collapse
    /// to their first occurrence, duplicate ingredient IDs are rejected.
    ///
    /// # Returns
    /// - `Ok(Composition)` - Well-formed composition
    /// - `Err(ValidationError::MissingField)` - `tags` or `ingredients` is absent
    /// - `Err(ValidationError::DuplicateIngredient)` - An ingredient is listed more than once
    /// - `Err(ValidationError::NonPositiveAmount)` - An amount is below 1
    pub fn from_payload(
        tags: Option<Vec<i32>>,
        ingredients: Option<Vec<IngredientAmountDto>>,
    ) -> Result<Self, ValidationError> {
        let tags = tags.ok_or(ValidationError::MissingField("tags"))?;
        let ingredients = ingredients.ok_or(ValidationError::MissingField("ingredients"))?;

        let mut seen_tags = HashSet::new();
        let tag_ids = tags
            .into_iter()
            .filter(|tag_id| seen_tags.insert(*tag_id))
            .collect();

        let mut seen_ingredients = HashSet::new();
        let mut entries = Vec::with_capacity(ingredients.len());
        for entry in ingredients {
            if !seen_ingredients.insert(entry.id) {
                return Err(ValidationError::DuplicateIngredient(entry.id));
            }
            if entry.amount < 1 {
                return Err(ValidationError::NonPositiveAmount {
                    ingredient_id: entry.id,
                    amount: entry.amount,
                });
            }
            entries.push((entry.id, entry.amount));
        }

        Ok(Self {
            tag_ids,
            ingredients: entries,
        })
    }

    fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|(id, _)| *id).collect()
    }
}

/// Persists compositions, meant to run on a transaction.
pub struct CompositionService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompositionService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replace the tags and ingredients of a recipe with `composition`.
    ///
    /// Existing associations are cleared and recreated, nothing is merged. When run on a
    /// transaction an error leaves the previous composition in place.
    ///
    /// # Returns
    /// - `Ok(())` - Composition stored
    /// - `Err(Error::ValidationError(ValidationError::UnknownTag))` - A tag does not exist
    /// - `Err(Error::ValidationError(ValidationError::UnknownIngredient))` - An ingredient does
    ///   not exist
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn apply(&self, recipe_id: i32, composition: &Composition) -> Result<(), Error> {
        self.ensure_references_exist(composition).await?;

        RecipeTagRepository::new(self.db)
            .replace_tags(recipe_id, &composition.tag_ids)
            .await?;
        IngredientInRecipeRepository::new(self.db)
            .replace_ingredients(recipe_id, &composition.ingredients)
            .await?;

        tracing::debug!(
            recipe_id,
            tags = composition.tag_ids.len(),
            ingredients = composition.ingredients.len(),
            "Replaced recipe composition"
        );

        Ok(())
    }

    async fn ensure_references_exist(&self, composition: &Composition) -> Result<(), Error> {
        let known_tags: HashSet<i32> = TagRepository::new(self.db)
            .get_many(&composition.tag_ids)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();
        if let Some(unknown) = composition
            .tag_ids
            .iter()
            .find(|tag_id| !known_tags.contains(tag_id))
        {
            return Err(ValidationError::UnknownTag(*unknown).into());
        }

        let ingredient_ids = composition.ingredient_ids();
        let known_ingredients: HashSet<i32> = IngredientRepository::new(self.db)
            .get_many(&ingredient_ids)
            .await?
            .into_iter()
            .map(|ingredient| ingredient.id)
            .collect();
        if let Some(unknown) = ingredient_ids
            .iter()
            .find(|ingredient_id| !known_ingredients.contains(ingredient_id))
        {
            return Err(ValidationError::UnknownIngredient(*unknown).into());
        }

        Ok(())
    }
}
