//! Canonical recipe composite and the views built from it.

use crate::{
    model::{
        recipe::{RecipeIngredientDto, RecipeMinifiedDto, RecipeReadDto, TagDto},
        user::UserDto,
    },
    server::model::db::{
        IngredientInRecipeModel, IngredientModel, RecipeModel, TagModel, UserModel,
    },
};

/// Link under which a stored recipe image is served
pub fn image_url(recipe_id: i32) -> String {
    format!("/api/recipes/{}/image", recipe_id)
}

/// A recipe together with everything needed to render it.
///
/// Both the read view ([`RecipeReadDto`]) and the minified view ([`RecipeMinifiedDto`]) are
/// built from this type.
#[derive(Clone, Debug)]
pub struct RecipeComposite {
    pub recipe: RecipeModel,
    pub author: UserModel,
    /// Tags in their stored position order
    pub tags: Vec<TagModel>,
    pub ingredients: Vec<(IngredientInRecipeModel, IngredientModel)>,
    pub has_image: bool,
}

/// Per-viewer flags attached to a recipe when rendering it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewerFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub is_subscribed_to_author: bool,
}

impl RecipeComposite {
    pub fn into_read_dto(self, flags: ViewerFlags) -> RecipeReadDto {
        let image = self.has_image.then(|| image_url(self.recipe.id));

        RecipeReadDto {
            id: self.recipe.id,
            tags: self.tags.into_iter().map(tag_dto).collect(),
            author: user_dto(self.author, flags.is_subscribed_to_author),
            ingredients: self
                .ingredients
                .into_iter()
                .map(|(entry, ingredient)| RecipeIngredientDto {
                    id: ingredient.id,
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: entry.amount,
                })
                .collect(),
            is_favorited: flags.is_favorited,
            is_in_shopping_cart: flags.is_in_shopping_cart,
            name: self.recipe.name,
            image,
            text: self.recipe.text,
            cooking_time: self.recipe.cooking_time,
        }
    }
}

pub fn minified_dto(recipe: RecipeModel, has_image: bool) -> RecipeMinifiedDto {
    RecipeMinifiedDto {
        image: has_image.then(|| image_url(recipe.id)),
        id: recipe.id,
        name: recipe.name,
        cooking_time: recipe.cooking_time,
    }
}

pub fn tag_dto(tag: TagModel) -> TagDto {
    TagDto {
        id: tag.id,
        name: tag.name,
        color: tag.color,
        slug: tag.slug,
    }
}

pub fn user_dto(user: UserModel, is_subscribed: bool) -> UserDto {
    UserDto {
        email: user.email,
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        is_subscribed,
    }
}

/// Validated scalar recipe fields written on create and update
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Restricts a recipe listing to recipes a user did or did not mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipFilter {
    /// Only recipes the user marked
    Only(i32),
    /// Only recipes the user did not mark
    Excluding(i32),
    /// No recipe matches
    Nothing,
}

impl MembershipFilter {
    /// Interpret an `is_favorited`/`is_in_shopping_cart` query value.
    ///
    /// `1` selects marked recipes and any other value selects unmarked ones. Anonymous viewers
    /// have no marks, so `1` matches nothing and any other value applies no filter at all.
    pub fn from_param(value: &str, viewer_id: Option<i32>) -> Option<Self> {
        match (value == "1", viewer_id) {
            (true, Some(user_id)) => Some(Self::Only(user_id)),
            (false, Some(user_id)) => Some(Self::Excluding(user_id)),
            (true, None) => Some(Self::Nothing),
            (false, None) => None,
        }
    }
}

/// Filters applied to the recipe listing, all of them are AND-combined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<i32>,
    /// Recipes carrying any of these tags, `Some(vec![])` matches nothing
    pub tag_ids: Option<Vec<i32>>,
    pub favorited: Option<MembershipFilter>,
    pub in_shopping_cart: Option<MembershipFilter>,
}

impl RecipeFilter {
    pub fn matches_nothing(&self) -> bool {
        self.favorited == Some(MembershipFilter::Nothing)
            || self.in_shopping_cart == Some(MembershipFilter::Nothing)
            || self.tag_ids.as_ref().is_some_and(|ids| ids.is_empty())
    }
}
