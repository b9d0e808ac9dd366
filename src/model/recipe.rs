use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::user::UserDto;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    /// Hex color in `#RRGGBB` form, always uppercase
    pub color: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientDto {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient of a recipe expanded with the ingredient's name and unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientDto {
    /// ID of the ingredient, not of the association row
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Read representation of a recipe
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeReadDto {
    pub id: i32,
    pub tags: Vec<TagDto>,
    pub author: UserDto,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Link to the recipe image, `None` when no image has been stored
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i32,
}

/// Lightweight representation of a recipe returned by relation toggles and subscriptions
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeMinifiedDto {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientAmountDto {
    /// ID of the ingredient
    pub id: i32,
    pub amount: i32,
}

/// Write representation of a recipe, used for both creation and partial updates
///
/// Every field is optional at the parsing level. Creation requires all of them, updates
/// require `tags` and `ingredients` and treat the remaining fields as optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RecipeWriteDto {
    pub ingredients: Option<Vec<IngredientAmountDto>>,
    pub tags: Option<Vec<i32>>,
    /// Image as a data URI, `data:image/<ext>;base64,<payload>`
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

/// Query parameters accepted by the recipe listing
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Only recipes of this author
    pub author: Option<i32>,
    /// Tag slug, repeat the parameter to match recipes carrying any of several tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// `1` for favorited recipes only, any other value for the rest
    pub is_favorited: Option<String>,
    /// `1` for recipes in the shopping cart only, any other value for the rest
    pub is_in_shopping_cart: Option<String>,
}

/// Multipart form replacing the image of a recipe
#[derive(ToSchema)]
pub struct RecipeImageForm {
    /// Image file, its part content type must be a supported image type
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
