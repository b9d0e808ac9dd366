//! Database model type aliases.
//!
//! Short names for the SeaORM models generated in the `entity` crate.

/// A registered user, identified by email on login.
pub type UserModel = entity::foodgram_user::Model;

pub type TagModel = entity::tag::Model;

/// Immutable ingredient reference data (name and measurement unit).
pub type IngredientModel = entity::ingredient::Model;

/// A recipe row without its tags, ingredients or image.
///
/// # Fields (from `entity::recipe::Model`)
/// - `id` - Primary key
/// - `author_id` - Foreign key to the user who published the recipe
/// - `name` - Recipe title
/// - `text` - Cooking instructions
/// - `cooking_time` - Cooking time in minutes, at least 1
/// - `created_at` - Publication timestamp, recipes are listed newest first
/// - `updated_at` - Timestamp of the last update
pub type RecipeModel = entity::recipe::Model;

pub type RecipeImageModel = entity::recipe_image::Model;

pub type RecipeTagModel = entity::recipe_tag::Model;

/// Association between a recipe and an ingredient carrying the required amount.
pub type IngredientInRecipeModel = entity::ingredient_in_recipe::Model;

pub type SubscriptionModel = entity::subscription::Model;
