pub mod prelude;

pub mod favorite;
pub mod foodgram_user;
pub mod ingredient;
pub mod ingredient_in_recipe;
pub mod recipe;
pub mod recipe_image;
pub mod recipe_tag;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
