use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::recipe::RecipeMinifiedDto;

/// Public profile of a user as seen by the requesting user
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting user is subscribed to this user
    pub is_subscribed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserDto {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Returned after a successful registration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUserDto {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SetPasswordDto {
    pub new_password: String,
    pub current_password: String,
}

/// An author the requesting user is subscribed to, along with their recipes
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDto {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    /// The author's newest recipes, limited by the `recipes_limit` query parameter
    pub recipes: Vec<RecipeMinifiedDto>,
    /// Total number of recipes published by the author
    pub recipes_count: u64,
}

/// Parameters controlling how many recipes are embedded in a subscription
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipesLimitQuery {
    /// Maximum number of the author's recipes to include
    pub recipes_limit: Option<u64>,
}

/// Parameters of the subscription listing
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Maximum number of recipes embedded per author
    pub recipes_limit: Option<u64>,
}
