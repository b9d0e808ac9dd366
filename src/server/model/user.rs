use crate::{
    model::{
        recipe::RecipeMinifiedDto,
        user::{RegisteredUserDto, SubscriptionDto},
    },
    server::model::db::UserModel,
};

/// Validated registration input with the password already hashed
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

pub fn registered_user_dto(user: UserModel) -> RegisteredUserDto {
    RegisteredUserDto {
        email: user.email,
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}

pub fn subscription_dto(
    author: UserModel,
    recipes: Vec<RecipeMinifiedDto>,
    recipes_count: u64,
) -> SubscriptionDto {
    SubscriptionDto {
        email: author.email,
        id: author.id,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed: true,
        recipes,
        recipes_count,
    }
}
