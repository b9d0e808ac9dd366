use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::model::{recipe::RecipeMinifiedDto, user::SubscriptionDto};

/// The kinds of relation a user can toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
    Subscription,
}

impl RelationKind {
    pub fn already_exists_message(&self) -> &'static str {
        match self {
            Self::Favorite => "Recipe is already in favorites",
            Self::ShoppingCart => "Recipe is already in the shopping cart",
            Self::Subscription => "You are already subscribed to this author",
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            Self::Favorite => "Recipe is not in favorites",
            Self::ShoppingCart => "Recipe is not in the shopping cart",
            Self::Subscription => "You are not subscribed to this author",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorite => write!(f, "favorite"),
            Self::ShoppingCart => write!(f, "shopping cart"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// The target of a relation toggle, the acting user is passed separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationTarget {
    Favorite { recipe_id: i32 },
    ShoppingCart { recipe_id: i32 },
    Subscription {
        author_id: i32,
        /// Number of the author's recipes to include in the returned profile
        recipes_limit: Option<u64>,
    },
}

impl RelationTarget {
    pub fn kind(&self) -> RelationKind {
        match self {
            Self::Favorite { .. } => RelationKind::Favorite,
            Self::ShoppingCart { .. } => RelationKind::ShoppingCart,
            Self::Subscription { .. } => RelationKind::Subscription,
        }
    }
}

/// Whether a toggle adds or removes the relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Add,
    Remove,
}

/// The representation of a relation target returned after it was added.
#[derive(Clone, Debug)]
pub enum RelationTargetDto {
    Recipe(RecipeMinifiedDto),
    Author(SubscriptionDto),
}

/// Result of a successful toggle.
#[derive(Clone, Debug)]
pub enum ToggleOutcome {
    Added(RelationTargetDto),
    Removed,
}

impl IntoResponse for ToggleOutcome {
    /// 201 Created with the target representation on add, 204 No Content on removal
    fn into_response(self) -> Response {
        match self {
            Self::Added(RelationTargetDto::Recipe(recipe)) => {
                (StatusCode::CREATED, Json(recipe)).into_response()
            }
            Self::Added(RelationTargetDto::Author(author)) => {
                (StatusCode::CREATED, Json(author)).into_response()
            }
            Self::Removed => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
