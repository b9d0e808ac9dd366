//! Relation toggle engine.
//!
//! Favorites, shopping cart entries and subscriptions are all membership rows keyed by a pair
//! of IDs. Adding an existing pair or removing a missing one is rejected with a
//! [`RelationError`], the unique constraint on each table backs the existence check against
//! concurrent requests.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{
        recipe::{
            favorite::FavoriteRepository, shopping_cart::ShoppingCartRepository, RecipeRepository,
        },
        user::{subscription::SubscriptionRepository, UserRepository},
    },
    error::{relation::RelationError, resource::ResourceError, Error},
    model::{
        db::{RecipeModel, UserModel},
        relation::{RelationKind, RelationTarget, RelationTargetDto, Toggle, ToggleOutcome},
    },
    service::{recipe::minify, subscription::authors_with_recipes},
};

/// The existing row a toggle points at, loaded before the transaction starts
enum LoadedTarget {
    Recipe(RecipeModel),
    Author {
        author: UserModel,
        recipes_limit: Option<u64>,
    },
}

pub struct RelationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RelationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds or removes a relation between `actor_id` and `target`.
    ///
    /// Checks run in a fixed order: self-subscription, target existence, then the membership
    /// of the pair inside a transaction.
    ///
    /// # Returns
    /// - `Ok(ToggleOutcome::Added)` - Relation created, carries the target representation
    /// - `Ok(ToggleOutcome::Removed)` - Relation deleted
    /// - `Err(Error::RelationError(RelationError::InvalidOperation))` - Self-subscription
    /// - `Err(Error::ResourceError(ResourceError::NotFound))` - Target recipe or user missing
    /// - `Err(Error::RelationError(RelationError::AlreadyExists))` - Adding an existing pair
    /// - `Err(Error::RelationError(RelationError::NotFound))` - Removing a missing pair
    pub async fn toggle(
        &self,
        actor_id: i32,
        target: RelationTarget,
        toggle: Toggle,
    ) -> Result<ToggleOutcome, Error> {
        if let RelationTarget::Subscription { author_id, .. } = target {
            if author_id == actor_id {
                return Err(
                    RelationError::InvalidOperation("You cannot subscribe to yourself").into(),
                );
            }
        }

        let loaded = self.load_target(target).await?;

        let txn = self.db.begin().await?;
        match toggle {
            Toggle::Add => add(&txn, actor_id, target).await?,
            Toggle::Remove => remove(&txn, actor_id, target).await?,
        }
        txn.commit().await?;

        tracing::debug!(
            actor_id,
            relation = %target.kind(),
            ?toggle,
            "Relation toggled"
        );

        match toggle {
            Toggle::Remove => Ok(ToggleOutcome::Removed),
            Toggle::Add => {
                let dto = match loaded {
                    LoadedTarget::Recipe(recipe) => {
                        let mut minified = minify(self.db, vec![recipe]).await?;
                        let recipe = minified.pop().ok_or_else(|| {
                            Error::InternalError("Failed to minify toggled recipe".to_string())
                        })?;
                        RelationTargetDto::Recipe(recipe)
                    }
                    LoadedTarget::Author {
                        author,
                        recipes_limit,
                    } => {
                        let mut views =
                            authors_with_recipes(self.db, vec![author], recipes_limit).await?;
                        let author = views.pop().ok_or_else(|| {
                            Error::InternalError("Failed to build subscribed author".to_string())
                        })?;
                        RelationTargetDto::Author(author)
                    }
                };

                Ok(ToggleOutcome::Added(dto))
            }
        }
    }

    async fn load_target(&self, target: RelationTarget) -> Result<LoadedTarget, Error> {
        match target {
            RelationTarget::Favorite { recipe_id } | RelationTarget::ShoppingCart { recipe_id } => {
                RecipeRepository::new(self.db)
                    .get(recipe_id)
                    .await?
                    .map(LoadedTarget::Recipe)
                    .ok_or_else(|| ResourceError::recipe_not_found(recipe_id).into())
            }
            RelationTarget::Subscription {
                author_id,
                recipes_limit,
            } => UserRepository::new(self.db)
                .get(author_id)
                .await?
                .map(|author| LoadedTarget::Author {
                    author,
                    recipes_limit,
                })
                .ok_or_else(|| ResourceError::user_not_found(author_id).into()),
        }
    }
}

async fn add(
    txn: &DatabaseTransaction,
    actor_id: i32,
    target: RelationTarget,
) -> Result<(), Error> {
    let kind = target.kind();
    if exists(txn, actor_id, target).await? {
        return Err(RelationError::AlreadyExists(kind).into());
    }

    let inserted = match target {
        RelationTarget::Favorite { recipe_id } => {
            FavoriteRepository::new(txn).create(actor_id, recipe_id).await
        }
        RelationTarget::ShoppingCart { recipe_id } => {
            ShoppingCartRepository::new(txn)
                .create(actor_id, recipe_id)
                .await
        }
        RelationTarget::Subscription { author_id, .. } => SubscriptionRepository::new(txn)
            .create(actor_id, author_id)
            .await
            .map(|_| ()),
    };

    inserted.map_err(|err| conflict_as_already_exists(err, kind))
}

async fn remove(
    txn: &DatabaseTransaction,
    actor_id: i32,
    target: RelationTarget,
) -> Result<(), Error> {
    let removed = match target {
        RelationTarget::Favorite { recipe_id } => {
            FavoriteRepository::new(txn).delete(actor_id, recipe_id).await?
        }
        RelationTarget::ShoppingCart { recipe_id } => {
            ShoppingCartRepository::new(txn)
                .delete(actor_id, recipe_id)
                .await?
        }
        RelationTarget::Subscription { author_id, .. } => {
            SubscriptionRepository::new(txn)
                .delete(actor_id, author_id)
                .await?
        }
    };

    if !removed {
        return Err(RelationError::NotFound(target.kind()).into());
    }

    Ok(())
}

async fn exists(
    txn: &DatabaseTransaction,
    actor_id: i32,
    target: RelationTarget,
) -> Result<bool, DbErr> {
    match target {
        RelationTarget::Favorite { recipe_id } => {
            FavoriteRepository::new(txn).exists(actor_id, recipe_id).await
        }
        RelationTarget::ShoppingCart { recipe_id } => {
            ShoppingCartRepository::new(txn)
                .exists(actor_id, recipe_id)
                .await
        }
        RelationTarget::Subscription { author_id, .. } => {
            SubscriptionRepository::new(txn)
                .exists(actor_id, author_id)
                .await
        }
    }
}

/// A unique violation means a concurrent request inserted the same pair first
fn conflict_as_already_exists(err: DbErr, kind: RelationKind) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RelationError::AlreadyExists(kind).into(),
        _ => err.into(),
    }
}
