//! Declarative test builder.
//!
//! The builder queues table creation and fixture inserts, all of which are executed during the
//! final `build()` call.

use chrono::Utc;
use sea_orm::{sea_query::TableCreateStatement, ActiveValue, EntityTrait, Schema};

use crate::{constant::TEST_PASSWORD_HASH, error::TestError, TestSetup};

/// Builder for declarative test initialization.
///
/// Methods can be chained together and finalized with `build()` to create a complete
/// [`TestSetup`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_recipe_tables: bool,
    users: Vec<String>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_recipe_tables: false,
            users: Vec::new(),
        }
    }

    /// Add every table used by users, recipes and relations.
    pub fn with_recipe_tables(mut self) -> Self {
        self.include_recipe_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use foodgram_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), foodgram_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Tag)
    ///     .with_table(Ingredient)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the provided username once tables are created.
    ///
    /// Users are inserted in the order they were queued, so the first queued user has ID 1.
    pub fn with_user(mut self, username: &str) -> Self {
        self.users.push(username.to_string());
        self
    }

    /// Execute all queued operations and return the resulting [`TestSetup`].
    pub async fn build(self) -> Result<TestSetup, TestError> {
        let setup = TestSetup::new().await?;

        let mut tables = Vec::new();
        if self.include_recipe_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            tables.push(schema.create_table_from_entity(entity::prelude::FoodgramUser));
            tables.push(schema.create_table_from_entity(entity::prelude::Tag));
            tables.push(schema.create_table_from_entity(entity::prelude::Ingredient));
            tables.push(schema.create_table_from_entity(entity::prelude::Recipe));
            tables.push(schema.create_table_from_entity(entity::prelude::RecipeImage));
            tables.push(schema.create_table_from_entity(entity::prelude::RecipeTag));
            tables.push(schema.create_table_from_entity(entity::prelude::IngredientInRecipe));
            tables.push(schema.create_table_from_entity(entity::prelude::Favorite));
            tables.push(schema.create_table_from_entity(entity::prelude::ShoppingCart));
            tables.push(schema.create_table_from_entity(entity::prelude::Subscription));
        }
        tables.extend(self.tables);
        setup.with_tables(tables).await?;

        for username in self.users {
            entity::prelude::FoodgramUser::insert(entity::foodgram_user::ActiveModel {
                email: ActiveValue::Set(format!("{}@example.com", username)),
                username: ActiveValue::Set(username.clone()),
                first_name: ActiveValue::Set(username.clone()),
                last_name: ActiveValue::Set("Tester".to_string()),
                password_hash: ActiveValue::Set(TEST_PASSWORD_HASH.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec(&setup.state.db)
            .await?;
        }

        Ok(setup)
    }
}
