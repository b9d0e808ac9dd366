use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD_HASH, error::TestError, TestSetup};

impl TestSetup {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user whose email is derived from the username
    pub async fn insert_user(
        &self,
        username: &str,
    ) -> Result<entity::foodgram_user::Model, TestError> {
        Ok(
            entity::prelude::FoodgramUser::insert(entity::foodgram_user::ActiveModel {
                email: ActiveValue::Set(format!("{}@example.com", username)),
                username: ActiveValue::Set(username.to_string()),
                first_name: ActiveValue::Set(username.to_string()),
                last_name: ActiveValue::Set("Tester".to_string()),
                password_hash: ActiveValue::Set(TEST_PASSWORD_HASH.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }

    pub async fn insert_subscription(
        &self,
        user_id: i32,
        following_id: i32,
    ) -> Result<entity::subscription::Model, TestError> {
        Ok(
            entity::prelude::Subscription::insert(entity::subscription::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                following_id: ActiveValue::Set(following_id),
            })
            .exec_with_returning(&self.setup.state.db)
            .await?,
        )
    }
}
