pub mod subscription;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    db::UserModel,
    pagination::{Page, PageRequest},
    user::NewUser,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    pub async fn create(&self, user: NewUser) -> Result<UserModel, DbErr> {
        let user = entity::foodgram_user::ActiveModel {
            email: ActiveValue::Set(user.email),
            username: ActiveValue::Set(user.username),
            first_name: ActiveValue::Set(user.first_name),
            last_name: ActiveValue::Set(user.last_name),
            password_hash: ActiveValue::Set(user.password_hash),
            created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::FoodgramUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, user_ids: &[i32]) -> Result<Vec<UserModel>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::FoodgramUser::find()
            .filter(entity::foodgram_user::Column::Id.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Email comparison is case-insensitive, emails are stored lowercase
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::FoodgramUser::find()
            .filter(entity::foodgram_user::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::FoodgramUser::find()
            .filter(entity::foodgram_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Get a page of users ordered by ID
    pub async fn get_page(&self, page: PageRequest) -> Result<Page<UserModel>, DbErr> {
        let paginator = entity::prelude::FoodgramUser::find()
            .order_by_asc(entity::foodgram_user::Column::Id)
            .paginate(self.db, page.page_size);

        let count = paginator.num_items().await?;
        let items = paginator.fetch_page(page.index()).await?;

        Ok(Page {
            items,
            count,
            request: page,
        })
    }

    /// Replace the stored password hash, returns `None` if the user does not exist
    pub async fn update_password(
        &self,
        user_id: i32,
        password_hash: String,
    ) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.password_hash = ActiveValue::Set(password_hash);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
