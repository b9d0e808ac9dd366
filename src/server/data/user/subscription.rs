use sea_orm::{
    sea_query::Query, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    db::{SubscriptionModel, UserModel},
    pagination::{Page, PageRequest},
};

pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Subscribe `user_id` to `following_id`
    ///
    /// Fails with a unique constraint violation if the subscription already exists.
    pub async fn create(
        &self,
        user_id: i32,
        following_id: i32,
    ) -> Result<SubscriptionModel, DbErr> {
        entity::prelude::Subscription::insert(entity::subscription::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            following_id: ActiveValue::Set(following_id),
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Delete the subscription, returns whether a row was removed
    pub async fn delete(&self, user_id: i32, following_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Subscription::delete_many()
            .filter(entity::subscription::Column::UserId.eq(user_id))
            .filter(entity::subscription::Column::FollowingId.eq(following_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, user_id: i32, following_id: i32) -> Result<bool, DbErr> {
        let subscription =
            entity::prelude::Subscription::find_by_id((user_id, following_id))
                .one(self.db)
                .await?;

        Ok(subscription.is_some())
    }

    /// Of the provided author IDs, return those `user_id` is subscribed to
    pub async fn following_ids_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<Vec<i32>, DbErr> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Subscription::find()
            .select_only()
            .column(entity::subscription::Column::FollowingId)
            .filter(entity::subscription::Column::UserId.eq(user_id))
            .filter(entity::subscription::Column::FollowingId.is_in(author_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Get a page of the authors `user_id` follows, ordered by author ID
    pub async fn get_following_page(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<UserModel>, DbErr> {
        let following = Query::select()
            .column(entity::subscription::Column::FollowingId)
            .from(entity::prelude::Subscription)
            .and_where(entity::subscription::Column::UserId.eq(user_id))
            .to_owned();

        let paginator = entity::prelude::FoodgramUser::find()
            .filter(entity::foodgram_user::Column::Id.in_subquery(following))
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
}
