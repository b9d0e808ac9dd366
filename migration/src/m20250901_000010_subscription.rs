use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250901_000001_foodgram_user::FoodgramUser;

static IDX_SUBSCRIPTION_FOLLOWING_ID: &str = "idx_subscription_following_id";
static FK_SUBSCRIPTION_USER_ID: &str = "fk_subscription_user_id";
static FK_SUBSCRIPTION_FOLLOWING_ID: &str = "fk_subscription_following_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(integer(Subscription::UserId))
                    .col(integer(Subscription::FollowingId))
                    .primary_key(
                        Index::create()
                            .col(Subscription::UserId)
                            .col(Subscription::FollowingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_USER_ID)
                            .from(Subscription::Table, Subscription::UserId)
                            .to(FoodgramUser::Table, FoodgramUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_FOLLOWING_ID)
                            .from(Subscription::Table, Subscription::FollowingId)
                            .to(FoodgramUser::Table, FoodgramUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBSCRIPTION_FOLLOWING_ID)
                    .table(Subscription::Table)
                    .col(Subscription::FollowingId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SUBSCRIPTION_FOLLOWING_ID)
                    .table(Subscription::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subscription {
    Table,
    UserId,
    FollowingId,
}
