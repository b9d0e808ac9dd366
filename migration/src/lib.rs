pub use sea_orm_migration::prelude::*;

mod m20250901_000001_foodgram_user;
mod m20250901_000002_tag;
mod m20250901_000003_ingredient;
mod m20250901_000004_recipe;
mod m20250901_000005_recipe_image;
mod m20250901_000006_recipe_tag;
mod m20250901_000007_ingredient_in_recipe;
mod m20250901_000008_favorite;
mod m20250901_000009_shopping_cart;
mod m20250901_000010_subscription;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_foodgram_user::Migration),
            Box::new(m20250901_000002_tag::Migration),
            Box::new(m20250901_000003_ingredient::Migration),
            Box::new(m20250901_000004_recipe::Migration),
            Box::new(m20250901_000005_recipe_image::Migration),
            Box::new(m20250901_000006_recipe_tag::Migration),
            Box::new(m20250901_000007_ingredient_in_recipe::Migration),
            Box::new(m20250901_000008_favorite::Migration),
            Box::new(m20250901_000009_shopping_cart::Migration),
            Box::new(m20250901_000010_subscription::Migration),
        ]
    }
}
