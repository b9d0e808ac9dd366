use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::db::IngredientModel;

pub struct IngredientRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IngredientRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<IngredientModel, DbErr> {
        entity::prelude::Ingredient::insert(entity::ingredient::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            measurement_unit: ActiveValue::Set(measurement_unit.to_string()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, ingredient_id: i32) -> Result<Option<IngredientModel>, DbErr> {
        entity::prelude::Ingredient::find_by_id(ingredient_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, ingredient_ids: &[i32]) -> Result<Vec<IngredientModel>, DbErr> {
        if ingredient_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Ingredient::find()
            .filter(entity::ingredient::Column::Id.is_in(ingredient_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Case-insensitive prefix search ordered by name, an empty prefix matches every ingredient
    pub async fn search(&self, prefix: &str) -> Result<Vec<IngredientModel>, DbErr> {
        let mut query = entity::prelude::Ingredient::find();

        if !prefix.is_empty() {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(entity::ingredient::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        query
            .order_by_asc(entity::ingredient::Column::Name)
            .order_by_asc(entity::ingredient::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn exists_by_name(&self, name: &str) -> Result<bool, DbErr> {
        let ingredient = entity::prelude::Ingredient::find()
            .filter(entity::ingredient::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(ingredient.is_some())
    }
}

/// Escape LIKE wildcards so user input only ever matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
