use sea_orm::DatabaseConnection;

use crate::{
    model::recipe::IngredientDto,
    server::{
        data::ingredient::IngredientRepository,
        error::{resource::ResourceError, Error},
        model::db::IngredientModel,
    },
};

pub struct IngredientService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IngredientService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ingredients whose name starts with `prefix`, ignoring ASCII case
    pub async fn search(&self, prefix: Option<&str>) -> Result<Vec<IngredientDto>, Error> {
        let prefix = prefix.map(str::trim).unwrap_or_default();
        let ingredients = IngredientRepository::new(self.db).search(prefix).await?;

        Ok(ingredients.into_iter().map(ingredient_dto).collect())
    }

    pub async fn get_ingredient(&self, ingredient_id: i32) -> Result<IngredientDto, Error> {
        let Some(ingredient) = IngredientRepository::new(self.db)
            .get(ingredient_id)
            .await?
        else {
            return Err(ResourceError::NotFound {
                resource: "Ingredient",
                id: ingredient_id,
            }
            .into());
        };

        Ok(ingredient_dto(ingredient))
    }
}

fn ingredient_dto(ingredient: IngredientModel) -> IngredientDto {
    IngredientDto {
        id: ingredient.id,
        name: ingredient.name,
        measurement_unit: ingredient.measurement_unit,
    }
}
