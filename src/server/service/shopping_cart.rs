//! Shopping list aggregation.
//!
//! The shopping list is the union of the ingredients of every recipe in a user's cart, with
//! amounts summed per `(name, measurement unit)` pair.

use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::recipe::{
        ingredient_in_recipe::IngredientInRecipeRepository, shopping_cart::ShoppingCartRepository,
    },
    error::{cart::CartError, Error},
    model::shopping_list::ShoppingListItem,
    util::csv::write_record,
};

pub const SHOPPING_LIST_FILENAME: &str = "shopping_cart.csv";

const CSV_HEADER: [&str; 3] = ["ingredient", "total_amount", "unit"];

pub struct ShoppingCartService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShoppingCartService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Aggregates the ingredients of every recipe in the user's shopping cart.
    ///
    /// # Returns
    /// - `Ok(Vec<ShoppingListItem>)` - Items ordered by name then unit
    /// - `Err(Error::CartError(CartError::Empty))` - The cart holds no recipe
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn shopping_list(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, Error> {
        if ShoppingCartRepository::new(self.db)
            .count_for_user(user_id)
            .await?
            == 0
        {
            return Err(CartError::Empty.into());
        }

        let rows = IngredientInRecipeRepository::new(self.db)
            .shopping_cart_amounts(user_id)
            .await?;

        Ok(aggregate(rows))
    }

    /// Renders the user's shopping list as CSV
    pub async fn shopping_list_csv(&self, user_id: i32) -> Result<String, Error> {
        let items = self.shopping_list(user_id).await?;

        tracing::debug!(user_id, items = items.len(), "Rendering shopping list");

        Ok(render_csv(&items))
    }
}

/// Sum `(name, measurement_unit, amount)` rows per name and unit.
///
/// Ingredients sharing a name but measured in different units stay separate lines. Output is
/// ordered by name, then unit.
pub fn aggregate<I>(rows: I) -> Vec<ShoppingListItem>
where
    I: IntoIterator<Item = (String, String, i32)>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for (name, measurement_unit, amount) in rows {
        *totals.entry((name, measurement_unit)).or_insert(0) += i64::from(amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
            name,
            total_amount,
            measurement_unit,
        })
        .collect()
}

/// Render items as CSV with an `ingredient,total_amount,unit` header
pub fn render_csv(items: &[ShoppingListItem]) -> String {
    let mut out = String::new();
    write_record(&mut out, &CSV_HEADER);

    for item in items {
        let total_amount = item.total_amount.to_string();
        write_record(
            &mut out,
            &[
                item.name.as_str(),
                total_amount.as_str(),
                item.measurement_unit.as_str(),
            ],
        );
    }

    out
}
