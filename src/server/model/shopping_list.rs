/// One line of the aggregated shopping list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub total_amount: i64,
    pub measurement_unit: String,
}
