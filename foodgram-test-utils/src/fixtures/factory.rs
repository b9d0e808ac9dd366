//! Factories for request payloads used by controller tests.

use serde_json::{json, Value};

use crate::constant::TEST_IMAGE_DATA_URI;

/// Build a recipe creation payload with the given tag IDs and `(ingredient_id, amount)` pairs
pub fn recipe_payload(tags: &[i32], ingredients: &[(i32, i32)]) -> Value {
    let ingredients: Vec<Value> = ingredients
        .iter()
        .map(|(id, amount)| json!({ "id": id, "amount": amount }))
        .collect();

    json!({
        "tags": tags,
        "ingredients": ingredients,
        "image": TEST_IMAGE_DATA_URI,
        "name": "Pancakes",
        "text": "Mix everything and fry.",
        "cooking_time": 15,
    })
}

/// Build a registration payload for a user with the given username
pub fn register_payload(username: &str, password: &str) -> Value {
    json!({
        "email": format!("{}@example.com", username),
        "username": username,
        "first_name": username,
        "last_name": "Tester",
        "password": password,
    })
}
