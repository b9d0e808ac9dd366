
use foodgram_test_utils::prelude::*;

use crate::{model::recipe::RecipeWriteDto, server::config::ApiConfig};

/// Build a complete write payload from the recipe payload factory
fn write_payload(tags: &[i32], ingredients: &[(i32, i32)]) -> Result<RecipeWriteDto, TestError> {
    Ok(serde_json::from_value(factory::recipe_payload(
        tags,
        ingredients,
    ))?)
}

fn config() -> ApiConfig {
    ApiConfig::default()
}
