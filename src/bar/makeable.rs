use std::collections::HashSet;

use super::{Ingredient, Recipe};
use crate::grouping::{group_by_name, GroupedCollection};

/// Ids of the ingredients `recipe` needs that are missing or out of stock.
pub fn missing_ingredients<'a>(recipe: &'a Recipe, ingredients: &[Ingredient]) -> Vec<&'a str> {
    let stocked = stocked_ids(ingredients);
    recipe
        .ingredient_ids
        .iter()
        .filter(|id| !stocked.contains(id.as_str()))
        .map(String::as_str)
        .collect()
}

/// Recipes whose every ingredient is in stock, grouped by name.
pub fn makeable_recipes<'a>(
    recipes: &'a [Recipe],
    ingredients: &[Ingredient],
) -> GroupedCollection<&'a Recipe> {
    let stocked = stocked_ids(ingredients);
    group_by_name(recipes.iter().filter(|recipe| {
        recipe
            .ingredient_ids
            .iter()
            .all(|id| stocked.contains(id.as_str()))
    }))
}

fn stocked_ids(ingredients: &[Ingredient]) -> HashSet<&str> {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.in_stock)
        .map(|ingredient| ingredient.id.as_str())
        .collect()
}
