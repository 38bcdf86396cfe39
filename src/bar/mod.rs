//! The home bar: ingredients on the shelf and the recipes that use them.

mod ingredient;
mod makeable;
mod recipe;

use crate::validation::NameLookup;

pub use ingredient::{
    Ingredient, IngredientField, IngredientListDisplay, IngredientListProjector, IngredientProjector,
    IngredientReason, IngredientRow, IngredientDisplay, IngredientValidator,
};
pub use makeable::{makeable_recipes, missing_ingredients};
pub use recipe::{
    Recipe, RecipeDisplay, RecipeField, RecipeProjector, RecipeReason, RecipeStep, RecipeStepField,
    RecipeValidator, StepsValidator,
};

/// Validators and projectors that depend on the names of sibling entities.
pub trait NameAware {
    fn set_names(&mut self, names: NameLookup);
}
