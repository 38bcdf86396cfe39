use serde::{Deserialize, Serialize};

use super::NameAware;
use crate::grouping::Tagged;
use crate::model::TouchedFields;
use crate::projection::{show_error, Projector};
use crate::validation::{suggest_name, NameLookup, ValidationResult, Validator};
use crate::{ListField, Model, Named};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Model)]
pub struct RecipeStep {
    #[model(skip)]
    pub id: String,
    pub text: String,
}

impl RecipeStep {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        RecipeStep {
            id: id.into(),
            text: text.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Model, Named)]
pub struct Recipe {
    #[model(skip)]
    pub id: String,
    pub name: String,
    /// Ordered; steps are never alphabetized.
    pub steps: Vec<RecipeStep>,
    pub ingredient_ids: Vec<String>,
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Recipe {
            id: id.into(),
            name: name.into(),
            steps: Vec::new(),
            ingredient_ids: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps
            .into_iter()
            .enumerate()
            .map(|(i, text)| RecipeStep::new(format!("{}-step-{}", self.id, i + 1), text))
            .collect();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredient_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Tagged for Recipe {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeReason {
    EmptyName,
    NameTaken,
    EmptyStep,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeValidator {
    names: NameLookup,
}

impl RecipeValidator {
    pub fn new(names: NameLookup) -> Self {
        Self { names }
    }
}

impl NameAware for RecipeValidator {
    fn set_names(&mut self, names: NameLookup) {
        self.names = names;
    }
}

impl Validator<Recipe> for RecipeValidator {
    type Reason = RecipeReason;

    fn validate(&self, recipe: &Recipe) -> ValidationResult<RecipeReason> {
        let mut reasons = Vec::new();
        let mut suggestion = None;

        let name = recipe.name.trim();
        if name.is_empty() {
            reasons.push(RecipeReason::EmptyName);
        } else if !self.names.is_available(name, &recipe.id) {
            reasons.push(RecipeReason::NameTaken);
            suggestion = Some(suggest_name(name, &self.names, &recipe.id));
        }
        if recipe.steps.iter().any(RecipeStep::is_blank) {
            reasons.push(RecipeReason::EmptyStep);
        }

        ValidationResult::from_reasons(reasons, suggestion)
    }
}

/// Validator for a recipe's step list edited on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepsValidator;

impl Validator<Vec<RecipeStep>> for StepsValidator {
    type Reason = RecipeReason;

    fn validate(&self, steps: &Vec<RecipeStep>) -> ValidationResult<RecipeReason> {
        if steps.iter().any(RecipeStep::is_blank) {
            ValidationResult::from_reasons(vec![RecipeReason::EmptyStep], None)
        } else {
            ValidationResult::Valid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDisplay {
    pub title: String,
    pub name: String,
    pub name_error: Option<RecipeReason>,
    pub name_suggestion: Option<String>,
    pub steps: Vec<String>,
    /// Positions of blank steps, reported once the steps were touched.
    pub blank_steps: Vec<usize>,
    pub ingredient_count: usize,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeProjector {
    validator: RecipeValidator,
}

impl RecipeProjector {
    pub fn new(names: NameLookup) -> Self {
        Self {
            validator: RecipeValidator::new(names),
        }
    }
}

impl NameAware for RecipeProjector {
    fn set_names(&mut self, names: NameLookup) {
        self.validator.set_names(names);
    }
}

impl Projector<Recipe> for RecipeProjector {
    type Display = RecipeDisplay;

    fn project(&self, recipe: &Recipe, touched: &TouchedFields<RecipeField>) -> RecipeDisplay {
        let result = self.validator.validate(recipe);
        let name_error = [RecipeReason::EmptyName, RecipeReason::NameTaken]
            .into_iter()
            .find(|reason| show_error(touched, RecipeField::Name, &result, reason));
        let name_suggestion = match name_error {
            Some(RecipeReason::NameTaken) => result.suggestion().map(str::to_string),
            _ => None,
        };
        let blank_steps =
            if show_error(touched, RecipeField::Steps, &result, &RecipeReason::EmptyStep) {
                blank_positions(&recipe.steps)
            } else {
                Vec::new()
            };

        RecipeDisplay {
            title: if recipe.name.trim().is_empty() {
                "New Recipe".to_string()
            } else {
                recipe.name.clone()
            },
            name: recipe.name.clone(),
            name_error,
            name_suggestion,
            steps: recipe.steps.iter().map(|step| step.text.clone()).collect(),
            blank_steps,
            ingredient_count: recipe.ingredient_ids.len(),
            tags: recipe.tags.clone(),
        }
    }
}

/// Step list projection: the step texts, numbered, with blank ones flagged
/// once the list was touched.
impl Projector<Vec<RecipeStep>> for RecipeProjector {
    type Display = Vec<(usize, String, bool)>;

    fn project(
        &self,
        steps: &Vec<RecipeStep>,
        touched: &TouchedFields<ListField>,
    ) -> Self::Display {
        let flag = touched.contains(&ListField::Items);
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| (i + 1, step.text.clone(), flag && step.is_blank()))
            .collect()
    }
}

fn blank_positions(steps: &[RecipeStep]) -> Vec<usize> {
    steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.is_blank())
        .map(|(i, _)| i)
        .collect()
}
