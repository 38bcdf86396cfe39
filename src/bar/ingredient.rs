use serde::{Deserialize, Serialize};

use super::NameAware;
use crate::config::GroupingOptions;
use crate::grouping::{filter_by_tags, group_by_name_with, TagMatch, Tagged};
use crate::model::TouchedFields;
use crate::projection::{show_error, Projector};
use crate::validation::{suggest_name, NameLookup, ValidationResult, Validator};
use crate::{Model, Named};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model, Named)]
pub struct Ingredient {
    #[model(skip)]
    pub id: String,
    pub name: String,
    /// Amount on hand, in the unit the user tracks it in.
    pub amount: f64,
    pub in_stock: bool,
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Ingredient {
            id: id.into(),
            name: name.into(),
            amount: 0.0,
            in_stock: true,
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
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

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

impl Tagged for Ingredient {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientReason {
    EmptyName,
    NameTaken,
    NegativeAmount,
}

/// Structural checks plus name uniqueness against the other ingredients.
#[derive(Debug, Clone, Default)]
pub struct IngredientValidator {
    names: NameLookup,
}

impl IngredientValidator {
    pub fn new(names: NameLookup) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &NameLookup {
        &self.names
    }
}

impl NameAware for IngredientValidator {
    fn set_names(&mut self, names: NameLookup) {
        self.names = names;
    }
}

impl Validator<Ingredient> for IngredientValidator {
    type Reason = IngredientReason;

    fn validate(&self, ingredient: &Ingredient) -> ValidationResult<IngredientReason> {
        let mut reasons = Vec::new();
        let mut suggestion = None;

        let name = ingredient.name.trim();
        if name.is_empty() {
            reasons.push(IngredientReason::EmptyName);
        } else if !self.names.is_available(name, &ingredient.id) {
            reasons.push(IngredientReason::NameTaken);
            suggestion = Some(suggest_name(name, &self.names, &ingredient.id));
        }
        if ingredient.amount.is_nan() || ingredient.amount < 0.0 {
            reasons.push(IngredientReason::NegativeAmount);
        }

        ValidationResult::from_reasons(reasons, suggestion)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientDisplay {
    pub title: String,
    pub name: String,
    pub name_error: Option<IngredientReason>,
    pub name_suggestion: Option<String>,
    pub amount: String,
    pub amount_error: bool,
    pub in_stock: bool,
    pub tags: Vec<String>,
    pub notes: String,
}

/// Detail screen projection of a single ingredient.
#[derive(Debug, Clone, Default)]
pub struct IngredientProjector {
    validator: IngredientValidator,
}

impl IngredientProjector {
    pub fn new(names: NameLookup) -> Self {
        Self {
            validator: IngredientValidator::new(names),
        }
    }
}

impl NameAware for IngredientProjector {
    fn set_names(&mut self, names: NameLookup) {
        self.validator.set_names(names);
    }
}

impl Projector<Ingredient> for IngredientProjector {
    type Display = IngredientDisplay;

    fn project(
        &self,
        ingredient: &Ingredient,
        touched: &TouchedFields<IngredientField>,
    ) -> IngredientDisplay {
        let result = self.validator.validate(ingredient);
        let name_error = [IngredientReason::EmptyName, IngredientReason::NameTaken]
            .into_iter()
            .find(|reason| show_error(touched, IngredientField::Name, &result, reason));
        let name_suggestion = match name_error {
            Some(IngredientReason::NameTaken) => result.suggestion().map(str::to_string),
            _ => None,
        };

        let title = if ingredient.name.trim().is_empty() {
            "New Ingredient".to_string()
        } else {
            ingredient.name.clone()
        };

        IngredientDisplay {
            title,
            name: ingredient.name.clone(),
            name_error,
            name_suggestion,
            amount: format_amount(ingredient.amount),
            amount_error: show_error(
                touched,
                IngredientField::Amount,
                &result,
                &IngredientReason::NegativeAmount,
            ),
            in_stock: ingredient.in_stock,
            tags: ingredient.tags.clone(),
            notes: ingredient.notes.clone(),
        }
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientListDisplay {
    pub sections: Vec<(String, Vec<IngredientRow>)>,
}

impl IngredientListDisplay {
    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|(title, _)| title.as_str()).collect()
    }
}

/// List screen projection: optional tag filter, then alphabetic sections.
#[derive(Debug, Clone, Default)]
pub struct IngredientListProjector {
    grouping: GroupingOptions,
    tags: Vec<String>,
    tag_match: TagMatch,
}

impl IngredientListProjector {
    pub fn new(grouping: GroupingOptions) -> Self {
        Self {
            grouping,
            ..Self::default()
        }
    }

    /// Only show ingredients matching `tags`. Empty shows everything.
    pub fn set_filter(&mut self, tags: Vec<String>, tag_match: TagMatch) {
        self.tags = tags;
        self.tag_match = tag_match;
    }
}

impl Projector<Vec<Ingredient>> for IngredientListProjector {
    type Display = IngredientListDisplay;

    fn project(
        &self,
        ingredients: &Vec<Ingredient>,
        _touched: &TouchedFields<crate::ListField>,
    ) -> IngredientListDisplay {
        let visible = filter_by_tags(ingredients, &self.tags, self.tag_match);
        let sections = group_by_name_with(visible, &self.grouping)
            .into_sections()
            .into_iter()
            .map(|section| {
                let rows = section
                    .items()
                    .iter()
                    .map(|ingredient| IngredientRow {
                        id: ingredient.id().to_string(),
                        name: ingredient.name().to_string(),
                        in_stock: ingredient.in_stock,
                    })
                    .collect();
                (section.title().to_string(), rows)
            })
            .collect();
        IngredientListDisplay { sections }
    }
}
