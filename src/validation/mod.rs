//! Save gating: structural checks plus cross-entity name uniqueness.

mod names;

pub use names::{suggest_name, NameLookup};

/// Outcome of validating a value.
///
/// Invalidity is not exceptional: it is a steady state the display reflects
/// while the user keeps editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult<R> {
    Valid,
    Invalid {
        reasons: Vec<R>,
        suggestion: Option<String>,
    },
}

impl<R> ValidationResult<R> {
    /// Builds a result from collected reasons. No reasons means valid.
    pub fn from_reasons(reasons: Vec<R>, suggestion: Option<String>) -> Self {
        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid {
                reasons,
                suggestion,
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reasons(&self) -> &[R] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid { reasons, .. } => reasons,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { suggestion, .. } => suggestion.as_deref(),
        }
    }

    pub fn contains(&self, reason: &R) -> bool
    where
        R: PartialEq,
    {
        self.reasons().contains(reason)
    }
}

/// Decides whether a value may be committed.
pub trait Validator<T: ?Sized> {
    type Reason;

    fn validate(&self, value: &T) -> ValidationResult<Self::Reason>;

    fn is_valid(&self, value: &T) -> bool {
        self.validate(value).is_valid()
    }
}

impl<T: ?Sized, F> Validator<T> for F
where
    F: Fn(&T) -> bool,
{
    type Reason = ();

    fn validate(&self, value: &T) -> ValidationResult<()> {
        if self(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid {
                reasons: vec![()],
                suggestion: None,
            }
        }
    }
}

/// Validator that accepts every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysValid;

impl<T: ?Sized> Validator<T> for AlwaysValid {
    type Reason = std::convert::Infallible;

    fn validate(&self, _value: &T) -> ValidationResult<Self::Reason> {
        ValidationResult::Valid
    }
}
