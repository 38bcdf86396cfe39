//! Projection of domain values into display models.
//!
//! Projectors are pure: they read the value and the touched-field set and
//! produce a fresh display model. Every projector applies the same rule for
//! error decorations, see [`show_error`].

use std::hash::Hash;

use crate::model::{Model, TouchedFields};
use crate::validation::ValidationResult;

/// Maps a domain value to the display model pushed to a [`DisplaySink`](crate::DisplaySink).
pub trait Projector<T: Model> {
    type Display;

    fn project(&self, value: &T, touched: &TouchedFields<T::Field>) -> Self::Display;
}

/// Projects a value into a clone of itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Model> Projector<T> for Identity {
    type Display = T;

    fn project(&self, value: &T, _touched: &TouchedFields<T::Field>) -> T {
        value.clone()
    }
}

/// Whether an error decoration for `reason` belongs on `field`.
///
/// Errors stay hidden until the user has touched the field, so a fresh
/// "create" screen with an empty required name does not start out red.
pub fn show_error<F, R>(
    touched: &TouchedFields<F>,
    field: F,
    result: &ValidationResult<R>,
    reason: &R,
) -> bool
where
    F: Eq + Hash,
    R: PartialEq,
{
    touched.contains(&field) && result.contains(reason)
}
