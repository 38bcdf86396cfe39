//! Domain model traits shared by edit sessions, validators and grouping.

mod touched;

use std::fmt;
use std::hash::Hash;

pub use touched::TouchedFields;

/// A value that can be held under edit by an [`EditSession`](crate::EditSession).
///
/// `Field` names the individually editable parts of the value. It is usually
/// generated with `#[derive(Model)]`.
pub trait Model: Clone + PartialEq + fmt::Debug {
    type Field: Copy + Eq + Hash + fmt::Debug;
}

/// Something with a stable identity and a user-facing display name.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl<N: Named + ?Sized> Named for &N {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Field identity for list-valued models. A list has a single editable part:
/// its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListField {
    Items,
}

impl<T: Model> Model for Vec<T> {
    type Field = ListField;
}
