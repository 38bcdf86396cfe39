use std::collections::HashSet;
use std::hash::Hash;

/// Fields the user has interacted with during the current edit session.
///
/// Projectors consult this to keep validation errors hidden until the user
/// has touched the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchedFields<F: Eq + Hash> {
    fields: HashSet<F>,
}

impl<F: Eq + Hash> Default for TouchedFields<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Eq + Hash> TouchedFields<F> {
    pub fn new() -> Self {
        Self {
            fields: HashSet::new(),
        }
    }

    /// Record a field as touched. Returns `true` if it was not touched before.
    pub fn touch(&mut self, field: F) -> bool {
        self.fields.insert(field)
    }

    pub fn contains(&self, field: &F) -> bool {
        self.fields.contains(field)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.fields.iter()
    }
}

impl<F: Eq + Hash> FromIterator<F> for TouchedFields<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<F: Eq + Hash> Extend<F> for TouchedFields<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        self.fields.extend(iter);
    }
}
