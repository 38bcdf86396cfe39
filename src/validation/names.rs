use std::collections::HashMap;

use crate::Named;

/// Case-insensitive index from display name to the id that owns it.
/// Names are compared trimmed.
///
/// A name is available to an entity when nobody owns it, or when the entity
/// itself already owns it (renaming back to your own name is always fine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    ids_by_name: HashMap<String, String>,
}

impl NameLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Named,
    {
        let mut lookup = Self::new();
        for item in items {
            lookup.insert(item.name(), item.id());
        }
        lookup
    }

    // surrounding whitespace never makes a name distinct
    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn insert(&mut self, name: &str, id: impl Into<String>) {
        self.ids_by_name.insert(Self::key(name), id.into());
    }

    /// Drops every name owned by `id`.
    pub fn remove_id(&mut self, id: &str) {
        self.ids_by_name.retain(|_, owner| owner != id);
    }

    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(&Self::key(name)).map(String::as_str)
    }

    pub fn is_available(&self, name: &str, id: &str) -> bool {
        match self.id_for(name) {
            None => true,
            Some(owner) => owner == id,
        }
    }

    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }
}

/// First of `"<base> 2"`, `"<base> 3"`, ... that `id` may use.
pub fn suggest_name(base: &str, lookup: &NameLookup, id: &str) -> String {
    let base = base.trim_end();
    let mut n = 2u32;
    loop {
        let candidate = format!("{} {}", base, n);
        if lookup.is_available(&candidate, id) {
            return candidate;
        }
        n += 1;
    }
}
