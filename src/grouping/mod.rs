//! Alphabetic sectioning of entity lists.

mod tags;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::GroupingOptions;
use crate::Named;

pub use tags::{all_tags, filter_by_tags, TagMatch, Tagged};

/// Title used for every non-alphabetic section when collapsing is enabled.
pub const COLLAPSED_TITLE: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section<T> {
    title: String,
    items: Vec<T>,
}

impl<T> Section<T> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items partitioned into titled sections, sections sorted by title and items
/// sorted within each section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedCollection<T> {
    sections: Vec<Section<T>>,
}

impl<T> Default for GroupedCollection<T> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<T> GroupedCollection<T> {
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    pub fn section(&self, section: usize) -> Option<&Section<T>> {
        self.sections.get(section)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(Section::title).collect()
    }

    /// Item at `(section, index)`, or `None` when either is out of range.
    pub fn get(&self, section: usize, index: usize) -> Option<&T> {
        self.sections.get(section)?.items.get(index)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    pub fn into_sections(self) -> Vec<Section<T>> {
        self.sections
    }
}

/// Section title for a display name: its first character, uppercased.
/// `None` for an empty name.
pub fn section_key(name: &str) -> Option<String> {
    name.chars().next().map(normalize_key)
}

fn normalize_key(first: char) -> String {
    first.to_uppercase().collect()
}

/// Groups `items` by `key_fn`, ordering items within a section with `cmp`.
///
/// Keys are uppercased before bucketing so letters differing only by case
/// share a section.
pub fn group_by<T, K, C>(items: impl IntoIterator<Item = T>, mut key_fn: K, mut cmp: C) -> GroupedCollection<T>
where
    K: FnMut(&T) -> char,
    C: FnMut(&T, &T) -> Ordering,
{
    let mut buckets: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        let title = normalize_key(key_fn(&item));
        buckets.entry(title).or_default().push(item);
    }

    let sections = buckets
        .into_iter()
        .map(|(title, mut items)| {
            items.sort_by(&mut cmp);
            Section { title, items }
        })
        .collect();

    GroupedCollection { sections }
}

/// Case-insensitive name order, falling back to exact name then id.
pub fn by_name<T: Named>(a: &T, b: &T) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.id().cmp(b.id()))
}

/// Groups named entities by the first letter of their name.
///
/// # Panics
///
/// Panics if any item has an empty name. Callers guarantee non-empty names
/// before grouping.
pub fn group_by_name<T: Named>(items: impl IntoIterator<Item = T>) -> GroupedCollection<T> {
    group_by_name_with(items, &GroupingOptions::default())
}

/// [`group_by_name`] with explicit options. A collapsed `#` section is placed last.
///
/// # Panics
///
/// Panics if any item has an empty name.
pub fn group_by_name_with<T: Named>(
    items: impl IntoIterator<Item = T>,
    options: &GroupingOptions,
) -> GroupedCollection<T> {
    let collapse = options.collapse_non_alphabetic;
    let grouped = group_by(
        items,
        |item| match item.name().chars().next() {
            Some(first) => first,
            None => panic!("cannot group entity {:?} with an empty name", item.id()),
        },
        by_name,
    );
    if !collapse {
        return grouped;
    }

    let mut sections: Vec<Section<T>> = Vec::with_capacity(grouped.sections.len());
    let mut collapsed: Vec<T> = Vec::new();
    for section in grouped.sections {
        if section.title.chars().all(char::is_alphabetic) {
            sections.push(section);
        } else {
            collapsed.extend(section.items);
        }
    }
    if !collapsed.is_empty() {
        collapsed.sort_by(by_name);
        sections.push(Section {
            title: COLLAPSED_TITLE.to_string(),
            items: collapsed,
        });
    }
    GroupedCollection { sections }
}
