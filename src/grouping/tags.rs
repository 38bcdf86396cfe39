use std::collections::BTreeMap;

/// Something carrying free-form tags.
pub trait Tagged {
    fn tags(&self) -> &[String];
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tags(&self) -> &[String] {
        (**self).tags()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatch {
    /// Keep items carrying at least one of the tags.
    #[default]
    Any,
    /// Keep items carrying every one of the tags.
    All,
}

fn has_tag<T: Tagged + ?Sized>(item: &T, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    item.tags().iter().any(|own| own.to_lowercase() == tag)
}

/// Items matching `tags`, compared case-insensitively. An empty tag list keeps everything.
pub fn filter_by_tags<'a, T, S>(items: &'a [T], tags: &[S], mode: TagMatch) -> Vec<&'a T>
where
    T: Tagged,
    S: AsRef<str>,
{
    if tags.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| match mode {
            TagMatch::Any => tags.iter().any(|tag| has_tag(*item, tag.as_ref())),
            TagMatch::All => tags.iter().all(|tag| has_tag(*item, tag.as_ref())),
        })
        .collect()
}

/// Distinct tags across `items`, case-insensitively deduplicated and sorted.
/// The first spelling seen wins.
pub fn all_tags<T: Tagged>(items: &[T]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for tag in items.iter().flat_map(|item| item.tags()) {
        seen.entry(tag.to_lowercase()).or_insert_with(|| tag.clone());
    }
    seen.into_values().collect()
}
